use crate::components::backend::Backend;
use crate::config::Config;
use crate::error::{component_error, DeskResult};
use crate::utils::prompt::Prompt;
use crate::utils::time::Clock;
use async_trait::async_trait;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

// Export components
pub mod backend;
pub mod briefing;
pub mod calendar;
pub mod memos;
pub mod tasks;

pub use briefing::BriefingHandle;
pub use calendar::CalendarHandle;
pub use memos::MemoHandle;
pub use tasks::TaskHandle;

/// Collaborators every component is built from
#[derive(Clone)]
pub struct ComponentContext {
    pub backend: Backend,
    pub prompt: Arc<dyn Prompt>,
    pub clock: Arc<dyn Clock>,
}

/// Component trait that all components must implement
#[async_trait]
pub trait Component: Send + Sync + Any {
    /// Get the name of the component
    fn name(&self) -> &'static str;

    /// Initialize the component
    async fn init(&self, ctx: &ComponentContext) -> DeskResult<()>;

    /// Shutdown the component
    async fn shutdown(&self) -> DeskResult<()>;

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Manager for all components
pub struct ComponentManager {
    components: Vec<Box<dyn Component>>,
    config: Arc<RwLock<Config>>,
}

impl fmt::Debug for ComponentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentManager")
            .field("components", &self.names())
            .field("config", &self.config)
            .finish()
    }
}

impl ComponentManager {
    /// Create a new component manager
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            components: Vec::new(),
            config,
        }
    }

    /// Register a component
    pub fn register<T: Component + 'static>(&mut self, component: T) {
        info!("Registering component: {}", component.name());
        self.components.push(Box::new(component));
    }

    /// Register a component unless it is switched off in the config
    pub async fn register_if_enabled<T: Component + 'static>(&mut self, component: T) -> bool {
        let enabled = self
            .config
            .read()
            .await
            .is_component_enabled(component.name());

        if enabled {
            self.register(component);
        } else {
            info!("Component {} is disabled, skipping", component.name());
        }
        enabled
    }

    /// Initialize all registered components
    pub async fn init_all(&self, ctx: &ComponentContext) -> DeskResult<()> {
        for component in &self.components {
            info!("Initializing component: {}", component.name());

            if let Err(e) = component.init(ctx).await {
                // Log error but continue with other components
                error!("Error initializing component {}: {:?}", component.name(), e);
            }
        }

        Ok(())
    }

    /// Shutdown all components
    pub async fn shutdown_all(&self) -> DeskResult<()> {
        info!("Shutting down all components");

        for component in &self.components {
            info!("Shutting down component: {}", component.name());

            if let Err(e) = component.shutdown().await {
                // Log error but continue with other components
                error!("Error shutting down component {}: {:?}", component.name(), e);
            }
        }

        Ok(())
    }

    /// Names of the registered components, in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    /// Get a component by name
    pub fn get_component_by_name(&self, name: &str) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// Get a registered component as its concrete type
    pub fn get<T: Component>(&self, name: &str) -> DeskResult<&T> {
        self.get_component_by_name(name)
            .ok_or_else(|| component_error(&format!("Component {} is not enabled", name)))?
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| component_error(&format!("Component {} has an unexpected type", name)))
    }
}
