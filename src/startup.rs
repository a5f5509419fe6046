use crate::commands::{self, Cli, Command, CommandContext};
use crate::components::backend::{ApiClient, Backend};
use crate::components::briefing::Briefing;
use crate::components::calendar::Calendar;
use crate::components::memos::Memos;
use crate::components::tasks::Tasks;
use crate::components::{ComponentContext, ComponentManager};
use crate::config::Config;
use crate::error::{DeskResult, Error};
use crate::session::{LoginGate, Session};
use crate::shutdown;
use crate::utils::prompt::TerminalPrompt;
use crate::utils::time::SystemClock;
use dialoguer::Password;
use owo_colors::OwoColorize;
use rust_i18n::t;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Password attempts allowed at the interactive gate
const LOGIN_ATTEMPTS: usize = 3;

/// Initialize logging with environment-based configuration.
///
/// Logs go to stderr so rendered views on stdout stay clean.
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the config and apply command line overrides
pub async fn load_config(cli: &Cli) -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(mut config) => {
            if let Some(api_url) = &cli.api_url {
                config.api_url = api_url.clone();
            }
            if let Some(locale) = &cli.locale {
                config.locale = locale.clone();
            }
            Ok(Arc::new(RwLock::new(config)))
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Pass the login gate, either with `--password` or by asking
async fn unlock(gate: &LoginGate, password: Option<&str>) -> DeskResult<Session> {
    if let Some(password) = password {
        return gate.unlock(password);
    }

    let mut last_error = None;
    for attempt in 1..=LOGIN_ATTEMPTS {
        let prompt = t!("login_prompt").to_string();
        let input = tokio::task::spawn_blocking(move || Password::new().with_prompt(prompt).interact())
            .await
            .map_err(|e| Error::Other(format!("Password prompt failed: {}", e)))?
            .map_err(|e| Error::Other(format!("Failed to read password: {}", e)))?;

        match gate.unlock(&input) {
            Ok(session) => return Ok(session),
            Err(e) => {
                warn!("Login attempt {} of {} failed", attempt, LOGIN_ATTEMPTS);
                eprintln!("{}", e.to_string().red());
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::Other("Login aborted".to_string())))
}

/// Unlock the dashboard, start the components and run the requested command
pub async fn start(cli: Cli, config: Arc<RwLock<Config>>) -> miette::Result<ExitCode> {
    let (gate, client, tz) = {
        let config_read = config.read().await;
        crate::utils::i18n::set_locale(&config_read.locale);
        info!("Setting locale to {}", config_read.locale);

        (
            LoginGate::from_config(&config_read),
            ApiClient::from_config(&config_read)?,
            config_read.tz(),
        )
    };

    let session = match unlock(&gate, cli.password.as_deref()).await {
        Ok(session) => session,
        Err(e) if e.is_precondition() => {
            if cli.password.is_some() {
                eprintln!("{}", e.to_string().red());
            }
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    let prompt = Arc::new(TerminalPrompt::new(false));

    // Initialize component manager
    let mut component_manager = ComponentManager::new(Arc::clone(&config));
    component_manager.register_if_enabled(Calendar::new()).await;
    component_manager.register_if_enabled(Tasks::new()).await;
    component_manager.register_if_enabled(Memos::new()).await;
    component_manager.register_if_enabled(Briefing::new()).await;

    let component_ctx = ComponentContext {
        backend: Backend::http(client.clone()),
        prompt: prompt.clone(),
        clock: Arc::new(SystemClock::new(tz)),
    };
    component_manager.init_all(&component_ctx).await?;

    // Create a shared component manager
    let component_manager = Arc::new(component_manager);
    let command_ctx = CommandContext::new(
        Arc::clone(&config),
        Arc::clone(&component_manager),
        prompt,
        client,
    );

    let result = match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            // Create shutdown channel
            let (shutdown_send, shutdown_recv) = oneshot::channel();
            let shutdown_components = Arc::clone(&component_manager);

            // Spawn signal handler task
            tokio::spawn(async move {
                shutdown::handle_signals(shutdown_send, shutdown_components).await;
            });

            commands::shell::run(&command_ctx, &session, shutdown_recv).await
        }
        command => commands::run(&command_ctx, &session, command, true).await,
    };

    component_manager.shutdown_all().await?;

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Already shown to the user by the component that failed
        Err(e) if e.is_transport() || e.is_precondition() => Ok(ExitCode::FAILURE),
        Err(e) => Err(e.into()),
    }
}
