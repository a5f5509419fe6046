use crate::components::backend::ApiClient;
use crate::components::briefing::Briefing;
use crate::components::calendar::Calendar;
use crate::components::memos::Memos;
use crate::components::tasks::Tasks;
use crate::components::{
    BriefingHandle, CalendarHandle, ComponentManager, MemoHandle, TaskHandle,
};
use crate::config::Config;
use crate::error::{component_error, DeskResult};
use crate::session::Session;
use crate::utils::prompt::{Notice, Prompt, TerminalPrompt};
use crate::utils::time::parse_month;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_i18n::t;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

// Export submodules
pub mod briefing;
pub mod calendar;
pub mod memo;
pub mod shell;
pub mod tasks;

/// Command line interface
#[derive(Parser, Debug)]
#[command(name = "kyomu", version)]
#[command(about = "School administrator's dashboard: calendar, tasks, memo pad and daily briefing")]
pub struct Cli {
    /// Backend base URL, overrides API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Message language (ko, en), overrides DASHBOARD_LOCALE
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// 6-digit dashboard password; prompted for when missing
    #[arg(long, global = true, env = "KYOMU_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Without a subcommand the interactive shell starts
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Everything the dashboard can do, shared by the one-shot CLI and the shell
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the month calendar
    Calendar {
        /// Month to show (YYYY-MM) instead of the nearest month with events
        #[arg(long, value_parser = parse_month_arg)]
        month: Option<NaiveDate>,
    },
    /// Show the previous month
    Prev,
    /// Show the next month
    Next,
    /// Upload a schedule spreadsheet
    Upload { file: PathBuf },
    /// Delete a calendar event
    DeleteEvent {
        id: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List tasks
    Tasks,
    /// Add a task from free text; dates and priority are extracted by the backend
    AddTask {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Mark a task done or not done
    ToggleTask { id: String },
    /// Move a task to the next priority
    CyclePriority { id: String },
    /// Delete a task
    DeleteTask {
        id: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Memo pad
    Memo {
        #[command(subcommand)]
        action: Option<MemoAction>,
    },
    /// Show the daily briefing
    Briefing {
        /// Ask the backend to regenerate today's briefing
        #[arg(long)]
        force: bool,
    },
    /// Check that the backend is reachable
    Health,
    /// Enable or disable a dashboard component
    Component {
        name: String,
        #[arg(long, conflicts_with = "disable", required_unless_present = "disable")]
        enable: bool,
        #[arg(long)]
        disable: bool,
    },
    /// Start the interactive shell
    Shell,
}

/// Memo pad actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum MemoAction {
    /// Show the memo pad
    List,
    /// Add an item
    Add {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Check an item
    Check { id: String },
    /// Uncheck an item
    Uncheck { id: String },
    /// Remove an item
    Remove { id: String },
    /// Remove every item
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

impl Command {
    /// Whether the command was given `--yes`
    pub fn assume_yes(&self) -> bool {
        match self {
            Command::DeleteEvent { yes, .. } | Command::DeleteTask { yes, .. } => *yes,
            Command::Memo {
                action: Some(MemoAction::Clear { yes }),
            } => *yes,
            _ => false,
        }
    }
}

fn parse_month_arg(value: &str) -> Result<NaiveDate, String> {
    parse_month(value).ok_or_else(|| format!("expected YYYY-MM, got '{}'", value))
}

/// Shared context for all commands
pub struct CommandContext {
    pub config: Arc<RwLock<Config>>,
    pub component_manager: Arc<ComponentManager>,
    pub prompt: Arc<TerminalPrompt>,
    pub client: ApiClient,
}

impl CommandContext {
    pub fn new(
        config: Arc<RwLock<Config>>,
        component_manager: Arc<ComponentManager>,
        prompt: Arc<TerminalPrompt>,
        client: ApiClient,
    ) -> Self {
        Self {
            config,
            component_manager,
            prompt,
            client,
        }
    }

    pub async fn calendar(&self) -> DeskResult<CalendarHandle> {
        self.component_manager
            .get::<Calendar>("calendar")?
            .get_handle()
            .await
            .ok_or_else(|| component_error("Calendar is not initialized"))
    }

    pub async fn tasks(&self) -> DeskResult<TaskHandle> {
        self.component_manager
            .get::<Tasks>("tasks")?
            .get_handle()
            .await
            .ok_or_else(|| component_error("Tasks are not initialized"))
    }

    pub async fn memos(&self) -> DeskResult<MemoHandle> {
        self.component_manager
            .get::<Memos>("memos")?
            .get_handle()
            .await
            .ok_or_else(|| component_error("Memos are not initialized"))
    }

    pub async fn briefing(&self) -> DeskResult<BriefingHandle> {
        self.component_manager
            .get::<Briefing>("briefing")?
            .get_handle()
            .await
            .ok_or_else(|| component_error("Briefing is not initialized"))
    }

    /// Whether a component was registered at startup
    pub fn has_component(&self, name: &str) -> bool {
        self.component_manager.get_component_by_name(name).is_some()
    }
}

/// Type alias for command result
pub type CommandResult = DeskResult<()>;

/// Run one dashboard command.
///
/// `fresh` is true for one-shot runs, where the caches start empty and have
/// to be loaded before an edit can find its target.
pub async fn run(
    ctx: &CommandContext,
    session: &Session,
    command: Command,
    fresh: bool,
) -> CommandResult {
    ctx.prompt.set_assume_yes(command.assume_yes());

    match command {
        Command::Calendar { month } => calendar::show(ctx, session, month, fresh).await,
        Command::Prev => calendar::step(ctx, session, calendar::Direction::Prev, fresh).await,
        Command::Next => calendar::step(ctx, session, calendar::Direction::Next, fresh).await,
        Command::Upload { file } => calendar::upload(ctx, session, &file).await,
        Command::DeleteEvent { id, .. } => calendar::delete(ctx, &id, fresh).await,
        Command::Tasks => tasks::list(ctx, session, fresh).await,
        Command::AddTask { text } => tasks::add(ctx, session, &text.join(" ")).await,
        Command::ToggleTask { id } => tasks::toggle(ctx, session, &id, fresh).await,
        Command::CyclePriority { id } => tasks::cycle_priority(ctx, session, &id, fresh).await,
        Command::DeleteTask { id, .. } => tasks::delete(ctx, session, &id, fresh).await,
        Command::Memo { action } => {
            memo::run(ctx, session, action.unwrap_or(MemoAction::List), fresh).await
        }
        Command::Briefing { force } => briefing::show(ctx, session, force).await,
        Command::Health => health(ctx).await,
        Command::Component { name, enable, .. } => set_component(ctx, &name, enable).await,
        Command::Shell => {
            ctx.prompt.notify(Notice::info(t!("shell_already_running")));
            Ok(())
        }
    }
}

async fn health(ctx: &CommandContext) -> CommandResult {
    match ctx.client.health().await {
        Ok(status) => {
            let body = serde_json::to_string_pretty(&status)?;
            ctx.prompt
                .notify(Notice::success(t!("health_ok", status = body)));
            Ok(())
        }
        Err(e) => {
            ctx.prompt
                .notify(Notice::failure(t!("health_failed", error = e.to_string())));
            Err(e)
        }
    }
}

async fn set_component(ctx: &CommandContext, name: &str, enabled: bool) -> CommandResult {
    ctx.config.write().await.set_component_enabled(name, enabled)?;

    let message = if enabled {
        t!("component_enabled", name = name)
    } else {
        t!("component_disabled", name = name)
    };
    ctx.prompt.notify(Notice::success(message));
    Ok(())
}
