use super::briefing::render_briefing;
use super::calendar::render_month;
use super::memo::render_memos;
use super::tasks::render_tasks;
use super::{Command, CommandContext, CommandResult};
use crate::error::{DeskResult, Error};
use crate::session::Session;
use crate::utils::prompt::{Notice, Prompt};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use rust_i18n::t;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::oneshot;
use tracing::{debug, info};

/// One line typed into the shell; the first word names the command
#[derive(Parser, Debug)]
#[command(multicall = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    #[command(flatten)]
    Dashboard(Command),
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// What a typed line asks the shell to do
#[derive(Debug, PartialEq, Eq)]
enum LineAction {
    Skip,
    Quit,
    Run(Command),
}

fn parse_line(line: &str) -> Result<LineAction, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(LineAction::Skip);
    }

    Ok(match ShellLine::try_parse_from(words)?.command {
        ShellCommand::Quit => LineAction::Quit,
        ShellCommand::Dashboard(command) => LineAction::Run(command),
    })
}

/// Interactive dashboard: load everything once, then run commands line by
/// line until `quit`, end of input, or a shutdown signal.
pub async fn run(
    ctx: &CommandContext,
    session: &Session,
    mut shutdown: oneshot::Receiver<()>,
) -> CommandResult {
    println!("{}", t!("shell_welcome", user = session.user_id()).bold());
    show_dashboard(ctx, session).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_prompt().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut shutdown => {
                info!("Shell interrupted by shutdown signal");
                break;
            }
        };

        let Some(line) = line else {
            debug!("Input closed, leaving shell");
            break;
        };

        match parse_line(&line) {
            Ok(LineAction::Skip) => {}
            Ok(LineAction::Quit) => break,
            Ok(LineAction::Run(command)) => {
                if let Err(e) = super::run(ctx, session, command, false).await {
                    report(ctx, &e);
                }
            }
            Err(e) => {
                let _ = e.print();
            }
        }
    }

    println!("{}", t!("shell_goodbye"));
    Ok(())
}

async fn print_prompt() -> DeskResult<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all("kyomu> ".as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

/// Transport and precondition failures were already shown by the component
fn report(ctx: &CommandContext, error: &Error) {
    if !(error.is_transport() || error.is_precondition()) {
        ctx.prompt.notify(Notice::failure(error.to_string()));
    }
}

/// Load every enabled component concurrently and print its section
async fn show_dashboard(ctx: &CommandContext, session: &Session) {
    let (calendar, tasks, memos, briefing) = futures::join!(
        calendar_section(ctx),
        tasks_section(ctx, session),
        memos_section(ctx, session),
        briefing_section(ctx),
    );

    for section in [calendar, tasks, memos, briefing] {
        match section {
            Ok(Some(text)) => println!("{}\n", text),
            Ok(None) => {}
            Err(e) => report(ctx, &e),
        }
    }
}

// Load failures are reported by the components; the sections still render
// whatever state they hold.

async fn calendar_section(ctx: &CommandContext) -> DeskResult<Option<String>> {
    if !ctx.has_component("calendar") {
        return Ok(None);
    }
    let handle = ctx.calendar().await?;
    let _ = handle.load().await;
    Ok(Some(render_month(&handle.snapshot().await?)))
}

async fn tasks_section(ctx: &CommandContext, session: &Session) -> DeskResult<Option<String>> {
    if !ctx.has_component("tasks") {
        return Ok(None);
    }
    let handle = ctx.tasks().await?;
    let _ = handle.load().await;
    Ok(Some(render_tasks(session, &handle.list().await?)))
}

async fn memos_section(ctx: &CommandContext, session: &Session) -> DeskResult<Option<String>> {
    if !ctx.has_component("memos") {
        return Ok(None);
    }
    let handle = ctx.memos().await?;
    let _ = handle.load().await;
    Ok(Some(render_memos(session, &handle.list().await?)))
}

async fn briefing_section(ctx: &CommandContext) -> DeskResult<Option<String>> {
    if !ctx.has_component("briefing") {
        return Ok(None);
    }
    let handle = ctx.briefing().await?;
    let _ = handle.fetch(false).await;
    let text = handle.current().await?.unwrap_or_default();
    Ok(Some(render_briefing(&text)))
}
