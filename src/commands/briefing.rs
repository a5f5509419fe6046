use super::{CommandContext, CommandResult};
use crate::session::Session;
use owo_colors::OwoColorize;
use rust_i18n::t;
use tracing::debug;

/// Show the daily briefing; on failure the fallback text is shown instead
pub async fn show(ctx: &CommandContext, session: &Session, force: bool) -> CommandResult {
    let handle = ctx.briefing().await?;
    debug!("Fetching briefing for {} (force: {})", session.user_id(), force);

    let result = handle.fetch(force).await;
    let text = handle.current().await?.unwrap_or_default();
    println!("{}", render_briefing(&text));
    result.map(|_| ())
}

pub fn render_briefing(text: &str) -> String {
    format!("{}\n{}", t!("briefing_heading").bold(), text)
}
