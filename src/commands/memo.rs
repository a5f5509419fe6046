use super::{CommandContext, CommandResult, MemoAction};
use crate::components::memos::models::MemoItem;
use crate::session::Session;
use crate::utils::prompt::{Notice, Prompt};
use owo_colors::OwoColorize;
use rust_i18n::t;

/// Run one memo pad action and show the pad afterwards
pub async fn run(
    ctx: &CommandContext,
    session: &Session,
    action: MemoAction,
    fresh: bool,
) -> CommandResult {
    let handle = ctx.memos().await?;
    if fresh {
        handle.load().await?;
    }

    let items = match action {
        MemoAction::List => handle.list().await?,
        MemoAction::Add { text } => handle.add(text.join(" ")).await?,
        MemoAction::Check { id } => handle.set_checked(id, true).await?,
        MemoAction::Uncheck { id } => handle.set_checked(id, false).await?,
        MemoAction::Remove { id } => handle.remove(id).await?,
        MemoAction::Clear { .. } => {
            if !handle.clear().await? {
                ctx.prompt.notify(Notice::info(t!("cancelled")));
            }
            handle.list().await?
        }
    };

    println!("{}", render_memos(session, &items));
    Ok(())
}

pub fn render_memos(session: &Session, items: &[MemoItem]) -> String {
    let mut lines = vec![t!("memos_heading", user = session.user_id()).bold().to_string()];

    if items.is_empty() {
        lines.push(t!("memos_none").dimmed().to_string());
    }

    for (index, item) in items.iter().enumerate() {
        let text = if item.checked {
            format!("[x] {}", item.text).dimmed().to_string()
        } else {
            format!("[ ] {}", item.text)
        };
        lines.push(format!(
            "  {:>2}. {} {}",
            index + 1,
            text,
            format!("#{}", item.id).dimmed()
        ));
    }
    lines.join("\n")
}
