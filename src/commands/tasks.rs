use super::{CommandContext, CommandResult};
use crate::components::tasks::models::{Priority, Task};
use crate::components::TaskHandle;
use crate::error::DeskResult;
use crate::session::Session;
use crate::utils::prompt::{Notice, Prompt};
use owo_colors::OwoColorize;
use rust_i18n::t;

pub async fn list(ctx: &CommandContext, session: &Session, fresh: bool) -> CommandResult {
    let handle = ctx.tasks().await?;
    let tasks = if fresh { handle.load().await? } else { handle.list().await? };
    println!("{}", render_tasks(session, &tasks));
    Ok(())
}

pub async fn add(ctx: &CommandContext, session: &Session, text: &str) -> CommandResult {
    let handle = ctx.tasks().await?;

    match handle.add(text).await? {
        Some(task) => {
            ctx.prompt
                .notify(Notice::success(t!("tasks_added", content = task.content.as_str())));
            println!("{}", render_tasks(session, &handle.list().await?));
        }
        None => ctx.prompt.notify(Notice::info(t!("tasks_empty_input"))),
    }
    Ok(())
}

pub async fn toggle(ctx: &CommandContext, session: &Session, id: &str, fresh: bool) -> CommandResult {
    let handle = loaded(ctx, fresh).await?;
    let tasks = handle.toggle(id).await?;
    println!("{}", render_tasks(session, &tasks));
    Ok(())
}

pub async fn cycle_priority(
    ctx: &CommandContext,
    session: &Session,
    id: &str,
    fresh: bool,
) -> CommandResult {
    let handle = loaded(ctx, fresh).await?;
    let tasks = handle.cycle_priority(id).await?;
    println!("{}", render_tasks(session, &tasks));
    Ok(())
}

pub async fn delete(ctx: &CommandContext, session: &Session, id: &str, fresh: bool) -> CommandResult {
    let handle = loaded(ctx, fresh).await?;

    if handle.delete(id).await? {
        ctx.prompt.notify(Notice::success(t!("tasks_deleted")));
    } else {
        ctx.prompt.notify(Notice::info(t!("cancelled")));
    }
    println!("{}", render_tasks(session, &handle.list().await?));
    Ok(())
}

/// Edits look tasks up in the cache, so one-shot runs fill it first
async fn loaded(ctx: &CommandContext, fresh: bool) -> DeskResult<TaskHandle> {
    let handle = ctx.tasks().await?;
    if fresh {
        handle.load().await?;
    }
    Ok(handle)
}

/// Task list, open tasks first
pub fn render_tasks(session: &Session, tasks: &[Task]) -> String {
    let mut lines = vec![t!("tasks_heading", user = session.user_id()).bold().to_string()];

    if tasks.is_empty() {
        lines.push(t!("tasks_none").dimmed().to_string());
        return lines.join("\n");
    }

    let (done, open): (Vec<&Task>, Vec<&Task>) = tasks.iter().partition(|task| task.is_completed);
    for task in open.into_iter().chain(done) {
        lines.push(render_task(task));
    }
    lines.join("\n")
}

fn render_task(task: &Task) -> String {
    let check = if task.is_completed { "[x]" } else { "[ ]" };
    let priority = format!("{:<6}", task.priority.as_str());
    let priority = match task.priority {
        Priority::High => priority.red().to_string(),
        Priority::Medium => priority.yellow().to_string(),
        Priority::Low => priority.green().to_string(),
    };
    let due = task.due_date.as_deref().unwrap_or("----------");
    let content = if task.is_completed {
        task.content.strikethrough().dimmed().to_string()
    } else {
        task.content.clone()
    };

    format!(
        "  {} {} {} {} {}",
        check,
        priority,
        due,
        content,
        format!("#{}", task.id).dimmed()
    )
}
