use super::{CommandContext, CommandResult};
use crate::components::calendar::geometry::{events_on, CalendarDay};
use crate::components::calendar::models::{Event, EventKind, UploadFile};
use crate::components::calendar::{CalendarSnapshot, UploadState};
use crate::session::Session;
use crate::utils::i18n::weekday_labels;
use crate::utils::prompt::{Notice, Prompt};
use crate::utils::time::same_month;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;
use rust_i18n::t;
use std::path::Path;
use tracing::debug;

pub use crate::components::calendar::Direction;

/// Width of one day column
const CELL_WIDTH: usize = 4;

/// Show the month view, optionally jumping to `month` first
pub async fn show(
    ctx: &CommandContext,
    session: &Session,
    month: Option<NaiveDate>,
    fresh: bool,
) -> CommandResult {
    let handle = ctx.calendar().await?;
    debug!("Showing calendar for {}", session.user_id());

    // A failed load keeps whatever was on screen, which is still worth drawing
    let loaded = if fresh { handle.load().await.map(|_| ()) } else { Ok(()) };

    let snapshot = match month {
        Some(month) => handle.jump_to(month).await?,
        None => handle.snapshot().await?,
    };
    println!("{}", render_month(&snapshot));
    loaded
}

/// Move one month back or forward and show it
pub async fn step(
    ctx: &CommandContext,
    session: &Session,
    direction: Direction,
    fresh: bool,
) -> CommandResult {
    let handle = ctx.calendar().await?;
    debug!("Stepping calendar {:?} for {}", direction, session.user_id());

    let loaded = if fresh { handle.load().await.map(|_| ()) } else { Ok(()) };

    let snapshot = handle.navigate(direction).await?;
    println!("{}", render_month(&snapshot));
    loaded
}

/// Upload a spreadsheet and show the month it lands on
pub async fn upload(ctx: &CommandContext, session: &Session, path: &Path) -> CommandResult {
    let handle = ctx.calendar().await?;
    let file = UploadFile::from_path(path).await?;
    debug!("Uploading {} for {}", file.name, session.user_id());

    ctx.prompt
        .notify(Notice::info(t!("calendar_uploading", file = file.name.as_str())));
    let snapshot = handle.upload(file).await?;
    println!("{}", render_month(&snapshot));
    Ok(())
}

/// Delete one event by id
pub async fn delete(ctx: &CommandContext, id: &str, fresh: bool) -> CommandResult {
    let handle = ctx.calendar().await?;
    if fresh {
        // The local cache is only trimmed, so a failed load does not block the delete
        let _ = handle.load().await;
    }

    if !handle.delete(Some(id.to_string())).await? {
        ctx.prompt.notify(Notice::info(t!("cancelled")));
    }
    Ok(())
}

/// Month grid followed by the month's events
pub fn render_month(snapshot: &CalendarSnapshot) -> String {
    let shown = snapshot.grid.month();
    let mut lines = Vec::new();

    let heading = t!(
        "calendar_heading",
        year = shown.year(),
        month = shown.month()
    );
    lines.push(heading.bold().to_string());

    let header: String = weekday_labels()
        .iter()
        .map(|label| pad_left(label, CELL_WIDTH))
        .collect();
    lines.push(header.dimmed().to_string());

    for week in snapshot.grid.weeks() {
        let row: String = week
            .iter()
            .map(|day| render_day(day, &snapshot.events))
            .collect();
        lines.push(row);
    }

    lines.push(String::new());

    let mut month_events: Vec<(NaiveDate, &Event)> = snapshot
        .events
        .iter()
        .filter_map(|event| event.day().map(|day| (day, event)))
        .filter(|(day, _)| same_month(*day, shown))
        .collect();
    month_events.sort_by_key(|(day, _)| *day);

    if month_events.is_empty() {
        lines.push(t!("calendar_no_events").dimmed().to_string());
    } else {
        let labels = weekday_labels();
        for (day, event) in month_events {
            let weekday = &labels[day.weekday().num_days_from_sunday() as usize];
            lines.push(format!(
                "  {} ({}) {}",
                day.format("%m-%d"),
                weekday,
                render_event(event)
            ));
        }
    }

    if snapshot.upload_state == UploadState::Uploading {
        lines.push(t!("calendar_upload_in_progress").yellow().to_string());
    }

    lines.join("\n")
}

fn render_day(day: &CalendarDay, events: &[Event]) -> String {
    let marker = if events_on(events, day.date).is_empty() {
        ' '
    } else {
        '*'
    };
    let cell = format!("{:>width$}{}", day.date.day(), marker, width = CELL_WIDTH - 1);

    if day.is_today {
        cell.reversed().to_string()
    } else if !day.in_month {
        cell.dimmed().to_string()
    } else if day.date.weekday().num_days_from_sunday() == 0 {
        cell.red().to_string()
    } else if marker == '*' {
        cell.bold().to_string()
    } else {
        cell
    }
}

/// One event line: kind tag, title, optional time and place, id
pub fn render_event(event: &Event) -> String {
    let tag = match event.kind {
        EventKind::Official => format!("[{}]", t!("event_kind_official")).blue().to_string(),
        EventKind::Trip => format!("[{}]", t!("event_kind_trip")).green().to_string(),
        EventKind::Personal => format!("[{}]", t!("event_kind_personal")).yellow().to_string(),
    };

    let mut line = format!("{} {}", tag, event.title);
    if let Some(time) = event.time.as_deref().filter(|time| !time.is_empty()) {
        line.push_str(&format!(" {}", time));
    }
    if let Some(location) = event.location.as_deref().filter(|loc| !loc.is_empty()) {
        line.push_str(&format!(" @ {}", location));
    }
    match event.id() {
        Some(id) => line.push_str(&format!(" {}", format!("#{}", id).dimmed())),
        None => line.push_str(&format!(" {}", t!("event_unsynced").dimmed())),
    }
    line
}

/// Right-align `text` in `width` terminal columns, counting Hangul and
/// other wide characters as two columns
fn pad_left(text: &str, width: usize) -> String {
    let used: usize = text
        .chars()
        .map(|c| if c.is_ascii() { 1 } else { 2 })
        .sum();
    format!("{}{}", " ".repeat(width.saturating_sub(used)), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_left_counts_wide_characters() {
        assert_eq!(pad_left("일", 4), "  일");
        assert_eq!(pad_left("Sun", 4), " Sun");
        assert_eq!(pad_left("toolong", 4), "toolong");
    }
}
