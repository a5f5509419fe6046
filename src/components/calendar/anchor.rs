//! Picks the month to show after the event list changes.

use super::models::Event;
use crate::utils::time::{same_month, shift_month};
use chrono::NaiveDate;

/// Month navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// First day of the month before or after the anchor's month
pub fn navigate(anchor: NaiveDate, direction: Direction) -> NaiveDate {
    match direction {
        Direction::Prev => shift_month(anchor, -1),
        Direction::Next => shift_month(anchor, 1),
    }
}

/// The event the view should jump to, or `None` when the current month
/// already shows at least one event (or there is nothing to show).
///
/// Events are ordered by date with a stable sort, so events sharing a date
/// keep their fetch order. The first event on or after `today` wins; when
/// every event is in the past the latest one is used. Events whose date does
/// not parse are ignored.
pub fn nearest_event(events: &[Event], anchor: NaiveDate, today: NaiveDate) -> Option<&Event> {
    let mut dated: Vec<(NaiveDate, &Event)> = events
        .iter()
        .filter_map(|event| event.day().map(|day| (day, event)))
        .collect();

    if dated.is_empty() || dated.iter().any(|(day, _)| same_month(*day, anchor)) {
        return None;
    }

    dated.sort_by_key(|(day, _)| *day);

    dated
        .iter()
        .find(|(day, _)| *day >= today)
        .or_else(|| dated.last())
        .map(|(_, event)| *event)
}

/// New anchor date after a fetch, `None` to keep the current one
pub fn reconcile_anchor(events: &[Event], anchor: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    nearest_event(events, anchor, today).and_then(Event::day)
}
