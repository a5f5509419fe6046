//! Optimistic local mutation with rollback.
//!
//! The local value is changed before the backend confirms it. If the remote
//! call fails, only the mutated field of the matching item is restored, so
//! unrelated edits made to other items or fields survive the rollback.

use crate::error::{precondition_error, DeskResult};
use std::future::Future;
use tracing::warn;

/// Apply `next` to the field picked by `field` on the first item matching
/// `matches`, then await `remote`. On failure the previous field value is
/// put back and the remote error returned.
///
/// The item is located again by `matches` before restoring, since the list
/// may have been reordered while the request was in flight.
pub async fn apply_optimistic<T, V, M, F, Fut>(
    items: &mut [T],
    matches: M,
    field: F,
    next: V,
    remote: Fut,
) -> DeskResult<()>
where
    M: Fn(&T) -> bool,
    F: Fn(&mut T) -> &mut V,
    Fut: Future<Output = DeskResult<()>>,
{
    let previous = {
        let item = items
            .iter_mut()
            .find(|item| matches(item))
            .ok_or_else(|| precondition_error("Item not found"))?;
        std::mem::replace(field(item), next)
    };

    match remote.await {
        Ok(()) => Ok(()),
        Err(e) => {
            match items.iter_mut().find(|item| matches(item)) {
                Some(item) => *field(item) = previous,
                None => warn!("Rollback target disappeared before restore"),
            }
            Err(e)
        }
    }
}
