//! Sharing a single event
//!
//! Builds the plain-text summary handed to a system share facility, with
//! a clipboard-style fallback when no share facility exists.

use crate::config::app::DISPLAY_NAME;
use crate::data::types::HistoryEvent;
use crate::error::Result;
use log::debug;

/// Text shared for one event
pub fn share_text(date: &str, event: &HistoryEvent) -> String {
    format!(
        "📚 Fato histórico de {date}:\n\n{} - {}\n\nDescoberto no app {DISPLAY_NAME}!",
        event.year, event.text
    )
}

/// Title shared alongside the text
pub fn share_title(date: &str) -> String {
    format!("Fato histórico - {date}")
}

/// Years between the event and `current_year`
///
/// `None` when the year label has no leading number or the difference
/// does not fit in an `i64`.
pub fn years_since(event: &HistoryEvent, current_year: i64) -> Option<i64> {
    event
        .leading_year()
        .and_then(|year| current_year.checked_sub(year))
}

/// Destination for shared text (system share sheet, clipboard, stdout)
pub trait ShareTarget {
    fn share(&self, title: &str, text: &str) -> Result<()>;
}

/// What happened to a share request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the primary share facility
    Shared,
    /// The primary facility failed; treated as the user cancelling
    Cancelled,
    /// Written through the fallback (clipboard)
    Copied,
    /// The fallback failed too
    Failed,
}

/// Share via `primary` when available, otherwise via `fallback`
///
/// A failing primary is not retried through the fallback.
pub fn share_event(
    primary: Option<&dyn ShareTarget>,
    fallback: &dyn ShareTarget,
    date: &str,
    event: &HistoryEvent,
) -> ShareOutcome {
    let title = share_title(date);
    let text = share_text(date, event);

    match primary {
        Some(target) => match target.share(&title, &text) {
            Ok(()) => ShareOutcome::Shared,
            Err(e) => {
                debug!("share cancelled: {e}");
                ShareOutcome::Cancelled
            }
        },
        None => match fallback.share(&title, &text) {
            Ok(()) => ShareOutcome::Copied,
            Err(e) => {
                debug!("share fallback failed: {e}");
                ShareOutcome::Failed
            }
        },
    }
}
