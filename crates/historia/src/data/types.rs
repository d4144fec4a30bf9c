//! Common data types for persistence
//!
//! Shared types used across the data module.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// HistoryEvent - One historical fact
// =============================================================================

/// One historical fact as supplied by the lookup service
///
/// `year` is free-form (the feed uses labels such as `"44 BC"`), so it is
/// kept as text. Equality is structural over both fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub year: String,
    pub text: String,
}

impl HistoryEvent {
    pub fn new(year: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            text: text.into(),
        }
    }

    /// Leading integer of the year label, if any
    ///
    /// `"1969"` gives 1969, `"44 BC"` gives 44, `"c. 300"` gives `None`.
    pub fn leading_year(&self) -> Option<i64> {
        let s = self.year.trim_start();
        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, s.strip_prefix('+').unwrap_or(s)),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        digits[..end].parse::<i64>().ok().map(|n| sign * n)
    }
}

impl fmt::Display for HistoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.year, self.text)
    }
}

/// Identity predicate for favorites
///
/// Every store path (add, remove, contains, load) compares events through
/// this function.
pub fn same_event(a: &HistoryEvent, b: &HistoryEvent) -> bool {
    a.year == b.year && a.text == b.text
}

// =============================================================================
// Category - Which feed an event came from
// =============================================================================

/// Source feed of an event
///
/// Unknown keys are kept verbatim in `Other` so they survive a round trip
/// through storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Events,
    Deaths,
    Births,
    Other(String),
}

impl Category {
    /// The three tabs of the results view, in display order
    pub const TABS: [Category; 3] = [Category::Events, Category::Deaths, Category::Births];

    /// Parse a category key (`"events"`, `"deaths"`, `"births"`)
    pub fn from_key(key: &str) -> Self {
        match key {
            "events" => Category::Events,
            "deaths" => Category::Deaths,
            "births" => Category::Births,
            other => Category::Other(other.to_string()),
        }
    }

    /// Machine-readable key
    pub fn key(&self) -> &str {
        match self {
            Category::Events => "events",
            Category::Deaths => "deaths",
            Category::Births => "births",
            Category::Other(key) => key,
        }
    }

    /// Tab title on the results view
    pub fn tab_label(&self) -> &str {
        match self {
            Category::Events => "Eventos",
            Category::Deaths => "Mortes",
            Category::Births => "Nascimentos",
            Category::Other(key) => key,
        }
    }

    /// Short badge on the favorites list
    pub fn badge_label(&self) -> &'static str {
        match self {
            Category::Events => "Evento",
            Category::Deaths => "Morte",
            Category::Births => "Nascimento",
            Category::Other(_) => "Fato",
        }
    }

    /// Badge on the event details view
    pub fn detail_label(&self) -> &'static str {
        match self {
            Category::Events => "Evento Histórico",
            Category::Deaths => "Morte",
            Category::Births => "Nascimento",
            Category::Other(_) => "Fato Histórico",
        }
    }

    /// Message shown when a tab has no items
    pub fn empty_message(&self) -> &'static str {
        match self {
            Category::Events => "Nenhum evento encontrado para esta data",
            Category::Deaths => "Nenhuma morte registrada para esta data",
            Category::Births => "Nenhum nascimento registrado para esta data",
            Category::Other(_) => "Nenhum fato registrado para esta data",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl From<String> for Category {
    fn from(key: String) -> Self {
        match key.as_str() {
            "events" | "deaths" | "births" => Category::from_key(&key),
            _ => Category::Other(key),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(key) => key,
            known => known.key().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// FavoriteRecord - A bookmarked event with display metadata
// =============================================================================

/// A bookmarked event
///
/// Only `event` takes part in identity; `category`, `date` and `added_at`
/// are display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    pub event: HistoryEvent,
    pub category: Category,
    /// Precomputed date label, e.g. "25 de dezembro"
    #[serde(default)]
    pub date: String,
    /// ISO-8601 timestamp captured when the favorite was added
    #[serde(default)]
    pub added_at: String,
}

impl FavoriteRecord {
    /// Create a record stamped with the current time
    pub fn new(event: HistoryEvent, category: Category, date: impl Into<String>) -> Self {
        Self {
            event,
            category,
            date: date.into(),
            added_at: now_iso8601(),
        }
    }

    /// Override the added-at timestamp
    pub fn with_added_at(mut self, added_at: impl Into<String>) -> Self {
        self.added_at = added_at.into();
        self
    }

    /// Added-at date as `DD/MM/YYYY` in local time
    ///
    /// Falls back to the raw value when it is not a valid timestamp.
    pub fn added_on(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.added_at) {
            Ok(ts) => ts.with_timezone(&Local).format("%d/%m/%Y").to_string(),
            Err(_) => self.added_at.clone(),
        }
    }
}

/// Current UTC time with millisecond precision, e.g. `2024-12-25T10:00:00.000Z`
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// =============================================================================
// HistoryData - Lookup payload for one day
// =============================================================================

/// Everything the lookup service knows about one day
///
/// A missing list and an empty list mean the same thing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryData {
    #[serde(default, rename(deserialize = "Events"), alias = "events")]
    pub events: Vec<HistoryEvent>,
    #[serde(default, rename(deserialize = "Deaths"), alias = "deaths")]
    pub deaths: Vec<HistoryEvent>,
    #[serde(default, rename(deserialize = "Births"), alias = "births")]
    pub births: Vec<HistoryEvent>,
}

impl HistoryData {
    /// Events of one category; unknown categories have none
    pub fn for_category(&self, category: &Category) -> &[HistoryEvent] {
        match category {
            Category::Events => &self.events,
            Category::Deaths => &self.deaths,
            Category::Births => &self.births,
            Category::Other(_) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.deaths.is_empty() && self.births.is_empty()
    }
}
