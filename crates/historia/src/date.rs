//! Day/month queries
//!
//! Validates user input such as `25/12` and turns it into the
//! `(month, day)` route key the lookup service is addressed by.
//!
//! Validation is deliberately lax about calendars: any day in 1..=31 is
//! accepted for any month, so `31/02` passes.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// `D/M`, `DD/M`, `D/MM` or `DD/MM`, ASCII digits only, nothing around it
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})$").expect("date pattern is valid"));

const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// A validated day/month query
///
/// Keeps the segments exactly as typed (`"05"` stays `"05"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateQuery {
    day: String,
    month: String,
}

impl DateQuery {
    /// Parse and validate user input
    pub fn parse(input: &str) -> Option<Self> {
        let caps = DATE_PATTERN.captures(input)?;
        let day = caps.get(1)?.as_str();
        let month = caps.get(2)?.as_str();

        let day_num: u32 = day.parse().ok()?;
        let month_num: u32 = month.parse().ok()?;
        if !(1..=31).contains(&day_num) || !(1..=12).contains(&month_num) {
            return None;
        }

        Some(Self {
            day: day.to_string(),
            month: month.to_string(),
        })
    }

    /// Whether `input` is an acceptable day/month
    pub fn validate(input: &str) -> bool {
        Self::parse(input).is_some()
    }

    /// Route key for `input`, or `None` when it does not validate
    pub fn to_route_key(input: &str) -> Option<RouteKey> {
        Self::parse(input).map(|query| query.route_key())
    }

    pub fn route_key(&self) -> RouteKey {
        RouteKey {
            month: self.month.clone(),
            day: self.day.clone(),
        }
    }
}

/// Month and day segments addressing one results view
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub month: String,
    pub day: String,
}

impl RouteKey {
    pub fn new(month: impl Into<String>, day: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            day: day.into(),
        }
    }

    /// Lookup path, e.g. `/date/12/25`
    pub fn path(&self) -> String {
        format!("/date/{}/{}", self.month, self.day)
    }

    /// Human-readable label, e.g. `25 de dezembro`
    ///
    /// Empty when the month is not a number in 1..=12.
    pub fn date_label(&self) -> String {
        match month_name(&self.month) {
            Some(name) => format!("{} de {}", self.day, name),
            None => String::new(),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.day, self.month)
    }
}

/// Portuguese month name for a 1-based month number
pub fn month_name(month: &str) -> Option<&'static str> {
    let index: usize = month.trim().parse().ok()?;
    index.checked_sub(1).and_then(|i| MONTH_NAMES.get(i)).copied()
}
