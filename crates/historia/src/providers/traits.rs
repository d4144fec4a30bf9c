//! Lookup provider trait
//!
//! Defines the interface a day-of-year history source must implement.

use crate::data::types::HistoryData;
use crate::error::Result;

/// A source of historical facts for a day of the year
///
/// `fetch` is a single request: no retry and no caching. Any failure
/// (transport or non-success status) is reported as one error and no
/// partial data is returned.
pub trait HistoryLookupClient: Send + Sync {
    /// Display name for the provider (e.g., "Muffin Labs")
    fn name(&self) -> &'static str;

    /// Fetch events, deaths and births for a month/day pair
    ///
    /// Segments are passed through unpadded, exactly as the user typed them.
    fn fetch(&self, month: &str, day: &str) -> Result<HistoryData>;
}
