//! History lookup providers
//!
//! Sources of historical facts for a given day (Muffin Labs "Today in History").

pub mod muffinlabs;
pub mod traits;

// Re-exports
pub use muffinlabs::MuffinLabsClient;
pub use traits::HistoryLookupClient;
