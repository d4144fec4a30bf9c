//! Data persistence
//!
//! Handles favorites, settings, and the key-value stores behind them.

pub mod favorites;
pub mod settings;
pub mod storage;
pub mod types;

// Re-export common types
pub use favorites::FavoritesStore;
pub use settings::Settings;
pub use storage::{config_dir, data_path, FileStore, KeyValueStore, MemoryStore};
pub use types::{same_event, Category, FavoriteRecord, HistoryData, HistoryEvent};
