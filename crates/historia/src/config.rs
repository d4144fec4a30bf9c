//! Configuration constants for historia

/// Application metadata
pub mod app {
    /// Application name (used for config directory, etc.)
    pub const NAME: &str = "historia";

    /// Display name used in shared text
    pub const DISPLAY_NAME: &str = "História";
}

/// Durable storage configuration
pub mod storage {
    /// Key of the favorites entry in the key-value store
    pub const FAVORITES_KEY: &str = "historyFavorites";

    /// Settings file name inside the config directory
    pub const SETTINGS_FILE: &str = "settings.json";
}

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("historia/", env!("CARGO_PKG_VERSION"));

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Read timeout in seconds
    pub const READ_TIMEOUT_SECS: u64 = 30;
}

/// Lookup service configuration
pub mod lookup {
    /// Default day-of-year history API server
    pub const DEFAULT_SERVER: &str = "https://history.muffinlabs.com";

    /// Sample dates offered on the home view
    pub const EXAMPLE_DATES: [&str; 4] = ["25/12", "01/01", "15/04", "07/09"];
}
