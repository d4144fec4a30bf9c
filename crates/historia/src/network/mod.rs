//! Network operations
//!
//! HTTP client shared by the lookup providers.

pub mod client;

pub use client::HttpClient;
