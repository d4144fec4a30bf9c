//! Application layer
//!
//! Navigation between home, results, details and favorites, driven by
//! `AppController`.

pub mod controller;
pub mod state;

pub use controller::AppController;
pub use state::{DetailPayload, DetailView, LookupState, Notice, Notifier, ResultsView, Route};
