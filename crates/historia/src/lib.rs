//! História
//!
//! Day-of-year history lookups, a local favorites store, and the
//! navigation controller the front ends drive.

pub mod app;
pub mod config;
pub mod data;
pub mod date;
pub mod error;
pub mod network;
pub mod providers;
pub mod share;
