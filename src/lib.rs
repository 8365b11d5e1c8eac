//! deskdash library
//!
//! Exposes the cache, API client, refresh scheduler and dashboard loaders for
//! use by the binary and by integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod logging;
pub mod refresh;
pub mod ui;
