// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod ai;
pub mod app;
pub mod config;
pub mod espn;
pub mod league;
pub mod protocol;
pub mod scoring;
pub mod session;
pub mod store;
pub mod tui;
