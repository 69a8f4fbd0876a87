//! Terminal client for the planning poker server.

pub mod api;
pub mod command;
pub mod error;
pub mod formatter;
mod poller;
mod runner;
mod session;
mod ui;

pub use runner::{StartRoom, run_client};
