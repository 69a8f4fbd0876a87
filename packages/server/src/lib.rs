//! Planning poker server: rooms with 5-digit codes, hidden votes and admin-only controls.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
