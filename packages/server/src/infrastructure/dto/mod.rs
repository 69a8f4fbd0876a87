//! Data Transfer Objects (DTOs) for the planning poker HTTP API.
//!
//! - `http`: HTTP API request / response DTOs
//! - `conversion`: Domain Model → DTO 変換

pub mod conversion;
pub mod http;
