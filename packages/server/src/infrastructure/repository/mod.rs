//! Repository 実装
//!
//! - `inmemory`: プロセス内の HashMap（Upstash 未設定時のフォールバック）
//! - `upstash`: Upstash Redis REST API

pub mod inmemory;
pub mod upstash;

pub use inmemory::InMemoryRoomRepository;
pub use upstash::{UpstashRoomRepository, room_key};
