mod room;

pub use room::{UpstashRoomRepository, room_key};
