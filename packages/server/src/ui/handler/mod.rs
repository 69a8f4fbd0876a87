//! HTTP handlers.

mod http;
mod session;

pub use http::{
    cast_vote, change_card_pack, clear_vote, close_room, create_room, get_room, health_check,
    reset_room, reveal, toggle_voter,
};
