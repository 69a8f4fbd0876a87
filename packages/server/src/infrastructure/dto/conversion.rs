//! Conversion logic from domain views to DTOs.

use crate::domain::view;
use crate::infrastructure::dto::http as dto;

impl From<view::ConnectionView> for dto::RoomViewConnectionDto {
    fn from(model: view::ConnectionView) -> Self {
        Self {
            session_id: model.session_id.into_string(),
            voter: model.voter,
            has_voted: model.has_voted,
            vote: model.vote,
            is_self: model.is_self,
        }
    }
}

impl From<view::MyConnection> for dto::MyConnectionDto {
    fn from(model: view::MyConnection) -> Self {
        Self {
            session_id: model.session_id.into_string(),
            voter: model.voter,
            vote: model.vote,
        }
    }
}

impl From<view::VoteStats> for dto::VoteStatsDto {
    fn from(model: view::VoteStats) -> Self {
        Self {
            average: model.average,
            standard_deviation: model.standard_deviation,
        }
    }
}

impl From<view::RoomView> for dto::RoomViewDto {
    fn from(model: view::RoomView) -> Self {
        Self {
            room_id: model.room_id.into_string(),
            card_pack: model.card_pack.id().to_string(),
            cards: model.cards.into_iter().map(str::to_string).collect(),
            forced_reveal: model.forced_reveal,
            revealed: model.revealed,
            is_admin: model.is_admin,
            connections: model.connections.into_iter().map(Into::into).collect(),
            voter_count: model.voter_count,
            voted_count: model.voted_count,
            my: model.my.into(),
            stats: model.stats.map(Into::into),
        }
    }
}
