//! UseCase 層
//!
//! 各ユースケースはリポジトリと時計を受け取り、
//! 「検証 → 読み込み → 状態遷移 → 保存 → ビュー射影」を行う。

mod cast_vote;
mod change_card_pack;
mod clear_vote;
mod close_room;
mod create_room;
pub mod error;
mod get_room_view;
mod reset_room;
mod reveal;
mod room_access;
mod set_voter;
#[cfg(test)]
pub(crate) mod test_support;

pub use cast_vote::CastVoteUseCase;
pub use change_card_pack::ChangeCardPackUseCase;
pub use clear_vote::ClearVoteUseCase;
pub use close_room::CloseRoomUseCase;
pub use create_room::{CreateRoomUseCase, CreatedRoom, MAX_ROOM_ID_ATTEMPTS};
pub use error::RoomUseCaseError;
pub use get_room_view::GetRoomViewUseCase;
pub use reset_room::ResetRoomUseCase;
pub use reveal::RevealUseCase;
pub use room_access::is_admin;
pub use set_voter::SetVoterUseCase;
