//! Shared application state.

use std::sync::Arc;

use mitsumori_shared::time::Clock;

use crate::{
    config::CookieSettings,
    domain::{RoomIdGenerator, RoomRepository},
    usecase::{
        CastVoteUseCase, ChangeCardPackUseCase, ClearVoteUseCase, CloseRoomUseCase,
        CreateRoomUseCase, GetRoomViewUseCase, ResetRoomUseCase, RevealUseCase, SetVoterUseCase,
    },
};

/// ハンドラから参照するユースケース一式
pub struct AppState {
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub get_room_view_usecase: Arc<GetRoomViewUseCase>,
    pub cast_vote_usecase: Arc<CastVoteUseCase>,
    pub clear_vote_usecase: Arc<ClearVoteUseCase>,
    pub set_voter_usecase: Arc<SetVoterUseCase>,
    pub reveal_usecase: Arc<RevealUseCase>,
    pub reset_room_usecase: Arc<ResetRoomUseCase>,
    pub change_card_pack_usecase: Arc<ChangeCardPackUseCase>,
    pub close_room_usecase: Arc<CloseRoomUseCase>,
    /// 発行する Cookie の属性
    pub cookies: CookieSettings,
}

impl AppState {
    /// 1 つのリポジトリと時計を共有するユースケースを組み立てる
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        clock: Arc<dyn Clock>,
        id_generator: Arc<dyn RoomIdGenerator>,
        cookies: CookieSettings,
    ) -> Self {
        Self {
            create_room_usecase: Arc::new(CreateRoomUseCase::new(
                repository.clone(),
                clock.clone(),
                id_generator,
            )),
            get_room_view_usecase: Arc::new(GetRoomViewUseCase::new(
                repository.clone(),
                clock.clone(),
            )),
            cast_vote_usecase: Arc::new(CastVoteUseCase::new(repository.clone(), clock.clone())),
            clear_vote_usecase: Arc::new(ClearVoteUseCase::new(repository.clone(), clock.clone())),
            set_voter_usecase: Arc::new(SetVoterUseCase::new(repository.clone(), clock.clone())),
            reveal_usecase: Arc::new(RevealUseCase::new(repository.clone(), clock.clone())),
            reset_room_usecase: Arc::new(ResetRoomUseCase::new(repository.clone(), clock.clone())),
            change_card_pack_usecase: Arc::new(ChangeCardPackUseCase::new(
                repository.clone(),
                clock.clone(),
            )),
            close_room_usecase: Arc::new(CloseRoomUseCase::new(repository, clock)),
            cookies,
        }
    }
}
