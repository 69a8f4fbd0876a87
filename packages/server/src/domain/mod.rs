//! ドメイン層
//!
//! ルーム状態・状態遷移・ビュー射影・ストアのインターフェースを定義します。
//! 外部クレートや I/O に依存するのは Repository trait の定義のみです。

pub mod card_pack;
pub mod entity;
pub mod error;
pub mod factory;
pub mod logic;
pub mod repository;
pub mod value_object;
pub mod view;

pub use card_pack::CardPack;
pub use entity::{RoomConnection, RoomState};
pub use error::{RepositoryError, RoomError, ValueObjectError};
pub use factory::{AdminTokenFactory, RandomRoomIdGenerator, RoomIdGenerator, SessionIdFactory};
pub use repository::RoomRepository;
pub use value_object::{AdminToken, RoomId, SessionId, Timestamp};
pub use view::{ConnectionView, MyConnection, RoomView, VoteStats};

#[cfg(test)]
pub use repository::MockRoomRepository;
