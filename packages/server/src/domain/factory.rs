//! ID / 秘密値の生成

use rand::Rng;
use uuid::Uuid;

use super::{AdminToken, RoomId, SessionId};

/// ルームコードの生成器
///
/// テストで衝突を再現できるよう trait にしている。
pub trait RoomIdGenerator: Send + Sync {
    fn generate(&self) -> RoomId;
}

/// 10000..=99999 の一様乱数からルームコードを作る
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRoomIdGenerator;

impl RoomIdGenerator for RandomRoomIdGenerator {
    fn generate(&self) -> RoomId {
        let n: u32 = rand::rng().random_range(10_000..=99_999);
        RoomId::new(n.to_string()).expect("five digit number is a valid room id")
    }
}

pub struct AdminTokenFactory;

impl AdminTokenFactory {
    pub fn generate() -> AdminToken {
        AdminToken::new(Uuid::new_v4().to_string())
    }
}

pub struct SessionIdFactory;

impl SessionIdFactory {
    pub fn generate() -> SessionId {
        SessionId::new(Uuid::new_v4().to_string()).expect("uuid is never empty")
    }
}
