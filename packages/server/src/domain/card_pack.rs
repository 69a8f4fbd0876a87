//! カードパック定義
//!
//! パック ID から投票可能なトークン列への静的な対応表。
//! トークンの並び順は表示用であり、バリデーションには影響しない。

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::RoomError;

const FIB: &[&str] = &["0", "1", "2", "3", "5", "8", "13", "21", "34", "55", "89", "?"];
const GOAT: &[&str] = &[
    "0", "½", "1", "2", "3", "5", "8", "13", "20", "40", "100", "?", "☕",
];
const SEQ: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "?"];
const PLAY: &[&str] = &["A♠", "2", "3", "5", "8", "♔"];
const TSHIRT: &[&str] = &["XL", "L", "M", "S", "XS", "?"];

/// カードパック
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardPack {
    /// Mountain Goat 拡張フィボナッチ（½ とコーヒーカップ付き）
    #[default]
    Goat,
    Fib,
    Seq,
    Play,
    Tshirt,
}

impl CardPack {
    pub const ALL: [CardPack; 5] = [
        CardPack::Goat,
        CardPack::Fib,
        CardPack::Seq,
        CardPack::Play,
        CardPack::Tshirt,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            CardPack::Goat => "goat",
            CardPack::Fib => "fib",
            CardPack::Seq => "seq",
            CardPack::Play => "play",
            CardPack::Tshirt => "tshirt",
        }
    }

    /// パックの票トークン（表示順）
    pub fn tokens(&self) -> &'static [&'static str] {
        match self {
            CardPack::Goat => GOAT,
            CardPack::Fib => FIB,
            CardPack::Seq => SEQ,
            CardPack::Play => PLAY,
            CardPack::Tshirt => TSHIRT,
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens().contains(&token)
    }
}

impl FromStr for CardPack {
    type Err = RoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardPack::ALL
            .into_iter()
            .find(|pack| pack.id() == s)
            .ok_or_else(|| RoomError::InvalidCardPack(s.to_string()))
    }
}

impl fmt::Display for CardPack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// パック ID から票トークン列を引く。未知の ID なら空。
pub fn tokens_for(pack_id: &str) -> &'static [&'static str] {
    pack_id.parse::<CardPack>().map(|p| p.tokens()).unwrap_or(&[])
}
