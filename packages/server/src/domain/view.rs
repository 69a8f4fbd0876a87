//! リクエスト元ごとのルームビュー
//!
//! `RoomState` から、公開前は他人の票を隠したビューを導出する。
//! ビュー型は管理者トークンのフィールドを持たないため、秘密値が漏れることはない。

use super::{
    CardPack, RoomConnection, RoomId, RoomState, SessionId, logic::compute_voting_finished,
};

/// 参加者一覧の 1 エントリ（公開状態に応じて票を隠す）
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionView {
    pub session_id: SessionId,
    pub voter: bool,
    /// 票の有無（公開前でも分かる）
    pub has_voted: bool,
    /// 公開済み、または本人の場合のみ値が入る
    pub vote: Option<String>,
    pub is_self: bool,
}

/// リクエスト元自身のエントリ（フィルタなし）
#[derive(Debug, Clone, PartialEq)]
pub struct MyConnection {
    pub session_id: SessionId,
    pub voter: bool,
    pub vote: Option<String>,
}

/// 公開後の数値票の統計
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoteStats {
    pub average: Option<f64>,
    pub standard_deviation: Option<f64>,
}

/// ルームビュー
#[derive(Debug, Clone, PartialEq)]
pub struct RoomView {
    pub room_id: RoomId,
    pub card_pack: CardPack,
    pub cards: Vec<&'static str>,
    pub forced_reveal: bool,
    pub revealed: bool,
    pub is_admin: bool,
    pub connections: Vec<ConnectionView>,
    pub voter_count: usize,
    pub voted_count: usize,
    pub my: MyConnection,
    /// 公開済みの場合のみ
    pub stats: Option<VoteStats>,
}

/// `room` を `session_id` から見たビューに射影する
pub fn project(room: &RoomState, session_id: &SessionId, is_admin: bool) -> RoomView {
    let revealed = compute_voting_finished(room);

    let mut ordered: Vec<&RoomConnection> = room.connections.values().collect();
    ordered.sort_by(|a, b| {
        a.joined_at
            .cmp(&b.joined_at)
            .then_with(|| a.session_id.cmp(&b.session_id))
    });

    let connections = ordered
        .into_iter()
        .map(|c| {
            let is_self = &c.session_id == session_id;
            ConnectionView {
                session_id: c.session_id.clone(),
                voter: c.voter,
                has_voted: c.has_vote(),
                vote: if revealed || is_self {
                    c.vote.clone()
                } else {
                    None
                },
                is_self,
            }
        })
        .collect();

    let voter_count = room.voters().count();
    let voted_count = room.voters().filter(|c| c.has_vote()).count();

    let my = match room.connection(session_id) {
        Some(c) => MyConnection {
            session_id: c.session_id.clone(),
            voter: c.voter,
            vote: c.vote.clone(),
        },
        None => MyConnection {
            session_id: session_id.clone(),
            voter: true,
            vote: None,
        },
    };

    RoomView {
        room_id: room.room_id.clone(),
        card_pack: room.card_pack,
        cards: room.card_pack.tokens().to_vec(),
        forced_reveal: room.forced_reveal,
        revealed,
        is_admin,
        connections,
        voter_count,
        voted_count,
        my,
        stats: revealed.then(|| compute_stats(room)),
    }
}

/// 投票者の数値票の平均と母標準偏差
///
/// 数値として解釈できない票（"?", "☕", "XL" など）は除外する。
pub fn compute_stats(room: &RoomState) -> VoteStats {
    let numbers: Vec<f64> = room
        .voters()
        .filter_map(|c| c.vote.as_deref())
        .filter_map(|v| v.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .collect();

    if numbers.is_empty() {
        return VoteStats {
            average: None,
            standard_deviation: None,
        };
    }

    let len = numbers.len() as f64;
    let average = numbers.iter().sum::<f64>() / len;
    let variance = numbers.iter().map(|x| (x - average).powi(2)).sum::<f64>() / len;

    VoteStats {
        average: Some(average),
        standard_deviation: Some(variance.sqrt()),
    }
}
