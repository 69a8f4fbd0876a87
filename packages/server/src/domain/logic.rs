//! ルーム状態遷移
//!
//! 全ての関数は `&RoomState` を受け取り新しいスナップショットを返す純粋関数。
//! 入力を書き換えることはない。
//!
//! 管理者権限のチェックはここでは行わない。`reveal` / `reset` /
//! `change_card_pack` を誰が呼べるかは UseCase 層が判断する。

use std::borrow::Cow;

use super::{CardPack, RoomConnection, RoomError, RoomState, SessionId, Timestamp};

/// セッションを参加者として登録する
///
/// 既に登録済みなら `Cow::Borrowed` で入力をそのまま返す。
/// 呼び出し側は `Cow::Owned` のときだけ保存すればよい。
pub fn ensure_connection<'a>(
    room: &'a RoomState,
    session_id: &SessionId,
    now: Timestamp,
) -> Cow<'a, RoomState> {
    if room.connections.contains_key(session_id) {
        return Cow::Borrowed(room);
    }

    let mut next = room.clone();
    next.updated_at = now;
    next.connections.insert(
        session_id.clone(),
        RoomConnection::new(session_id.clone(), now),
    );
    Cow::Owned(next)
}

/// 投票が終了しているか（= 公開状態か）
///
/// 強制公開されていれば true。そうでなければ投票者が 1 人以上いて
/// 全員が空でない票を持っている場合のみ true。投票者 0 人のルームは
/// 強制公開以外では終了しない。
pub fn compute_voting_finished(room: &RoomState) -> bool {
    if room.forced_reveal {
        return true;
    }
    let mut voters = room.voters().peekable();
    if voters.peek().is_none() {
        return false;
    }
    voters.all(RoomConnection::has_vote)
}

/// 票を投じる
///
/// # Errors
///
/// * `RoomError::NotAVoter` - 投票者でない（未登録のセッションも含む）
/// * `RoomError::AlreadyFinished` - 既に公開済み
/// * `RoomError::InvalidToken` - アクティブなパックに存在しない票
pub fn cast_vote(
    room: &RoomState,
    session_id: &SessionId,
    token: &str,
    now: Timestamp,
) -> Result<RoomState, RoomError> {
    let is_voter = room.connection(session_id).is_some_and(|c| c.voter);
    if !is_voter {
        return Err(RoomError::NotAVoter);
    }
    if compute_voting_finished(room) {
        return Err(RoomError::AlreadyFinished);
    }
    if !room.card_pack.contains(token) {
        return Err(RoomError::InvalidToken(token.to_string()));
    }

    Ok(update_connection(room, session_id, now, |conn| {
        conn.vote = Some(token.to_string());
    }))
}

/// 自分の票を取り消す
///
/// # Errors
///
/// * `RoomError::AlreadyFinished` - 既に公開済み
pub fn clear_vote(
    room: &RoomState,
    session_id: &SessionId,
    now: Timestamp,
) -> Result<RoomState, RoomError> {
    if compute_voting_finished(room) {
        return Err(RoomError::AlreadyFinished);
    }
    Ok(update_connection(room, session_id, now, |conn| {
        conn.vote = None;
    }))
}

/// 投票者フラグを切り替える
///
/// 公開後も変更できる。既存の票は消さない。
pub fn set_voter_flag(
    room: &RoomState,
    session_id: &SessionId,
    voter: bool,
    now: Timestamp,
) -> RoomState {
    update_connection(room, session_id, now, |conn| {
        conn.voter = voter;
    })
}

/// 強制公開（管理者のみ）
pub fn reveal(room: &RoomState, now: Timestamp) -> RoomState {
    let mut next = room.clone();
    next.forced_reveal = true;
    next.updated_at = now;
    next
}

/// 新しいラウンドを開始する（管理者のみ）
///
/// 全員の票を消して公開状態を解除する。参加者・パック・投票者フラグは維持。
pub fn reset(room: &RoomState, now: Timestamp) -> RoomState {
    let mut next = clear_all_votes(room, now);
    next.forced_reveal = false;
    next
}

/// カードパックを切り替える（管理者のみ）
///
/// 旧パックの票は新パックで有効とは限らないため、全員の票を消す。
///
/// # Errors
///
/// * `RoomError::InvalidCardPack` - 未知のパック ID
pub fn change_card_pack(
    room: &RoomState,
    pack_id: &str,
    now: Timestamp,
) -> Result<RoomState, RoomError> {
    let pack: CardPack = pack_id.parse()?;
    let mut next = clear_all_votes(room, now);
    next.card_pack = pack;
    next.forced_reveal = false;
    Ok(next)
}

fn clear_all_votes(room: &RoomState, now: Timestamp) -> RoomState {
    let mut next = room.clone();
    next.updated_at = now;
    for conn in next.connections.values_mut() {
        conn.vote = None;
        conn.updated_at = now;
    }
    next
}

/// 1 人分の参加者を更新した新しいスナップショットを返す
///
/// 未登録のセッションなら参加者を補ってから更新する。
fn update_connection(
    room: &RoomState,
    session_id: &SessionId,
    now: Timestamp,
    apply: impl FnOnce(&mut RoomConnection),
) -> RoomState {
    let mut next = room.clone();
    next.updated_at = now;
    let conn = next
        .connections
        .entry(session_id.clone())
        .or_insert_with(|| RoomConnection::new(session_id.clone(), now));
    apply(conn);
    conn.updated_at = now;
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AdminToken, RoomId};

    // ========================================
    // 【何をテストするか】
    // - 各状態遷移が新しいスナップショットを返し、入力を変更しないこと
    // - 投票終了判定（投票者 0 人、全員投票済み、強制公開）
    // - 投票・取消・リセット・パック変更のエラーと副作用
    // ========================================

    fn sid(s: &str) -> SessionId {
        SessionId::new(s.to_string()).unwrap()
    }

    fn empty_room() -> RoomState {
        RoomState::new(
            RoomId::new("48213".to_string()).unwrap(),
            AdminToken::new("admin-secret".to_string()),
            Timestamp::new(1_000),
        )
    }

    fn room_with(sessions: &[&str]) -> RoomState {
        let mut room = empty_room();
        for (i, s) in sessions.iter().enumerate() {
            room = ensure_connection(&room, &sid(s), Timestamp::new(1_000 + i as i64))
                .into_owned();
        }
        room
    }

    #[test]
    fn test_ensure_connection_registers_new_session_as_voter() {
        // テスト項目: 未登録のセッションは投票者・未投票として追加される
        // given (前提条件):
        let room = empty_room();

        // when (操作):
        let result = ensure_connection(&room, &sid("alice"), Timestamp::new(2_000));

        // then (期待する結果):
        assert!(matches!(result, Cow::Owned(_)));
        let next = result.into_owned();
        let conn = next.connection(&sid("alice")).unwrap();
        assert!(conn.voter);
        assert_eq!(conn.vote, None);
        assert_eq!(conn.joined_at, Timestamp::new(2_000));
        assert_eq!(conn.updated_at, Timestamp::new(2_000));
        assert_eq!(next.updated_at, Timestamp::new(2_000));
        assert!(room.connections.is_empty());
    }

    #[test]
    fn test_ensure_connection_is_identity_for_known_session() {
        // テスト項目: 登録済みのセッションでは入力をそのまま返す
        // given (前提条件):
        let room = room_with(&["alice"]);

        // when (操作):
        let result = ensure_connection(&room, &sid("alice"), Timestamp::new(9_000));

        // then (期待する結果):
        assert!(matches!(result, Cow::Borrowed(r) if std::ptr::eq(r, &room)));
    }

    #[test]
    fn test_zero_voters_never_finish_without_forced_reveal() {
        // テスト項目: 投票者 0 人のルームは強制公開以外で終了しない
        // given (前提条件):
        let empty = empty_room();
        let watchers_only = set_voter_flag(
            &room_with(&["alice"]),
            &sid("alice"),
            false,
            Timestamp::new(2_000),
        );

        // when / then:
        assert!(!compute_voting_finished(&empty));
        assert!(!compute_voting_finished(&watchers_only));
        assert!(compute_voting_finished(&reveal(&empty, Timestamp::new(3_000))));
    }

    #[test]
    fn test_voting_finishes_when_every_voter_has_voted() {
        // テスト項目: 全投票者が投票すると終了し、非投票者は判定に含まれない
        // given (前提条件):
        let room = room_with(&["alice", "bob", "carol"]);
        let room = set_voter_flag(&room, &sid("carol"), false, Timestamp::new(2_000));
        let room = cast_vote(&room, &sid("alice"), "3", Timestamp::new(2_100)).unwrap();
        assert!(!compute_voting_finished(&room));

        // when (操作):
        let room = cast_vote(&room, &sid("bob"), "5", Timestamp::new(2_200)).unwrap();

        // then (期待する結果):
        assert!(compute_voting_finished(&room));
    }

    #[test]
    fn test_empty_string_vote_does_not_count() {
        // テスト項目: 空文字の票は投票済みとみなさない
        // given (前提条件):
        let mut room = room_with(&["alice"]);
        room.connections.get_mut(&sid("alice")).unwrap().vote = Some(String::new());

        // when / then:
        assert!(!compute_voting_finished(&room));
    }

    #[test]
    fn test_cast_vote_by_non_voter_fails_without_mutation() {
        // テスト項目: 非投票者の投票は NotAVoter になり、状態は変わらない
        // given (前提条件):
        let room = set_voter_flag(
            &room_with(&["alice"]),
            &sid("alice"),
            false,
            Timestamp::new(2_000),
        );
        let before = room.clone();

        // when (操作):
        let result = cast_vote(&room, &sid("alice"), "5", Timestamp::new(3_000));

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::NotAVoter));
        assert_eq!(room, before);
    }

    #[test]
    fn test_cast_vote_by_unregistered_session_is_not_a_voter() {
        // テスト項目: 未登録セッションの投票は NotAVoter になる
        let room = empty_room();
        let result = cast_vote(&room, &sid("ghost"), "5", Timestamp::new(3_000));
        assert_eq!(result, Err(RoomError::NotAVoter));
    }

    #[test]
    fn test_cast_vote_after_finish_fails() {
        // テスト項目: 公開後の投票は AlreadyFinished になる
        // given (前提条件):
        let room = reveal(&room_with(&["alice"]), Timestamp::new(2_000));

        // when (操作):
        let result = cast_vote(&room, &sid("alice"), "5", Timestamp::new(3_000));

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::AlreadyFinished));
    }

    #[test]
    fn test_cast_vote_with_token_outside_pack_fails() {
        // テスト項目: パックにない票は InvalidToken になる
        // given (前提条件):
        let room = room_with(&["alice"]);

        // when (操作):
        let result = cast_vote(&room, &sid("alice"), "XL", Timestamp::new(3_000));

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::InvalidToken("XL".to_string())));
    }

    #[test]
    fn test_cast_vote_sets_vote_and_bumps_timestamps() {
        // テスト項目: 投票すると票と更新時刻が設定される
        // given (前提条件):
        let room = room_with(&["alice", "bob"]);

        // when (操作):
        let next = cast_vote(&room, &sid("alice"), "½", Timestamp::new(5_000)).unwrap();

        // then (期待する結果):
        let alice = next.connection(&sid("alice")).unwrap();
        assert_eq!(alice.vote.as_deref(), Some("½"));
        assert_eq!(alice.updated_at, Timestamp::new(5_000));
        assert_eq!(next.updated_at, Timestamp::new(5_000));
        assert_eq!(room.connection(&sid("alice")).unwrap().vote, None);
        assert_eq!(next.connection(&sid("bob")), room.connection(&sid("bob")));
    }

    #[test]
    fn test_clear_vote_only_affects_own_session() {
        // テスト項目: 票の取消は自分の票だけを消す
        // given (前提条件):
        let room = room_with(&["alice", "bob", "carol"]);
        let room = cast_vote(&room, &sid("alice"), "3", Timestamp::new(2_000)).unwrap();
        let room = cast_vote(&room, &sid("bob"), "8", Timestamp::new(2_100)).unwrap();

        // when (操作):
        let next = clear_vote(&room, &sid("alice"), Timestamp::new(3_000)).unwrap();

        // then (期待する結果):
        assert_eq!(next.connection(&sid("alice")).unwrap().vote, None);
        assert_eq!(next.connection(&sid("bob")).unwrap().vote.as_deref(), Some("8"));
    }

    #[test]
    fn test_clear_vote_after_finish_fails() {
        // テスト項目: 公開後の取消は AlreadyFinished になる
        // given (前提条件):
        let room = room_with(&["alice"]);
        let room = cast_vote(&room, &sid("alice"), "3", Timestamp::new(2_000)).unwrap();

        // when (操作):
        let result = clear_vote(&room, &sid("alice"), Timestamp::new(3_000));

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::AlreadyFinished));
    }

    #[test]
    fn test_set_voter_flag_keeps_existing_vote_and_works_after_reveal() {
        // テスト項目: 投票者フラグの変更は公開後も可能で、票は保持される
        // given (前提条件):
        let room = room_with(&["alice", "bob"]);
        let room = cast_vote(&room, &sid("alice"), "3", Timestamp::new(2_000)).unwrap();
        let room = reveal(&room, Timestamp::new(2_500));

        // when (操作):
        let next = set_voter_flag(&room, &sid("alice"), false, Timestamp::new(3_000));

        // then (期待する結果):
        let alice = next.connection(&sid("alice")).unwrap();
        assert!(!alice.voter);
        assert_eq!(alice.vote.as_deref(), Some("3"));
        assert!(next.forced_reveal);
    }

    #[test]
    fn test_reveal_keeps_votes() {
        // テスト項目: 強制公開は票を変更しない
        // given (前提条件):
        let room = room_with(&["alice", "bob"]);
        let room = cast_vote(&room, &sid("alice"), "3", Timestamp::new(2_000)).unwrap();

        // when (操作):
        let next = reveal(&room, Timestamp::new(3_000));

        // then (期待する結果):
        assert!(next.forced_reveal);
        assert_eq!(next.connections, room.connections);
    }

    #[test]
    fn test_reset_clears_votes_and_keeps_membership() {
        // テスト項目: リセット後は全員の票が消え、投票者フラグと参加時刻は維持される
        // given (前提条件):
        let room = room_with(&["alice", "bob", "carol"]);
        let room = set_voter_flag(&room, &sid("carol"), false, Timestamp::new(1_500));
        let room = cast_vote(&room, &sid("alice"), "3", Timestamp::new(2_000)).unwrap();
        let room = cast_vote(&room, &sid("bob"), "5", Timestamp::new(2_100)).unwrap();
        let room = reveal(&room, Timestamp::new(2_200));

        // when (操作):
        let next = reset(&room, Timestamp::new(3_000));

        // then (期待する結果):
        assert!(!next.forced_reveal);
        assert_eq!(next.card_pack, room.card_pack);
        assert_eq!(next.connections.len(), 3);
        for (id, conn) in &next.connections {
            let before = room.connection(id).unwrap();
            assert_eq!(conn.vote, None);
            assert_eq!(conn.voter, before.voter);
            assert_eq!(conn.joined_at, before.joined_at);
        }
        assert!(!compute_voting_finished(&next));
    }

    #[test]
    fn test_change_card_pack_clears_votes_and_invalidates_old_tokens() {
        // テスト項目: パック変更で票が消え、旧パックにしかない票は InvalidToken になる
        // given (前提条件):
        let room = room_with(&["alice", "bob"]);
        let room = cast_vote(&room, &sid("alice"), "☕", Timestamp::new(2_000)).unwrap();
        let room = reveal(&room, Timestamp::new(2_100));

        // when (操作):
        let next = change_card_pack(&room, "seq", Timestamp::new(3_000)).unwrap();

        // then (期待する結果):
        assert_eq!(next.card_pack, CardPack::Seq);
        assert!(!next.forced_reveal);
        assert!(next.connections.values().all(|c| c.vote.is_none()));
        let retry = cast_vote(&next, &sid("alice"), "☕", Timestamp::new(3_100));
        assert_eq!(retry, Err(RoomError::InvalidToken("☕".to_string())));
    }

    #[test]
    fn test_change_card_pack_rejects_unknown_pack() {
        // テスト項目: 未知のパック ID は InvalidCardPack になる
        let room = room_with(&["alice"]);
        let result = change_card_pack(&room, "uno", Timestamp::new(3_000));
        assert_eq!(result, Err(RoomError::InvalidCardPack("uno".to_string())));
    }
}
