//! Room formatting utilities for client display.

use mitsumori_server::infrastructure::dto::http::{RoomViewConnectionDto, RoomViewDto};
use mitsumori_shared::time::timestamp_to_jst_clock_time;

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";
const SHORT_ID_LEN: usize = 8;

/// Room formatter for client display
pub struct RoomFormatter;

impl RoomFormatter {
    /// Format the whole room view
    ///
    /// # Arguments
    ///
    /// * `view` - The room view returned by the server
    /// * `fetched_at` - Unix timestamp when the view was fetched (milliseconds)
    pub fn format_room(view: &RoomViewDto, fetched_at: i64) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", RULE));

        let admin_suffix = if view.is_admin { " [admin]" } else { "" };
        output.push_str(&format!(
            "Room {} (card pack: {}){}\n",
            view.room_id, view.card_pack, admin_suffix
        ));
        output.push_str(&format!("Cards: {}\n", view.cards.join(" ")));
        output.push_str(&format!("Status: {}\n", Self::format_status(view)));
        output.push_str(&format!("{}\n", THIN_RULE));

        if view.connections.is_empty() {
            output.push_str("(No participants)\n");
        }
        for connection in &view.connections {
            output.push_str(&Self::format_connection(connection, view.revealed));
            output.push('\n');
        }

        output.push_str(&format!("{}\n", THIN_RULE));
        output.push_str(&format!("Average / SD: {}\n", Self::format_stats(view)));
        output.push_str(&format!(
            "fetched at {}\n",
            timestamp_to_jst_clock_time(fetched_at)
        ));
        output.push_str(&format!("{}\n", RULE));
        output
    }

    fn format_status(view: &RoomViewDto) -> String {
        let progress = format!("{}/{} voted", view.voted_count, view.voter_count);
        match (view.revealed, view.forced_reveal) {
            (true, true) => format!("revealed by admin ({})", progress),
            (true, false) => format!("revealed ({})", progress),
            (false, _) => format!("voting ({})", progress),
        }
    }

    /// 1 人分の行。公開前の他人の票は "X" で伏せる
    fn format_connection(connection: &RoomViewConnectionDto, revealed: bool) -> String {
        let face = match (&connection.vote, connection.has_voted, revealed) {
            (Some(vote), _, _) => vote.as_str(),
            (None, _, true) => "—",
            (None, true, false) => "X",
            (None, false, false) => "",
        };
        let role = if connection.voter { "voter" } else { "watch" };
        let me = if connection.is_self { " (me)" } else { "" };
        format!(
            "  {:<8}{:<6} {:<6} {}",
            short_id(&connection.session_id),
            me,
            role,
            face
        )
    }

    fn format_stats(view: &RoomViewDto) -> String {
        if !view.revealed {
            return "hidden until reveal".to_string();
        }
        match view.stats.and_then(|s| s.average.zip(s.standard_deviation)) {
            Some((average, sd)) => format!("{:.2} / {:.2}", average, sd),
            None => "—".to_string(),
        }
    }

    /// Format an error line from a background refresh
    pub fn format_error(message: &str) -> String {
        format!("\n! {}\n", message)
    }

    /// Format the command list
    pub fn format_help() -> String {
        [
            "Commands:",
            "  create            create a new room (you become its admin)",
            "  join <code>       enter the room with the given 5-digit code",
            "  vote <card>       vote with a card from the current pack",
            "  unvote            withdraw your vote",
            "  voter on|off      take part in voting or just watch",
            "  reveal            reveal all votes now (admin)",
            "  reset             start a new round (admin)",
            "  pack <id>         switch card pack: goat fib seq play tshirt (admin)",
            "  close             delete the room (admin)",
            "  show              fetch now and resume auto refresh",
            "  quit              leave the client",
        ]
        .join("\n")
            + "\n"
    }
}

fn short_id(session_id: &str) -> &str {
    match session_id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &session_id[..end],
        None => session_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mitsumori_server::infrastructure::dto::http::{MyConnectionDto, VoteStatsDto};

    fn connection(
        id: &str,
        vote: Option<&str>,
        has_voted: bool,
        is_self: bool,
    ) -> RoomViewConnectionDto {
        RoomViewConnectionDto {
            session_id: id.to_string(),
            voter: true,
            has_voted,
            vote: vote.map(str::to_string),
            is_self,
        }
    }

    fn view(revealed: bool, connections: Vec<RoomViewConnectionDto>) -> RoomViewDto {
        RoomViewDto {
            room_id: "48213".to_string(),
            card_pack: "seq".to_string(),
            cards: vec!["1".to_string(), "2".to_string(), "?".to_string()],
            forced_reveal: false,
            revealed,
            is_admin: true,
            voter_count: connections.len(),
            voted_count: connections.iter().filter(|c| c.has_voted).count(),
            connections,
            my: MyConnectionDto {
                session_id: "aaaaaaaa-1111".to_string(),
                voter: true,
                vote: Some("7".to_string()),
            },
            stats: revealed.then_some(VoteStatsDto {
                average: Some(7.0),
                standard_deviation: Some(0.0),
            }),
        }
    }

    #[test]
    fn test_hidden_votes_are_masked() {
        // テスト項目: 公開前は自分の票だけ見え、他人の投票済みは X
        // given (前提条件):
        let room = view(
            false,
            vec![
                connection("aaaaaaaa-1111", Some("7"), true, true),
                connection("bbbbbbbb-2222", None, true, false),
                connection("cccccccc-3333", None, false, false),
            ],
        );

        // when (操作):
        let output = RoomFormatter::format_room(&room, 0);

        // then (期待する結果):
        assert!(output.contains("Room 48213 (card pack: seq) [admin]"));
        assert!(output.contains("Status: voting (2/3 voted)"));
        assert!(output.contains("aaaaaaaa (me)  voter  7"));
        assert!(output.contains("bbbbbbbb       voter  X"));
        assert!(output.contains("hidden until reveal"));
        assert!(!output.contains("bbbbbbbb-2222"));
    }

    #[test]
    fn test_revealed_room_shows_stats() {
        // テスト項目: 公開後は平均と標準偏差を小数 2 桁で表示
        let room = view(true, vec![connection("aaaaaaaa-1111", Some("7"), true, true)]);

        let output = RoomFormatter::format_room(&room, 0);

        assert!(output.contains("Status: revealed (1/1 voted)"));
        assert!(output.contains("Average / SD: 7.00 / 0.00"));
    }

    #[test]
    fn test_short_id_handles_short_values() {
        // テスト項目: 8 文字未満の ID はそのまま
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("0123456789"), "01234567");
    }
}
