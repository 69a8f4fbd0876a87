//! REPL commands.

use crate::error::ClientError;

/// 1 行の入力を解釈したコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 新しいルームを作成して入る
    Create,
    /// 既存のルームに入る
    Join(String),
    Vote(String),
    Unvote,
    /// 投票者になる / 見学者になる
    Voter(bool),
    Reveal,
    Reset,
    Pack(String),
    /// 即時に取得して表示し、止まっていたポーリングを再開する
    Show,
    Close,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ClientError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ClientError::InvalidCommand("empty command".to_string()));
        };
        let argument = words.next();
        if words.next().is_some() {
            return Err(ClientError::InvalidCommand(format!(
                "too many arguments for '{}'",
                name
            )));
        }

        let command = match (name.to_lowercase().as_str(), argument) {
            ("create", None) => Self::Create,
            ("join", Some(room_id)) => Self::Join(room_id.to_string()),
            ("vote" | "v", Some(vote)) => Self::Vote(vote.to_string()),
            ("unvote", None) => Self::Unvote,
            ("voter", Some(flag)) => Self::Voter(parse_flag(flag)?),
            ("reveal", None) => Self::Reveal,
            ("reset", None) => Self::Reset,
            ("pack", Some(pack)) => Self::Pack(pack.to_string()),
            ("show" | "refresh", None) => Self::Show,
            ("close", None) => Self::Close,
            ("help" | "?", None) => Self::Help,
            ("quit" | "exit", None) => Self::Quit,
            _ => {
                return Err(ClientError::InvalidCommand(format!(
                    "unknown command '{}' (type 'help')",
                    line.trim()
                )));
            }
        };
        Ok(command)
    }

    /// ルームに入っている必要があるか
    pub fn needs_room(&self) -> bool {
        !matches!(
            self,
            Self::Create | Self::Join(_) | Self::Help | Self::Quit
        )
    }
}

fn parse_flag(flag: &str) -> Result<bool, ClientError> {
    match flag.to_lowercase().as_str() {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        _ => Err(ClientError::InvalidCommand(format!(
            "expected 'on' or 'off', got '{}'",
            flag
        ))),
    }
}
