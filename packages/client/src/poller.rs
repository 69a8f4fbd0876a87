//! Background room polling.
//!
//! 1 秒ごとにルームを取得し、内容が変わったときだけ表示する。
//! ルームが存在しない・コードが不正のときは自動取得を止め、
//! `show` やルーム変更で表示し直されるまで待つ。

use std::{sync::Arc, time::Duration};

use mitsumori_server::infrastructure::dto::http::RoomViewDto;
use mitsumori_shared::time::get_unix_timestamp_millis;
use tokio::{sync::Mutex, task::JoinHandle, time::MissedTickBehavior};

use crate::{api::PokerApiClient, error::ClientError, formatter::RoomFormatter, ui};

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// 1 回の取得結果に対する表示判断
#[derive(Debug, PartialEq)]
pub(crate) enum PollOutcome {
    /// 前回から変化したので表示する
    Changed,
    Unchanged,
    /// 一時的な失敗（次の周期で再試行）
    Failed(String),
    /// 自動取得を止める
    Paused(String),
}

/// 対象ルームと最後に表示したビュー
///
/// REPL とポーリングタスクで共有し、REPL が表示したビューを二重に表示しない。
#[derive(Debug, Default)]
pub(crate) struct PollState {
    room_id: Option<String>,
    last_view: Option<RoomViewDto>,
    last_error: Option<String>,
    paused: bool,
}

impl PollState {
    /// 自動取得の対象（停止中・ルーム外なら None）
    pub(crate) fn target(&self) -> Option<&str> {
        if self.paused {
            return None;
        }
        self.room_id.as_deref()
    }

    /// 表示済みのビューを記録し、そのルームの自動取得を再開する
    pub(crate) fn shown(&mut self, room_id: &str, view: &RoomViewDto) {
        self.room_id = Some(room_id.to_string());
        self.last_view = Some(view.clone());
        self.last_error = None;
        self.paused = false;
    }

    pub(crate) fn leave(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn observe(&mut self, result: Result<&RoomViewDto, &ClientError>) -> PollOutcome {
        match result {
            Ok(view) => {
                self.last_error = None;
                if self.last_view.as_ref() == Some(view) {
                    PollOutcome::Unchanged
                } else {
                    self.last_view = Some(view.clone());
                    PollOutcome::Changed
                }
            }
            Err(e) if e.stops_polling() => {
                self.paused = true;
                self.last_view = None;
                PollOutcome::Paused(e.to_string())
            }
            Err(e) => {
                let message = e.to_string();
                // 同じエラーを毎秒表示しない
                if self.last_error.as_deref() == Some(message.as_str()) {
                    PollOutcome::Unchanged
                } else {
                    self.last_error = Some(message.clone());
                    PollOutcome::Failed(message)
                }
            }
        }
    }
}

/// ポーリングタスクを起動する
pub(crate) fn spawn_poller(
    api: Arc<PokerApiClient>,
    state: Arc<Mutex<PollState>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(POLL_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let Some(room_id) = state.lock().await.target().map(str::to_string) else {
                continue;
            };

            let result = api.get_room(&room_id).await;

            let outcome = {
                let mut state = state.lock().await;
                // 取得中にルームが変わったら結果を捨てる
                if state.target() != Some(room_id.as_str()) {
                    continue;
                }
                state.observe(result.as_ref())
            };

            match (outcome, &result) {
                (PollOutcome::Changed, Ok(view)) => {
                    print!(
                        "{}",
                        RoomFormatter::format_room(view, get_unix_timestamp_millis())
                    );
                    ui::redisplay_prompt();
                }
                (PollOutcome::Failed(message), _) => {
                    tracing::warn!("Failed to refresh room {}: {}", room_id, message);
                }
                (PollOutcome::Paused(message), _) => {
                    print!(
                        "{}",
                        RoomFormatter::format_error(&format!(
                            "{} Auto refresh paused; type 'show' to retry.",
                            message
                        ))
                    );
                    ui::redisplay_prompt();
                }
                _ => {}
            }
        }
    })
}
