//! Mitsumori 共有ライブラリ
//!
//! サーバーとクライアントの両方から使うロガー初期化と時刻ユーティリティ。

pub mod logger;
pub mod time;
