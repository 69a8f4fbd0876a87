//! サーバー設定
//!
//! コマンドライン引数と環境変数（clap の `env`）から設定を組み立てる。

use std::time::Duration;

use clap::Parser;

/// ルーム TTL の既定値（2 時間）
pub const DEFAULT_ROOM_TTL_SECONDS: u64 = 60 * 60 * 2;
/// ルーム TTL の下限（5 分）
pub const MIN_ROOM_TTL_SECONDS: u64 = 60 * 5;
/// ルーム TTL の上限（30 日）
pub const MAX_ROOM_TTL_SECONDS: u64 = 60 * 60 * 24 * 30;

#[derive(Parser, Debug, Clone)]
#[command(name = "mitsumori-server")]
#[command(about = "Planning poker room server", long_about = None)]
pub struct ServerArgs {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "PP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PP_PORT", default_value = "8080")]
    pub port: u16,

    /// Room lifetime in seconds (300..=2592000, falls back to 7200)
    #[arg(long, env = "PP_ROOM_TTL_SECONDS")]
    pub room_ttl_seconds: Option<String>,

    /// Upstash Redis REST endpoint; in-memory store is used when unset
    #[arg(long, env = "UPSTASH_REDIS_REST_URL")]
    pub upstash_url: Option<String>,

    /// Upstash Redis REST token
    #[arg(long, env = "UPSTASH_REDIS_REST_TOKEN", hide_env_values = true)]
    pub upstash_token: Option<String>,

    /// Mark session and admin cookies as Secure (use behind HTTPS)
    #[arg(long, env = "PP_SECURE_COOKIES")]
    pub secure_cookies: bool,
}

/// ルームの有効期限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomTtl(Duration);

impl RoomTtl {
    /// 生の設定値から TTL を解釈する
    ///
    /// 未設定・数値でない・範囲外の場合は既定値（2 時間）を使う。
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match raw.trim().parse::<u64>() {
            Ok(secs) if (MIN_ROOM_TTL_SECONDS..=MAX_ROOM_TTL_SECONDS).contains(&secs) => {
                Self(Duration::from_secs(secs))
            }
            _ => {
                tracing::warn!(
                    "Ignoring room TTL {:?} (expected {}..={} seconds), using {}",
                    raw,
                    MIN_ROOM_TTL_SECONDS,
                    MAX_ROOM_TTL_SECONDS,
                    DEFAULT_ROOM_TTL_SECONDS
                );
                Self::default()
            }
        }
    }

    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }

    pub fn as_millis(&self) -> i64 {
        self.0.as_millis() as i64
    }
}

impl Default for RoomTtl {
    fn default() -> Self {
        Self(Duration::from_secs(DEFAULT_ROOM_TTL_SECONDS))
    }
}

/// ストアのバックエンド選択
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Upstash { url: String, token: String },
}

/// Cookie の属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CookieSettings {
    pub secure: bool,
}

/// 解決済みのサーバー設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub room_ttl: RoomTtl,
    pub store: StoreBackend,
    pub cookies: CookieSettings,
}

impl ServerConfig {
    pub fn from_args(args: ServerArgs) -> Self {
        let store = match (args.upstash_url, args.upstash_token) {
            (Some(url), Some(token)) if !url.is_empty() && !token.is_empty() => {
                StoreBackend::Upstash { url, token }
            }
            _ => StoreBackend::InMemory,
        };

        Self {
            host: args.host,
            port: args.port,
            room_ttl: RoomTtl::from_raw(args.room_ttl_seconds.as_deref()),
            store,
            cookies: CookieSettings {
                secure: args.secure_cookies,
            },
        }
    }
}
