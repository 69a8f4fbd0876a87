//! Cookie によるセッション ID・管理者トークンの受け渡し
//!
//! セッション Cookie は初回リクエストで発行し、以降は値をそのまま使う。
//! 管理者 Cookie はルーム作成時にだけ発行する。

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::{
    config::CookieSettings,
    domain::{AdminToken, RoomId, SessionId, SessionIdFactory},
};

pub const SESSION_COOKIE: &str = "pp_session";
const ADMIN_COOKIE_PREFIX: &str = "pp_admin_";
const COOKIE_MAX_AGE_DAYS: i64 = 365;

pub fn admin_cookie_name(room_id: &str) -> String {
    format!("{}{}", ADMIN_COOKIE_PREFIX, room_id)
}

/// セッション ID を取り出す。なければ発行して Cookie に追加する
pub fn resolve_session(jar: CookieJar, settings: CookieSettings) -> (CookieJar, SessionId) {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::new(cookie.value().to_string()).ok());
    if let Some(session_id) = existing {
        return (jar, session_id);
    }

    let session_id = SessionIdFactory::generate();
    let jar = jar.add(build_cookie(
        SESSION_COOKIE.to_string(),
        session_id.as_str().to_string(),
        settings,
    ));
    tracing::debug!("Issued a new session");
    (jar, session_id)
}

/// リクエストが提示したルームの管理者トークン
pub fn presented_admin_token(jar: &CookieJar, room_id: &str) -> Option<String> {
    jar.get(&admin_cookie_name(room_id))
        .map(|cookie| cookie.value().to_string())
}

pub fn grant_admin(
    jar: CookieJar,
    room_id: &RoomId,
    admin_token: &AdminToken,
    settings: CookieSettings,
) -> CookieJar {
    jar.add(build_cookie(
        admin_cookie_name(room_id.as_str()),
        admin_token.as_str().to_string(),
        settings,
    ))
}

fn build_cookie(name: String, value: String, settings: CookieSettings) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::days(COOKIE_MAX_AGE_DAYS))
        .secure(settings.secure)
        .build()
}
