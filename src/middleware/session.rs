use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::handlers::found;
use crate::router::RelayState;

pub const SESSION_COOKIE: &str = "mailslot_session";
const ADMIN_PREFIX: &str = "admin:";

/// Per-browser session state. The only thing it records is whether the
/// caller has passed the admin password check.
///
/// Lives in a private (encrypted and authenticated) cookie holding the issue
/// time, so a forged, foreign-key or expired cookie reads as anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdminSession {
    issued_at: Option<DateTime<Utc>>,
}

impl AdminSession {
    /// Read the session carried by `jar`, treating anything unusable as anonymous.
    pub fn from_jar(jar: &PrivateCookieJar, ttl: Duration, now: DateTime<Utc>) -> Self {
        jar.get(SESSION_COOKIE)
            .map(|c| Self::from_cookie_value(c.value(), ttl, now))
            .unwrap_or_default()
    }

    fn from_cookie_value(value: &str, ttl: Duration, now: DateTime<Utc>) -> Self {
        let Some(issued_at) = value
            .strip_prefix(ADMIN_PREFIX)
            .and_then(|ts| ts.parse::<i64>().ok())
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
        else {
            return Self::default();
        };

        // negative age (issued in the future) fails `to_std`
        let fresh = (now - issued_at)
            .to_std()
            .map(|age| age < ttl)
            .unwrap_or(false);
        if !fresh {
            debug!(issued_at = %issued_at, "admin session expired");
            return Self::default();
        }
        Self {
            issued_at: Some(issued_at),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.issued_at.is_some()
    }

    /// Write an admin session issued at `now` into `jar`.
    pub fn grant(jar: PrivateCookieJar, now: DateTime<Utc>, cfg: &Config) -> PrivateCookieJar {
        let value = format!("{ADMIN_PREFIX}{}", now.timestamp());
        jar.add(build_cookie(value, cfg))
    }
}

fn build_cookie(value: String, cfg: &Config) -> Cookie<'static> {
    let max_age = i64::try_from(cfg.session_ttl_secs).unwrap_or(i64::MAX);
    Cookie::build(Cookie::new(SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(!cfg.insecure_cookie)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// Extractor guarding admin-only routes. Anonymous callers are redirected
/// to the login form.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<RelayState> for RequireAdmin {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &RelayState,
    ) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::from_headers(&parts.headers, state.key().clone());
        let session = AdminSession::from_jar(&jar, state.config.session_ttl(), Utc::now());
        if !session.is_admin() {
            debug!(path = %parts.uri.path(), "anonymous inbox access; redirecting");
            return Err(found("/admin"));
        }
        Ok(Self)
    }
}
