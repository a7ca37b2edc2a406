use crate::error::RelayError;
use crate::service::password;
use axum_extra::extract::cookie::Key;
use base64::Engine;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Environment variables read into [`Config`]. Anything else in the
/// environment is ignored.
const ENV_KEYS: &[&str] = &[
    "SESSION_SECRET",
    "RECAPTCHA_SECRET",
    "RECAPTCHA_SITE_KEY",
    "ADMIN_PASSWORD_HASH",
    "DATABASE_URL",
    "LISTEN_ADDR",
    "LOGLEVEL",
    "RECAPTCHA_VERIFY_URL",
    "VERIFY_TIMEOUT_SECS",
    "SESSION_TTL_SECS",
    "INSECURE_COOKIE",
    "PUBLIC_DIR",
];

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base64 of at least 64 random bytes; signs and encrypts the session cookie.
    pub session_secret: String,
    pub recaptcha_secret: String,
    pub recaptcha_site_key: String,
    /// Argon2 PHC string the admin password is checked against.
    pub admin_password_hash: String,
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub recaptcha_verify_url: Url,
    pub verify_timeout_secs: u64,
    pub session_ttl_secs: u64,
    /// Drop the `Secure` cookie attribute so sessions work over plain HTTP.
    pub insecure_cookie: bool,
    pub public_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            recaptcha_secret: String::new(),
            recaptcha_site_key: String::new(),
            admin_password_hash: String::new(),
            database_url: "sqlite://database.db".to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            loglevel: "info".to_string(),
            recaptcha_verify_url: Url::parse(RECAPTCHA_VERIFY_URL)
                .expect("built-in verify url is valid"),
            verify_timeout_secs: 10,
            session_ttl_secs: 24 * 60 * 60,
            insecure_cookie: false,
            public_dir: PathBuf::from("public"),
        }
    }
}

impl Config {
    /// Load from the process environment on top of the built-in defaults.
    pub fn from_env() -> Result<Self, RelayError> {
        let cfg: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(ENV_KEYS))
            .extract()
            .map_err(|e| RelayError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the server cannot run with.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.recaptcha_secret.trim().is_empty() {
            return Err(RelayError::Config("RECAPTCHA_SECRET is not set".to_string()));
        }
        if self.admin_password_hash.trim().is_empty() {
            return Err(RelayError::Config(
                "ADMIN_PASSWORD_HASH is not set".to_string(),
            ));
        }
        password::ensure_valid_hash(&self.admin_password_hash)?;
        if self.session_ttl_secs == 0 {
            return Err(RelayError::Config(
                "SESSION_TTL_SECS must be greater than zero".to_string(),
            ));
        }
        self.cookie_key()?;
        Ok(())
    }

    /// Cookie key derived from `SESSION_SECRET`.
    pub fn cookie_key(&self) -> Result<Key, RelayError> {
        if self.session_secret.trim().is_empty() {
            return Err(RelayError::Config("SESSION_SECRET is not set".to_string()));
        }
        let raw = base64::engine::general_purpose::STANDARD
            .decode(self.session_secret.trim())
            .map_err(|e| RelayError::Config(format!("SESSION_SECRET is not base64: {e}")))?;
        Key::try_from(raw.as_slice()).map_err(|_| {
            RelayError::Config("SESSION_SECRET must decode to at least 64 bytes".to_string())
        })
    }

    pub fn verify_timeout(&self) -> Duration {
        Duration::from_secs(self.verify_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}
