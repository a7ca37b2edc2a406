use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::captcha::RecaptchaVerifier;
use crate::config::Config;
use crate::db::MessageStorage;
use crate::error::RelayError;
use crate::handlers::{admin, inbox, pages, send};

/// Everything a request handler needs, handed in explicitly.
#[derive(Clone)]
pub struct RelayState {
    pub storage: MessageStorage,
    pub verifier: RecaptchaVerifier,
    pub config: Arc<Config>,
    key: Key,
}

impl RelayState {
    pub fn new(storage: MessageStorage, config: Config) -> Result<Self, RelayError> {
        let key = config.cookie_key()?;
        let verifier = RecaptchaVerifier::new(&config)?;
        Ok(Self {
            storage,
            verifier,
            config: Arc::new(config),
            key,
        })
    }

    pub fn key(&self) -> &Key {
        &self.key
    }
}

impl FromRef<RelayState> for Key {
    fn from_ref(state: &RelayState) -> Self {
        state.key.clone()
    }
}

pub fn relay_router(state: RelayState) -> Router {
    let assets = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route("/", get(pages::send_page))
        .route("/send", post(send::send_message))
        .route(
            "/admin",
            get(pages::admin_login_page).post(admin::admin_login),
        )
        .route("/inbox", get(inbox::inbox_page))
        .route("/inbox/messages", get(inbox::inbox_messages))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
