use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use chrono::Utc;
use tracing::{info, warn};

use crate::error::RelayError;
use crate::handlers::found;
use crate::middleware::AdminSession;
use crate::router::RelayState;
use crate::service::password::verify_password;
use crate::types::forms::LoginForm;

/// POST /admin -> check the password and open an admin session.
pub async fn admin_login(
    State(state): State<RelayState>,
    jar: PrivateCookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, RelayError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(%rejection, "admin login rejected; unreadable form");
            return Err(RelayError::LoginRejected);
        }
    };
    let password = form.password.unwrap_or_default();
    let hash = state.config.admin_password_hash.clone();

    // argon2 is CPU-bound; run it on the blocking pool
    let matched = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;
    if !matched {
        warn!("admin login rejected");
        return Err(RelayError::LoginRejected);
    }

    let jar = AdminSession::grant(jar, Utc::now(), &state.config);
    info!("admin session opened");
    Ok((jar, found("/inbox")).into_response())
}
