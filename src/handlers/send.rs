use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, info, warn};

use crate::db::NewMessage;
use crate::error::RelayError;
use crate::router::RelayState;
use crate::types::forms::SendForm;
use crate::types::siteverify::Verdict;

pub const DELIVERED_BODY: &str = "Message delivered successfully!";

/// POST /send -> verify the captcha, then store the message.
///
/// A body that does not decode as a form counts as a submission with no
/// fields at all.
pub async fn send_message(
    State(state): State<RelayState>,
    form: Result<Form<SendForm>, FormRejection>,
) -> Result<Response, RelayError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(%rejection, "unreadable send form");
            return Err(RelayError::MissingFields);
        }
    };
    let Some((sender, content)) = form.required_fields() else {
        return Err(RelayError::MissingFields);
    };

    match state.verifier.verify(form.captcha_token()).await? {
        Verdict::Human => {}
        Verdict::Rejected(error_codes) => {
            warn!(?error_codes, "captcha rejected; message dropped");
            return Err(RelayError::CaptchaFailed);
        }
        Verdict::TimedOut => {
            warn!("captcha verification timed out; message dropped");
            return Err(RelayError::CaptchaFailed);
        }
    }

    let stored = state
        .storage
        .insert(NewMessage { sender, content })
        .await?;
    info!(id = stored.id, "message stored");

    Ok((StatusCode::OK, DELIVERED_BODY).into_response())
}
