use crate::config::Config;
use crate::error::RelayError;
use crate::types::siteverify::{SiteVerifyResponse, Verdict};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for the `siteverify` endpoint. One call per submission, no retries.
#[derive(Clone)]
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    verify_url: Url,
    secret: Arc<str>,
}

impl RecaptchaVerifier {
    /// Build a verifier with the configured secret, endpoint and timeout.
    pub fn new(cfg: &Config) -> Result<Self, RelayError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .user_agent(concat!("mailslot/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(cfg.verify_timeout())
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            verify_url: cfg.recaptcha_verify_url.clone(),
            secret: Arc::from(cfg.recaptcha_secret.as_str()),
        })
    }

    /// Ask the verification service whether `token` was solved by a human.
    ///
    /// An empty token is forwarded as is; the service answers it with
    /// `missing-input-response`. A timeout yields [`Verdict::TimedOut`]. Other transport failures, non-2xx
    /// statuses and unparseable bodies are returned as errors.
    pub async fn verify(&self, token: &str) -> Result<Verdict, RelayError> {
        let resp = match self
            .client
            .post(self.verify_url.clone())
            .form(&[("secret", &*self.secret), ("response", token)])
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) if e.is_timeout() => {
                debug!(error = %e, "siteverify request timed out");
                return Ok(Verdict::TimedOut);
            }
            Err(e) => return Err(e.into()),
        };

        let status = resp.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamStatus(status));
        }

        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => {
                debug!(error = %e, "siteverify body timed out");
                return Ok(Verdict::TimedOut);
            }
            Err(e) => return Err(e.into()),
        };
        let parsed: SiteVerifyResponse = serde_json::from_slice(&body)?;
        debug!(
            success = parsed.success,
            hostname = parsed.hostname.as_deref().unwrap_or("-"),
            "captcha verification answered"
        );
        Ok(parsed.into())
    }
}
