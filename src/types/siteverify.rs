use serde::Deserialize;

/// JSON body returned by the reCAPTCHA `siteverify` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteVerifyResponse {
    pub success: bool,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub challenge_ts: Option<String>,
}

/// Outcome of one verification round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Human,
    Rejected(Vec<String>),
    /// The service did not answer within the configured timeout.
    TimedOut,
}

impl From<SiteVerifyResponse> for Verdict {
    fn from(value: SiteVerifyResponse) -> Self {
        if value.success {
            Verdict::Human
        } else {
            Verdict::Rejected(value.error_codes)
        }
    }
}
