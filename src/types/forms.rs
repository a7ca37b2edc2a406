use serde::Deserialize;

/// Body of `POST /send`.
#[derive(Debug, Default, Deserialize)]
pub struct SendForm {
    pub sender: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "g-recaptcha-response")]
    pub captcha: Option<String>,
}

impl SendForm {
    /// Sender and content, or `None` when either is absent or empty.
    pub fn required_fields(&self) -> Option<(String, String)> {
        let sender = self.sender.as_deref().filter(|s| !s.is_empty())?;
        let content = self.content.as_deref().filter(|s| !s.is_empty())?;
        Some((sender.to_string(), content.to_string()))
    }

    pub fn captcha_token(&self) -> &str {
        self.captcha.as_deref().unwrap_or_default()
    }
}

/// Body of `POST /admin`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub password: Option<String>,
}
