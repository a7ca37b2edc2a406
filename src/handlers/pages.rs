use axum::extract::State;
use axum::response::Html;

use crate::handlers::html_escape;
use crate::router::RelayState;

const SEND_PAGE: &str = include_str!("../../views/send.html");
const ADMIN_LOGIN_PAGE: &str = include_str!("../../views/admin-login.html");

const SITE_KEY_SLOT: &str = "{{site_key}}";

/// GET / -> public send form.
pub async fn send_page(State(state): State<RelayState>) -> Html<String> {
    Html(render_send_page(&state.config.recaptcha_site_key))
}

/// GET /admin -> admin login form.
pub async fn admin_login_page() -> Html<&'static str> {
    Html(ADMIN_LOGIN_PAGE)
}

fn render_send_page(site_key: &str) -> String {
    SEND_PAGE.replace(SITE_KEY_SLOT, &html_escape(site_key))
}
