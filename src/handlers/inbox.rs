use axum::{Json, extract::State, response::Html};
use std::fmt::Write;

use crate::db::DbMessage;
use crate::error::RelayError;
use crate::handlers::html_escape;
use crate::middleware::RequireAdmin;
use crate::router::RelayState;

const INBOX_PAGE: &str = include_str!("../../views/admin-inbox.html");
const MESSAGES_SLOT: &str = "<!-- messages -->";

/// GET /inbox -> every stored message, newest first.
pub async fn inbox_page(
    _admin: RequireAdmin,
    State(state): State<RelayState>,
) -> Result<Html<String>, RelayError> {
    let messages = state.storage.list_all().await?;
    Ok(Html(render_inbox(&messages)))
}

/// GET /inbox/messages -> the same list as JSON, oldest first.
pub async fn inbox_messages(
    _admin: RequireAdmin,
    State(state): State<RelayState>,
) -> Result<Json<Vec<DbMessage>>, RelayError> {
    Ok(Json(state.storage.list_all().await?))
}

fn render_inbox(messages: &[DbMessage]) -> String {
    let mut rows = String::new();
    if messages.is_empty() {
        rows.push_str(r#"<p class="empty">No messages yet.</p>"#);
    }
    for msg in messages.iter().rev() {
        let _ = write!(
            rows,
            r#"<article class="message" id="message-{id}"><header><strong class="sender">{sender}</strong> <time datetime="{created}">{shown}</time></header><p class="content">{content}</p></article>"#,
            id = msg.id,
            sender = html_escape(&msg.sender),
            created = msg.created.to_rfc3339(),
            shown = msg.created.format("%Y-%m-%d %H:%M UTC"),
            content = html_escape(&msg.content),
        );
    }
    INBOX_PAGE.replace(MESSAGES_SLOT, &rows)
}
