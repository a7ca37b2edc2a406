pub mod admin;
pub mod inbox;
pub mod pages;
pub mod send;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// `302 Found` to `location`. `axum::response::Redirect` only offers 303/307/308.
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Escape text for use in HTML element content and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
