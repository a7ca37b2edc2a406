#![allow(dead_code)]

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use axum::{
    Form, Json, Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use base64::Engine;
use mailslot::config::Config;
use mailslot::db::MessageStorage;
use serde_json::json;
use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

pub const CAPTCHA_SECRET: &str = "test-recaptcha-secret";
pub const HUMAN_TOKEN: &str = "human-token";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// How the stand-in verification service answers.
#[derive(Clone, Copy)]
pub enum VerifierMode {
    /// `success` is true only for the configured secret and [`HUMAN_TOKEN`].
    Checking,
    /// Sleeps before answering `success: true`.
    Slow(Duration),
    /// Answers with this status and a non-JSON body.
    Failing(StatusCode),
}

pub struct MockVerifier {
    pub url: Url,
    calls: Arc<AtomicUsize>,
}

impl MockVerifier {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub async fn spawn_verifier(mode: VerifierMode) -> MockVerifier {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let app = Router::new().route(
        "/siteverify",
        post(move |Form(params): Form<HashMap<String, String>>| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                match mode {
                    VerifierMode::Checking => {
                        let secret_ok =
                            params.get("secret").map(String::as_str) == Some(CAPTCHA_SECRET);
                        let token_ok =
                            params.get("response").map(String::as_str) == Some(HUMAN_TOKEN);
                        if secret_ok && token_ok {
                            Json(json!({"success": true, "hostname": "localhost"})).into_response()
                        } else {
                            Json(json!({
                                "success": false,
                                "error-codes": ["invalid-input-response"]
                            }))
                            .into_response()
                        }
                    }
                    VerifierMode::Slow(delay) => {
                        tokio::time::sleep(delay).await;
                        Json(json!({"success": true})).into_response()
                    }
                    VerifierMode::Failing(status) => (status, "upstream exploded").into_response(),
                }
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock verifier");
    let addr = listener.local_addr().expect("mock verifier addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockVerifier {
        url: Url::parse(&format!("http://{addr}/siteverify")).expect("mock verifier url"),
        calls,
    }
}

/// Argon2id with minimal cost so tests stay fast; verification reads the
/// parameters back out of the PHC string.
pub fn cheap_hash(password: &str) -> String {
    let params = Params::new(1024, 1, 1, None).expect("valid argon2 params");
    let salt = SaltString::generate(&mut OsRng);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .expect("hash password")
        .to_string()
}

pub struct TestApp {
    pub router: Router,
    pub storage: MessageStorage,
    pub verifier: MockVerifier,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
    }
}

pub async fn spawn_app(mode: VerifierMode) -> TestApp {
    spawn_app_with_timeout(mode, 10).await
}

pub async fn spawn_app_with_timeout(mode: VerifierMode, verify_timeout_secs: u64) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "mailslot-test-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    let database_url = format!("sqlite:{}", db_path.display());

    let verifier = spawn_verifier(mode).await;

    let cfg = Config {
        session_secret: base64::engine::general_purpose::STANDARD.encode([42u8; 64]),
        recaptcha_secret: CAPTCHA_SECRET.to_string(),
        recaptcha_site_key: "test-site-key".to_string(),
        admin_password_hash: cheap_hash(ADMIN_PASSWORD),
        database_url: database_url.clone(),
        recaptcha_verify_url: verifier.url.clone(),
        verify_timeout_secs,
        insecure_cookie: true,
        ..Config::default()
    };
    cfg.validate().expect("test config is valid");

    let storage = MessageStorage::connect(&database_url)
        .await
        .expect("open test database");
    let state = mailslot::RelayState::new(storage.clone(), cfg).expect("build state");

    TestApp {
        router: mailslot::relay_router(state),
        storage,
        verifier,
        db_path,
    }
}

impl TestApp {
    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        self.post_raw(uri, body, Some("application/x-www-form-urlencoded"), cookie)
            .await
    }

    /// POST `body` as is, with `content_type` only when given.
    pub async fn post_raw(
        &self,
        uri: &str,
        body: &str,
        content_type: Option<&str>,
        cookie: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(
                builder
                    .body(Body::from(body.to_string()))
                    .expect("failed to build request"),
            )
            .await
            .expect("request failed")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::empty()).expect("failed to build request"))
            .await
            .expect("request failed")
    }

    /// Log in with the right password and return the `name=value` cookie pair.
    pub async fn login(&self) -> String {
        let resp = self
            .post_form("/admin", &format!("password={}", form_encode(ADMIN_PASSWORD)), None)
            .await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        session_cookie(&resp).expect("login sets a session cookie")
    }
}

pub async fn body_string(resp: Response) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

pub fn location(resp: &Response) -> Option<&str> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Full `Set-Cookie` header for the session cookie, if one was issued.
pub fn session_set_cookie(resp: &Response) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{}=", mailslot::middleware::SESSION_COOKIE)))
        .map(str::to_string)
}

/// `name=value` pair suitable for a `Cookie` request header.
pub fn session_cookie(resp: &Response) -> Option<String> {
    session_set_cookie(resp)
        .and_then(|full| full.split(';').next().map(str::to_string))
}

pub fn form_encode(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('+', "%2B")
        .replace('&', "%26")
        .replace('=', "%3D")
        .replace(' ', "+")
}
