use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use mailslot::config::Config;
use mailslot::db::MessageStorage;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        verify_url = %cfg.recaptcha_verify_url,
        verify_timeout_secs = cfg.verify_timeout_secs,
        session_ttl_secs = cfg.session_ttl_secs,
        insecure_cookie = cfg.insecure_cookie,
        public_dir = %cfg.public_dir.display(),
        "configuration loaded"
    );

    let storage = MessageStorage::connect(&cfg.database_url).await?;
    let addr = cfg.listen_addr.clone();

    let state = mailslot::RelayState::new(storage, cfg)?;
    let app = mailslot::relay_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
