//! prpulse service binary.
//!
//! - Webhook intake: POST /webhook (signature-checked)
//! - Dashboard API: GET /stats, POST /submit-reviewers, POST /check-reminders
//! - Background reminder sweep on a fixed interval

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use prpulse_service::{app_state, config, github, router, scheduler};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("prpulse.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let token = std::env::var("GITHUB_TOKEN").expect("GITHUB_TOKEN must be set");
    let webhook_secret = std::env::var("WEBHOOK_SECRET").expect("WEBHOOK_SECRET must be set");

    let gh = Arc::new(github::HttpGitHub::new(cfg.github.api_base.clone(), token));
    let state = app_state::AppState::new(cfg, gh, webhook_secret.into_bytes());

    scheduler::spawn_reminder_loop(state.clone());

    let app = router::build_router(state);

    tracing::info!(%listen, "prpulse-service starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
