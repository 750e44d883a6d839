//! triviaexam-server — axum front end for the exam grader.
//!
//! Serves the exam form, accepts submissions, and keeps each visitor's
//! graded result in an in-memory [`session::SessionStore`].

pub mod app;
pub mod config;
pub mod handlers;
pub mod session;
pub mod state;

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};

use triviaexam_core::{bank::load_bank, QuestionBank};

pub use app::build_app;
pub use config::ServerConfig;
pub use state::AppState;

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Load the configured bank and refuse to start if it fails its shape check.
pub fn load_checked_bank(config: &ServerConfig) -> Result<QuestionBank> {
    let bank = load_bank(config.bank_path.as_deref())?;
    let (ok, errors) = bank.validate_shape();
    if !ok {
        for e in &errors {
            error!("question bank: {e}");
        }
        anyhow::bail!("question bank has {} shape error(s)", errors.len());
    }
    Ok(bank)
}

/// Run the server until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let bank = load_checked_bank(&config)?;
    let addr = config.socket_addr()?;
    info!("loaded {} questions", bank.question_count());

    let state = AppState::new(bank, config);

    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired().await;
            if purged > 0 {
                tracing::debug!("purged {purged} expired session(s)");
            }
        }
    });

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
