//! The `triviaexam serve` command.

use std::path::PathBuf;

use anyhow::Result;

use triviaexam_server::config::load_config_from;

pub async fn execute(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    bank: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;

    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(bank) = bank {
        config.bank_path = Some(bank);
    }

    triviaexam_server::serve(config).await
}
