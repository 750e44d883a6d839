//! Server configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level triviaexam server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Seconds a visitor's stored result survives without activity.
    #[serde(default = "default_session_lifetime")]
    pub session_lifetime_secs: u64,
    /// Mark the session cookie `Secure` (serve over HTTPS only).
    #[serde(default)]
    pub cookie_secure: bool,
    /// Question bank TOML file. The built-in bank is used when unset.
    #[serde(default)]
    pub bank_path: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_session_lifetime() -> u64 {
    1800
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_lifetime_secs: default_session_lifetime(),
            cookie_secure: false,
            bank_path: None,
        }
    }
}

impl ServerConfig {
    /// The socket address built from `host` and `port`.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address: {}:{}", self.host, self.port))
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `triviaexam.toml` in the current directory
/// 2. `~/.config/triviaexam/config.toml`
///
/// Environment variable overrides: `TRIVIAEXAM_HOST`, `TRIVIAEXAM_PORT`,
/// `TRIVIAEXAM_COOKIE_SECURE`, `TRIVIAEXAM_BANK`.
pub fn load_config() -> Result<ServerConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ServerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("triviaexam.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => ServerConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse a TOML config string, resolving `${VAR}` references.
pub fn parse_config_str(content: &str) -> Result<ServerConfig> {
    let mut config: ServerConfig = toml::from_str(content)?;
    config.host = resolve_env_vars(&config.host);
    config.bank_path = config
        .bank_path
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));
    Ok(config)
}

fn apply_env_overrides(config: &mut ServerConfig) -> Result<()> {
    if let Ok(host) = std::env::var("TRIVIAEXAM_HOST") {
        config.host = host;
    }
    if let Ok(port) = std::env::var("TRIVIAEXAM_PORT") {
        config.port = port
            .parse()
            .with_context(|| format!("TRIVIAEXAM_PORT is not a valid port: {port}"))?;
    }
    if let Ok(secure) = std::env::var("TRIVIAEXAM_COOKIE_SECURE") {
        config.cookie_secure = secure.eq_ignore_ascii_case("true");
    }
    if let Ok(bank) = std::env::var("TRIVIAEXAM_BANK") {
        config.bank_path = Some(PathBuf::from(bank));
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("triviaexam"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_TRIVIAEXAM_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_TRIVIAEXAM_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_TRIVIAEXAM_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_TRIVIAEXAM_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.session_lifetime_secs, 1800);
        assert!(!config.cookie_secure);
        assert!(config.bank_path.is_none());
        assert_eq!(config.socket_addr().unwrap().port(), 5000);
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config_str(
            r#"
port = 8080
cookie_secure = true
bank_path = "banks/nfl.toml"
"#,
        )
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.cookie_secure);
        assert_eq!(config.bank_path, Some(PathBuf::from("banks/nfl.toml")));
    }

    #[test]
    fn parse_rejects_bad_types() {
        assert!(parse_config_str("port = \"eighty\"").is_err());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triviaexam.toml");
        std::fs::write(&path, "session_lifetime_secs = 60\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.session_lifetime_secs, 60);
    }

    #[test]
    fn invalid_host_is_reported() {
        let config = ServerConfig {
            host: "not a host".into(),
            ..Default::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
