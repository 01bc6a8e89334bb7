use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const API_KEY_NAME: &str = "GOOGLE_API_KEY";

/// Longest idle lifetime a session may be configured with (30 days).
pub const MAX_SESSION_TTL_MINUTES: i64 = 30 * 24 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub session: SessionConfig,
    pub secrets_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ttl: chrono::Duration,
    pub reap_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                static_dir: PathBuf::from("static"),
                max_upload_bytes: 512 * 1024,
            },
            gateway: GatewayConfig {
                api_base: "https://generativelanguage.googleapis.com".to_string(),
                model: "gemini-2.0-flash".to_string(),
                timeout: Duration::from_secs(30),
            },
            session: SessionConfig {
                ttl: chrono::Duration::minutes(60),
                reap_interval: Duration::from_secs(60),
            },
            secrets_file: PathBuf::from(".secrets/secrets.toml"),
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Failed to parse {}", name)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let timeout_secs: u64 = parse_var("GATEWAY_TIMEOUT_SECONDS", defaults.gateway.timeout.as_secs())?;
        let ttl_minutes: i64 = parse_var("SESSION_TTL_MINUTES", defaults.session.ttl.num_minutes())?;
        let max_upload_kb: usize = parse_var("MAX_UPLOAD_SIZE_KB", defaults.server.max_upload_bytes / 1024)?;

        if timeout_secs == 0 {
            anyhow::bail!("GATEWAY_TIMEOUT_SECONDS must be greater than zero");
        }
        let ttl = session_ttl(ttl_minutes)?;

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or(defaults.server.host),
                port: parse_var("PORT", defaults.server.port)?,
                static_dir: env::var("STATIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.server.static_dir),
                max_upload_bytes: max_upload_kb * 1024,
            },
            gateway: GatewayConfig {
                api_base: env::var("GEMINI_API_BASE").unwrap_or(defaults.gateway.api_base),
                model: env::var("GEMINI_MODEL").unwrap_or(defaults.gateway.model),
                timeout: Duration::from_secs(timeout_secs),
            },
            session: SessionConfig {
                ttl,
                reap_interval: defaults.session.reap_interval,
            },
            secrets_file: env::var("SECRETS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.secrets_file),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn session_ttl(minutes: i64) -> Result<chrono::Duration> {
    if minutes <= 0 {
        anyhow::bail!("SESSION_TTL_MINUTES must be greater than zero");
    }
    if minutes > MAX_SESSION_TTL_MINUTES {
        anyhow::bail!(
            "SESSION_TTL_MINUTES must be at most {} (got {})",
            MAX_SESSION_TTL_MINUTES,
            minutes
        );
    }
    Ok(chrono::Duration::minutes(minutes))
}

// ---- Credential Resolution ----

#[derive(Debug, Error)]
#[error("No API key found! Set {} in {} or in the environment.", API_KEY_NAME, .secrets_file.display())]
pub struct CredentialMissing {
    pub secrets_file: PathBuf,
}

#[derive(Deserialize)]
struct SecretsFile {
    #[serde(rename = "GOOGLE_API_KEY")]
    google_api_key: Option<String>,
}

fn read_secrets_file(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    match toml::from_str::<SecretsFile>(&raw) {
        Ok(secrets) => secrets.google_api_key,
        Err(e) => {
            tracing::warn!("Ignoring unreadable secrets file {}: {}", path.display(), e);
            None
        }
    }
}

/// Looks up the model API key in the secrets file first, then through
/// `env_lookup`. Blank values count as missing.
pub fn resolve_api_key(
    secrets_file: &Path,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, CredentialMissing> {
    read_secrets_file(secrets_file)
        .filter(|key| !key.trim().is_empty())
        .or_else(|| env_lookup(API_KEY_NAME).filter(|key| !key.trim().is_empty()))
        .map(|key| key.trim().to_string())
        .ok_or_else(|| CredentialMissing {
            secrets_file: secrets_file.to_path_buf(),
        })
}
