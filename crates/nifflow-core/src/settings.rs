use crate::error::{ConnectorError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const TIMEOUT_ENV: &str = "NIFFLOW_TIMEOUT_SECS";
pub const USER_AGENT_ENV: &str = "NIFFLOW_USER_AGENT";
pub const CONNECTORS_DIR_ENV: &str = "NIFFLOW_CONNECTORS_DIR";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Engine-wide settings shared by every connector instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Per-request timeout enforced by the transport.
    pub timeout: Duration,
    pub user_agent: String,
    /// Directory of additional YAML connector definitions.
    pub connectors_dir: Option<PathBuf>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
            connectors_dir: None,
        }
    }
}

fn default_user_agent() -> String {
    format!("nifflow/{}", env!("CARGO_PKG_VERSION"))
}

impl EngineSettings {
    /// Reads settings from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ConnectorError::Config(format!("{} must be a whole number, got '{}'", TIMEOUT_ENV, raw))
            })?;
            if secs == 0 {
                return Err(ConnectorError::Config(format!(
                    "{} must be greater than zero",
                    TIMEOUT_ENV
                )));
            }
            settings.timeout = Duration::from_secs(secs);
        }

        if let Some(agent) = lookup(USER_AGENT_ENV).filter(|v| !v.trim().is_empty()) {
            settings.user_agent = agent;
        }

        settings.connectors_dir = lookup(CONNECTORS_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(settings)
    }
}
