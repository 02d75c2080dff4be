//! # Client Configuration
//!
//! Where the backend lives, how long to wait for it, and how points accrue.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PUNTOS_API_BASE=http://192.168.2.90:8000                           │
//! │     PUNTOS_TIMEOUT_SECS=15                                             │
//! │     PUNTOS_ACCRUAL_BPS=100                                             │
//! │     PUNTOS_TOKEN_PATH=/var/lib/caja/token                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/puntos-caja/caja.toml (Linux)                            │
//! │     ~/Library/Application Support/com.puntos.caja/caja.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8000, 15 s timeout, 1% accrual                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://192.168.2.90:8000"
//! timeout_secs = 15
//!
//! [session]
//! persist_token = true
//!
//! [points]
//! accrual_bps = 100
//! ```

use puntos_core::AccrualRate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// API Settings
// =============================================================================

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Backend base URL; trailing slashes are ignored.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    15
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Session Settings
// =============================================================================

/// Where the cashier's bearer token is kept between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Keep the token on disk so a restart does not force a new login.
    #[serde(default = "default_true")]
    pub persist_token: bool,

    /// Token file; defaults to the platform data directory.
    #[serde(default)]
    pub token_path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            persist_token: true,
            token_path: None,
        }
    }
}

// =============================================================================
// Points Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsSettings {
    /// Accrual rate in basis points (100 = 1%).
    #[serde(default = "default_accrual_bps")]
    pub accrual_bps: u32,
}

fn default_accrual_bps() -> u32 {
    AccrualRate::STANDARD.bps()
}

impl Default for PointsSettings {
    fn default() -> Self {
        PointsSettings {
            accrual_bps: default_accrual_bps(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub points: PointsSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (caja.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                config = Self::read_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn read_file(path: &Path) -> ClientResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ClientError::LoadFailed {
            what: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::SaveFailed {
                what: "config".into(),
                reason: "no config path available".into(),
            })?;

        let save_err = |e: std::io::Error| ClientError::SaveFailed {
            what: path.display().to_string(),
            reason: e.to_string(),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(save_err)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(save_err)?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = url::Url::parse(self.base_url())?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.points.accrual_bps > 10_000 {
            return Err(ClientError::InvalidConfig(format!(
                "accrual_bps must be between 0 and 10000, got {}",
                self.points.accrual_bps
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("PUNTOS_API_BASE") {
            debug!(url = %url, "Overriding API base from environment");
            self.api.base_url = url;
        }

        if let Ok(timeout) = std::env::var("PUNTOS_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(t) => self.api.timeout_secs = t,
                Err(_) => warn!(value = %timeout, "Ignoring invalid PUNTOS_TIMEOUT_SECS"),
            }
        }

        if let Ok(bps) = std::env::var("PUNTOS_ACCRUAL_BPS") {
            match bps.parse::<u32>() {
                Ok(b) => self.points.accrual_bps = b,
                Err(_) => warn!(value = %bps, "Ignoring invalid PUNTOS_ACCRUAL_BPS"),
            }
        }

        if let Ok(path) = std::env::var("PUNTOS_TOKEN_PATH") {
            self.session.token_path = Some(PathBuf::from(path));
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "puntos", "caja")
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("caja.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn accrual_rate(&self) -> AccrualRate {
        AccrualRate::from_bps(self.points.accrual_bps)
    }

    /// Token file to use, or `None` when the token stays in memory only.
    pub fn token_path(&self) -> Option<PathBuf> {
        if !self.session.persist_token {
            return None;
        }
        self.session
            .token_path
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join("token")))
    }
}
