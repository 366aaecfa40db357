//! Xano endpoint configuration
//!
//! Every endpoint resolves with the same precedence:
//! explicit per-resource URL > `<base>/<path>` > built-in default base.
//! Within each level, command-line flags and environment variables win over
//! the optional `config.toml`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::constants;

// =============================================================================
// File-based Configuration (config.toml)
// =============================================================================

/// Configuration loaded from config.toml
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub xano: EndpointConfig,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse {}. Expected an optional [xano] section with \
                 base, revenue_url, kpi_url, cost_url and timeout_secs.",
                path.display()
            )
        })
    }
}

/// Unresolved endpoint settings; any field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointConfig {
    /// Xano API group base URL
    #[serde(default)]
    pub base: Option<String>,
    /// Full revenue endpoint URL (overrides base)
    #[serde(default)]
    pub revenue_url: Option<String>,
    /// Full KPI summary endpoint URL (overrides base)
    #[serde(default)]
    pub kpi_url: Option<String>,
    /// Full cost configuration endpoint URL (overrides base)
    #[serde(default)]
    pub cost_url: Option<String>,
    /// Request timeout; unset means requests never time out
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl EndpointConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            base: get("XANO_BASE"),
            revenue_url: get("XANO_REVENUE_URL"),
            kpi_url: get("XANO_KPI_URL"),
            cost_url: get("XANO_COST_URL"),
            timeout_secs: get("XANO_TIMEOUT_SECS").and_then(|v| v.parse().ok()),
        }
    }

    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: EndpointConfig) -> Self {
        Self {
            base: self.base.or(fallback.base),
            revenue_url: self.revenue_url.or(fallback.revenue_url),
            kpi_url: self.kpi_url.or(fallback.kpi_url),
            cost_url: self.cost_url.or(fallback.cost_url),
            timeout_secs: self.timeout_secs.or(fallback.timeout_secs),
        }
    }

    /// Resolve into concrete endpoint URLs.
    pub fn resolve(&self) -> Endpoints {
        let base = self
            .base
            .as_deref()
            .unwrap_or(constants::DEFAULT_XANO_BASE)
            .trim_end_matches('/');
        let derive = |explicit: &Option<String>, path: &str| {
            explicit.clone().unwrap_or_else(|| format!("{}/{}", base, path))
        };

        Endpoints {
            revenue: derive(&self.revenue_url, constants::REVENUE_PATH),
            kpis: derive(&self.kpi_url, constants::KPI_PATH),
            costs: derive(&self.cost_url, constants::COST_PATH),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Resolved endpoint URLs
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    /// Revenue streams (the scenario is appended as a query parameter)
    pub revenue: String,
    /// KPI summary
    pub kpis: String,
    /// Cost configuration
    pub costs: String,
    /// Per-request timeout
    pub timeout: Option<Duration>,
}

impl Endpoints {
    /// Environment first, then the config file at `config_path` if it exists.
    pub fn from_env_and_file(config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) if path.exists() => FileConfig::load(path)?.xano,
            _ => EndpointConfig::default(),
        };
        Ok(EndpointConfig::from_env().or(file).resolve())
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        EndpointConfig::default().resolve()
    }
}
