//! Configuration Management
//!
//! Defaults, overlaid by an optional config file (YAML or JSON), then by
//! environment variables. CLI flags are applied last by `main`.

use crate::api::ReadinessPolicy;
use crate::seed::catalog::{default_tenants, TenantSpec};
use crate::seed::WarehouseLayout;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

pub const ENV_API_URL: &str = "INVENTREE_API_URL";
/// Older name for the base URL, honoured when `INVENTREE_API_URL` is unset
pub const ENV_API_BASE: &str = "INVENTREE_API_BASE";
pub const ENV_ADMIN_USER: &str = "INVENTREE_ADMIN_USER";
pub const ENV_ADMIN_PASSWORD: &str = "INVENTREE_ADMIN_PASSWORD";
pub const ENV_TENANT_CONFIG: &str = "TENANT_CONFIG";
/// Tenants file picked up from the working directory when `TENANT_CONFIG` is unset
pub const DEFAULT_TENANT_FILE: &str = "tenants.json";

/// Where and how to reach the inventory API
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            username: "admin".to_string(),
            password: "admin123".to_string(),
            timeout_secs: 10,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    pub max_retries: u32,
    pub delay_secs: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            max_retries: 30,
            delay_secs: 5,
        }
    }
}

impl ReadinessConfig {
    pub fn policy(&self) -> ReadinessPolicy {
        ReadinessPolicy {
            max_retries: self.max_retries,
            delay: Duration::from_secs(self.delay_secs),
        }
    }
}

/// Seeder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub readiness: ReadinessConfig,
    pub warehouse: WarehouseLayout,
    pub tenants: Vec<TenantSpec>,
    /// Keep going without credentials when authentication fails
    pub allow_guest: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            readiness: ReadinessConfig::default(),
            warehouse: WarehouseLayout::default(),
            tenants: default_tenants(),
            allow_guest: false,
        }
    }
}

impl Config {
    /// First existing `config.{yaml,yml,json}` in the user config dir
    pub fn config_path() -> Option<PathBuf> {
        let dir = dirs::config_dir()?.join("invseed");
        ["config.yaml", "config.yml", "config.json"]
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Load from `path`, or from the default location if there is a file
    /// there, or fall back to defaults. Environment overrides are applied.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::config_path() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a config file, YAML or JSON by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML in {}", path.display()))?,
            _ => serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?,
        };
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Overlay environment variables, read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.apply_env_in(lookup, Path::new("."))
    }

    /// Like [`Config::apply_env`], resolving relative tenant files against `dir`
    pub fn apply_env_in<F>(&mut self, lookup: F, dir: &Path) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_API_URL) {
            self.api.base_url = url;
        } else if let Some(url) = non_empty(ENV_API_BASE) {
            tracing::debug!("Using {} for the API URL", ENV_API_BASE);
            self.api.base_url = url;
        }
        if let Some(user) = non_empty(ENV_ADMIN_USER) {
            self.api.username = user;
        }
        if let Some(password) = non_empty(ENV_ADMIN_PASSWORD) {
            self.api.password = password;
        }
        let file = non_empty(ENV_TENANT_CONFIG)
            .unwrap_or_else(|| DEFAULT_TENANT_FILE.to_string());
        let path = dir.join(file);
        if path.exists() {
            self.tenants = load_tenants(&path)?;
        } else {
            tracing::debug!(
                "No tenant file at {}, keeping configured tenants",
                path.display()
            );
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            anyhow::bail!("API base URL must not be empty");
        }
        self.warehouse
            .validate()
            .context("Invalid warehouse layout")?;
        Ok(())
    }
}

/// Read a JSON list of tenants
pub fn load_tenants(path: &Path) -> Result<Vec<TenantSpec>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tenant config {}", path.display()))?;
    let tenants: Vec<TenantSpec> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid tenant config {}", path.display()))?;
    tracing::info!("Loaded {} tenants from {}", tenants.len(), path.display());
    Ok(tenants)
}
