use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use alloy_primitives::{address, Address};

/// Env var checked before walking ancestor directories for `platform.toml`.
pub const CONFIG_PATH_ENV_VAR: &str = "PLATFORM_CONFIG";

/// How the client reaches a node: a wallet-backed endpoint resolved from the
/// environment, with a hosted fallback when none is present.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Env var consulted for the wallet-node endpoint. Unset or empty means
    /// no wallet is present and the fallback endpoint is used.
    pub wallet_env_var: String,
    /// Hosted node endpoint used when no wallet node is available.
    pub fallback_rpc_url: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            wallet_env_var: "ETH_RPC_URL".to_string(),
            fallback_rpc_url: "https://cloudflare-eth.com".to_string(),
        }
    }
}

impl ConnectionSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wallet_env_var(mut self, name: impl Into<String>) -> Self {
        self.wallet_env_var = name.into();
        self
    }

    pub fn with_fallback_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.fallback_rpc_url = url.into();
        self
    }

    /// Resolve the wallet endpoint from the environment, if one is present.
    pub fn wallet_rpc_url(&self) -> Option<String> {
        env::var(&self.wallet_env_var)
            .ok()
            .filter(|url| !url.trim().is_empty())
    }
}

/// Published addresses of the platform's entry-point contracts. The proxies
/// are fixed; everything else is resolved through them on-chain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlatformAddresses {
    pub land_registry_proxy: Address,
    pub whitelist_proxy: Address,
}

impl Default for PlatformAddresses {
    fn default() -> Self {
        Self {
            land_registry_proxy: address!("0f5ea0a652e851678ebf77b69484bfcd31f9459b"),
            whitelist_proxy: address!("ec8be1a5630364292e56d01129e8ee8a9578d7d8"),
        }
    }
}

/// Top-level client configuration, loadable from `platform.toml`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default)]
    pub connection: ConnectionSettings,
    /// Directory holding the compiled-contract JSON artifacts.
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
    #[serde(default)]
    pub addresses: PlatformAddresses,
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionSettings::default(),
            artifacts_dir: default_artifacts_dir(),
            addresses: PlatformAddresses::default(),
        }
    }
}

impl PlatformConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = dir.into();
        self
    }

    pub fn with_connection(mut self, settings: ConnectionSettings) -> Self {
        self.connection = settings;
        self
    }

    pub fn with_addresses(mut self, addresses: PlatformAddresses) -> Self {
        self.addresses = addresses;
        self
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from the resolved `platform.toml`, or fall back to defaults when
    /// no config file exists anywhere up the tree.
    pub fn load() -> Result<Self> {
        match resolve_config_path()? {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Find `platform.toml`: an explicit `PLATFORM_CONFIG` path wins, otherwise
/// walk up from the current directory.
pub fn resolve_config_path() -> Result<Option<PathBuf>> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(Some(path));
        }
        anyhow::bail!(
            "{} was set but not found: {}",
            CONFIG_PATH_ENV_VAR,
            path.display()
        );
    }

    let mut dir = env::current_dir().context("Failed to read current dir")?;
    loop {
        let candidate = dir.join("platform.toml");
        if candidate.exists() {
            return Ok(Some(candidate));
        }
        if !dir.pop() {
            break;
        }
    }

    Ok(None)
}
