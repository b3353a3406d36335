//! Connection selection between a wallet-backed node and a hosted fallback.
//!
//! A [`Connections`] value is built from [`ConnectionSettings`], caches one
//! lazily-initialized provider per mode, and is passed by reference rather
//! than living in module-level globals. Wallet mode resolves to the hosted
//! endpoint when no wallet endpoint is configured.

use crate::config::ConnectionSettings;
use alloy::network::AnyNetwork;
use alloy_provider::RootProvider;
use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Node handle shared across the crate.
pub type Node = RootProvider<AnyNetwork>;

/// Which endpoint a contract call should go through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionMode {
    /// The wallet-backed node, falling back to the hosted endpoint when no
    /// wallet endpoint is configured.
    Wallet,
    /// Always the hosted endpoint.
    Fallback,
}

/// Process-scoped connection cache: one lazily-created provider per mode.
///
/// HTTP providers are stateless, so a cached handle is rebuilt only when
/// absent. There is no retry or failure-recovery logic here; a dead endpoint
/// surfaces as failed calls.
pub struct Connections {
    settings: ConnectionSettings,
    /// Wallet endpoint resolved from the environment at construction.
    wallet_endpoint: Option<String>,
    wallet: OnceCell<Arc<Node>>,
    fallback: OnceCell<Arc<Node>>,
}

impl Connections {
    pub fn new(settings: ConnectionSettings) -> Self {
        let wallet_endpoint = settings.wallet_rpc_url();
        Self {
            settings,
            wallet_endpoint,
            wallet: OnceCell::new(),
            fallback: OnceCell::new(),
        }
    }

    /// Whether a wallet-node endpoint was present at construction.
    pub fn wallet_present(&self) -> bool {
        self.wallet_endpoint.is_some()
    }

    /// The endpoint a given mode resolves to.
    pub fn endpoint(&self, mode: ConnectionMode) -> &str {
        match mode {
            ConnectionMode::Wallet => self
                .wallet_endpoint
                .as_deref()
                .unwrap_or(&self.settings.fallback_rpc_url),
            ConnectionMode::Fallback => &self.settings.fallback_rpc_url,
        }
    }

    pub fn select(&self, mode: ConnectionMode) -> Result<Arc<Node>> {
        match mode {
            ConnectionMode::Wallet => self.wallet(),
            ConnectionMode::Fallback => self.fallback(),
        }
    }

    /// Wallet-mode handle. Falls back to the hosted endpoint when no wallet
    /// endpoint is configured.
    pub fn wallet(&self) -> Result<Arc<Node>> {
        match self.wallet_endpoint.clone() {
            Some(endpoint) => get_or_connect(&self.wallet, &endpoint),
            None => self.fallback(),
        }
    }

    /// Hosted-node handle.
    pub fn fallback(&self) -> Result<Arc<Node>> {
        get_or_connect(&self.fallback, &self.settings.fallback_rpc_url)
    }
}

fn get_or_connect(cell: &OnceCell<Arc<Node>>, endpoint: &str) -> Result<Arc<Node>> {
    let provider = cell.get_or_try_init(|| {
        let url = endpoint.parse().context("Invalid RPC URL")?;
        tracing::debug!(endpoint = %redact_endpoint(endpoint), "Creating node provider");
        Ok::<_, anyhow::Error>(Arc::new(RootProvider::<AnyNetwork>::new_http(url)))
    })?;
    Ok(Arc::clone(provider))
}

/// Hosted endpoints carry API keys in the path; keep them out of logs.
fn redact_endpoint(url: &str) -> String {
    if url.contains("infura.io") || url.contains("alchemy.com") {
        if let Some(idx) = url.rfind('/') {
            let (base, key) = url.split_at(idx + 1);
            if key.len() > 8 {
                return format!("{}...{}", base, &key[key.len() - 4..]);
            }
        }
    }
    url.to_string()
}

/// Latest block number via a raw `eth_blockNumber` call, bounded to ten
/// seconds.
///
/// Used by integration tests to decide whether a node is reachable before
/// exercising it; not part of the call path.
pub async fn fetch_block_number(endpoint: &str) -> Result<u64> {
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .context("failed to build reqwest client")?;

    let request = client.post(endpoint).json(&json!({
        "jsonrpc": "2.0",
        "method": "eth_blockNumber",
        "params": [],
        "id": 1
    }));
    let response = tokio::time::timeout(Duration::from_secs(10), request.send())
        .await
        .context("timed out waiting for eth_blockNumber")?
        .context("failed to request eth_blockNumber")?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .context("failed to read eth_blockNumber response body")?;

    if !status.is_success() {
        anyhow::bail!(
            "HTTP error {}: {}",
            status,
            String::from_utf8_lossy(&body)
        );
    }

    let json_response: serde_json::Value =
        serde_json::from_slice(&body).context("invalid json from eth_blockNumber")?;
    let hex_block = json_response
        .get("result")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("missing result in eth_blockNumber response"))?;
    u64::from_str_radix(hex_block.trim_start_matches("0x"), 16)
        .context("failed to parse eth_blockNumber response as hex u64")
}

/// Whether a node answers at the given endpoint.
pub async fn node_available(endpoint: &str) -> bool {
    fetch_block_number(endpoint).await.is_ok()
}

// ============================================================================
// Tests
// ============================================================================
