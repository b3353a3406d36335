//! The [`Platform`] handle and the name/address contract factory.
//!
//! `Platform::contract` loads the named ABI artifact, picks a connection,
//! and hands back a callable instance. There is no validation beyond the ABI
//! parse and no caching beyond the connection layer.

use crate::artifacts::load_artifact;
use crate::config::PlatformConfig;
use crate::platform::{
    LandRegistry, LandRegistryProxy, TokenSale, TokenizedProperty, Whitelist, WhitelistProxy,
};
use crate::provider::{ConnectionMode, Connections, Node};
use alloy::contract::{ContractInstance, Interface};
use alloy::network::AnyNetwork;
use alloy_primitives::Address;
use anyhow::{Context, Result};

/// A platform contract bound to a node connection.
pub type Contract = ContractInstance<Node, AnyNetwork>;

/// Top-level client handle: configuration plus the connection cache.
pub struct Platform {
    config: PlatformConfig,
    connections: Connections,
}

impl Platform {
    pub fn new(config: PlatformConfig) -> Self {
        let connections = Connections::new(config.connection.clone());
        Self {
            config,
            connections,
        }
    }

    /// Build a platform handle from `platform.toml` (or defaults).
    pub fn from_default_config() -> Result<Self> {
        Ok(Self::new(PlatformConfig::load()?))
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    pub fn connections(&self) -> &Connections {
        &self.connections
    }

    /// Instantiate a contract by artifact name at `address`, bound to the
    /// wallet-mode connection.
    pub fn contract(&self, name: &str, address: Address) -> Result<Contract> {
        self.contract_via(name, address, ConnectionMode::Wallet)
    }

    /// Same as [`Platform::contract`] with an explicit connection mode.
    pub fn contract_via(
        &self,
        name: &str,
        address: Address,
        mode: ConnectionMode,
    ) -> Result<Contract> {
        let artifact = load_artifact(&self.config.artifacts_dir, name)
            .with_context(|| format!("No usable artifact for contract '{name}'"))?;
        let provider = self.connections.select(mode)?;
        let interface = Interface::new(artifact.abi);
        tracing::debug!(contract = name, address = %address, ?mode, "Bound contract instance");
        Ok(ContractInstance::new(address, (*provider).clone(), interface))
    }

    // ========================================================================
    // Typed entry points
    // ========================================================================

    /// The land-registry proxy at its published address.
    pub fn land_registry_proxy(&self) -> Result<LandRegistryProxy> {
        let address = self.config.addresses.land_registry_proxy;
        Ok(LandRegistryProxy::new(
            self.contract("LandRegistryProxy", address)?,
        ))
    }

    /// The current land registry, resolved through the proxy on-chain.
    pub async fn land_registry(&self) -> Result<LandRegistry> {
        let address = self.land_registry_proxy()?.land_registry().await?;
        self.land_registry_at(address)
    }

    pub fn land_registry_at(&self, address: Address) -> Result<LandRegistry> {
        Ok(LandRegistry::new(self.contract("LandRegistry", address)?))
    }

    /// The whitelist proxy at its published address.
    pub fn whitelist_proxy(&self) -> Result<WhitelistProxy> {
        let address = self.config.addresses.whitelist_proxy;
        Ok(WhitelistProxy::new(
            self.contract("WhitelistProxy", address)?,
        ))
    }

    /// The current whitelist, resolved through the proxy on-chain.
    pub async fn whitelist(&self) -> Result<Whitelist> {
        let address = self.whitelist_proxy()?.whitelist().await?;
        self.whitelist_at(address)
    }

    pub fn whitelist_at(&self, address: Address) -> Result<Whitelist> {
        Ok(Whitelist::new(self.contract("Whitelist", address)?))
    }

    /// A tokenized-property token at `address`.
    pub fn tokenized_property(&self, address: Address) -> Result<TokenizedProperty> {
        Ok(TokenizedProperty::new(
            self.contract("TokenizedProperty", address)?,
        ))
    }

    /// A crowdsale at `address`.
    pub fn token_sale(&self, address: Address) -> Result<TokenSale> {
        Ok(TokenSale::new(self.contract("TokenSale", address)?))
    }
}
