//! Land registry: the eGrid -> token-contract mapping and its fixed proxy.

use super::decode_address;
use crate::contracts::Contract;
use alloy::dyn_abi::DynSolValue;
use alloy_primitives::{Address, TxHash};
use anyhow::{Context, Result};

/// The fixed proxy fronting the current [`LandRegistry`]. Deployed once; its
/// pointer can be moved to a new registry implementation.
pub struct LandRegistryProxy {
    contract: Contract,
}

impl LandRegistryProxy {
    pub fn new(contract: Contract) -> Self {
        Self { contract }
    }

    pub fn address(&self) -> Address {
        *self.contract.address()
    }

    /// Address of the registry the proxy currently points at.
    pub async fn land_registry(&self) -> Result<Address> {
        let values = self
            .contract
            .function("landRegistry", &[])?
            .call()
            .await
            .context("landRegistry call failed")?;
        decode_address(values, "landRegistry")
    }

    /// Point the proxy at a new registry implementation. Owner only.
    pub async fn set(&self, registry: Address, from: Address) -> Result<TxHash> {
        let pending = self
            .contract
            .function("set", &[DynSolValue::Address(registry)])?
            .from(from)
            .send()
            .await
            .context("set rejected")?;
        pending.watch().await.context("set not mined")
    }
}

/// The registry itself: one entry per tokenized property, keyed by eGrid.
/// Uniqueness and authorization are enforced on-chain.
pub struct LandRegistry {
    contract: Contract,
}

impl LandRegistry {
    pub fn new(contract: Contract) -> Self {
        Self { contract }
    }

    pub fn address(&self) -> Address {
        *self.contract.address()
    }

    /// Register a property token under its eGrid. Platform owner only; the
    /// eGrid must be unused and both arguments non-empty.
    pub async fn tokenize_property(
        &self,
        e_grid: &str,
        property: Address,
        from: Address,
    ) -> Result<TxHash> {
        let pending = self
            .contract
            .function(
                "tokenizeProperty",
                &[
                    DynSolValue::String(e_grid.to_string()),
                    DynSolValue::Address(property),
                ],
            )?
            .from(from)
            .send()
            .await
            .context("tokenizeProperty rejected")?;
        pending.watch().await.context("tokenizeProperty not mined")
    }

    /// Remove a property from the registry. Platform owner only.
    pub async fn untokenize_property(&self, e_grid: &str, from: Address) -> Result<TxHash> {
        let pending = self
            .contract
            .function(
                "untokenizeProperty",
                &[DynSolValue::String(e_grid.to_string())],
            )?
            .from(from)
            .send()
            .await
            .context("untokenizeProperty rejected")?;
        pending
            .watch()
            .await
            .context("untokenizeProperty not mined")
    }

    /// Token address registered for `e_grid`, or the zero address when the
    /// eGrid is unknown.
    pub async fn get_property(&self, e_grid: &str) -> Result<Address> {
        let values = self
            .contract
            .function("getProperty", &[DynSolValue::String(e_grid.to_string())])?
            .call()
            .await
            .context("getProperty call failed")?;
        decode_address(values, "getProperty")
    }

    pub async fn owner(&self) -> Result<Address> {
        let values = self
            .contract
            .function("owner", &[])?
            .call()
            .await
            .context("owner call failed")?;
        decode_address(values, "owner")
    }
}
