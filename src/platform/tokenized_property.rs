//! Tokenized property: an ERC20 representing fractional ownership of one
//! property, with proportional dividend accounting on-chain.

use super::{decode_string, decode_uint};
use crate::contracts::Contract;
use alloy::dyn_abi::DynSolValue;
use alloy_primitives::{Address, TxHash, U256};
use anyhow::{Context, Result};

pub struct TokenizedProperty {
    contract: Contract,
}

impl TokenizedProperty {
    pub fn new(contract: Contract) -> Self {
        Self { contract }
    }

    pub fn address(&self) -> Address {
        *self.contract.address()
    }

    // ========================================================================
    // ERC20 views
    // ========================================================================

    /// Token name; the platform sets this to the property's eGrid.
    pub async fn name(&self) -> Result<String> {
        let values = self
            .contract
            .function("name", &[])?
            .call()
            .await
            .context("name call failed")?;
        decode_string(values, "name")
    }

    /// Token symbol; set to the property's parcel (Grundstueck) number.
    pub async fn symbol(&self) -> Result<String> {
        let values = self
            .contract
            .function("symbol", &[])?
            .call()
            .await
            .context("symbol call failed")?;
        decode_string(values, "symbol")
    }

    pub async fn total_supply(&self) -> Result<U256> {
        let values = self
            .contract
            .function("totalSupply", &[])?
            .call()
            .await
            .context("totalSupply call failed")?;
        decode_uint(values, "totalSupply")
    }

    pub async fn balance_of(&self, account: Address) -> Result<U256> {
        let values = self
            .contract
            .function("balanceOf", &[DynSolValue::Address(account)])?
            .call()
            .await
            .context("balanceOf call failed")?;
        decode_uint(values, "balanceOf")
    }

    // ========================================================================
    // Transfers
    // ========================================================================

    /// ERC20 transfer. Reverts on-chain unless the property is registered and
    /// the recipient is whitelisted.
    pub async fn transfer(&self, to: Address, value: U256, from: Address) -> Result<TxHash> {
        let pending = self
            .contract
            .function(
                "transfer",
                &[DynSolValue::Address(to), DynSolValue::Uint(value, 256)],
            )?
            .from(from)
            .send()
            .await
            .context("transfer rejected")?;
        pending.watch().await.context("transfer not mined")
    }

    // ========================================================================
    // Dividends
    // ========================================================================

    /// Deposit dividends for pro-rata distribution to current holders. The
    /// depositor must have approved the token beforehand; the platform fee is
    /// taken on-chain.
    pub async fn deposit_dividends(&self, from: Address) -> Result<TxHash> {
        let pending = self
            .contract
            .function("depositDividends", &[])?
            .from(from)
            .send()
            .await
            .context("depositDividends rejected")?;
        pending.watch().await.context("depositDividends not mined")
    }

    /// Pay out everything owed to `account`. Reverts when nothing is owed.
    pub async fn collect_owed_dividends(&self, account: Address, from: Address) -> Result<TxHash> {
        let pending = self
            .contract
            .function("collectOwedDividends", &[DynSolValue::Address(account)])?
            .from(from)
            .send()
            .await
            .context("collectOwedDividends rejected")?;
        pending
            .watch()
            .await
            .context("collectOwedDividends not mined")
    }

    /// Net amount `account` has deposited as dividends.
    pub async fn deposits(&self, account: Address) -> Result<U256> {
        let values = self
            .contract
            .function("deposits", &[DynSolValue::Address(account)])?
            .call()
            .await
            .context("deposits call failed")?;
        decode_uint(values, "deposits")
    }
}
