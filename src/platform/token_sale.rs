//! Token sale: a timed crowdsale with cap, goal, and refund-or-forward
//! finalization, all enforced on-chain.

use super::{decode_bool, decode_uint};
use crate::contracts::Contract;
use alloy::dyn_abi::DynSolValue;
use alloy_primitives::{Address, TxHash, U256};
use anyhow::{Context, Result};

pub struct TokenSale {
    contract: Contract,
}

impl TokenSale {
    pub fn new(contract: Contract) -> Self {
        Self { contract }
    }

    pub fn address(&self) -> Address {
        *self.contract.address()
    }

    // ========================================================================
    // Purchase and post-sale flows
    // ========================================================================

    /// Buy tokens for `beneficiary`, funded by `from`'s prior approval of the
    /// funding token. The sale must be open and both parties whitelisted.
    pub async fn buy_tokens(&self, beneficiary: Address, from: Address) -> Result<TxHash> {
        self.send_with_address("buyTokens", beneficiary, from).await
    }

    /// Finalize after closing: distributes funds (minus the platform fee) on
    /// success, or enables refunds when the goal was missed. Callable by the
    /// seller or the platform.
    pub async fn finalize(&self, from: Address) -> Result<TxHash> {
        let pending = self
            .contract
            .function("finalize", &[])?
            .from(from)
            .send()
            .await
            .context("finalize rejected")?;
        pending.watch().await.context("finalize not mined")
    }

    /// Release purchased tokens to `investor` after a successful sale.
    pub async fn withdraw_tokens(&self, investor: Address, from: Address) -> Result<TxHash> {
        self.send_with_address("withdrawTokens", investor, from)
            .await
    }

    /// Refund `investor`'s deposit after an unsuccessful sale.
    pub async fn claim_refund(&self, investor: Address, from: Address) -> Result<TxHash> {
        self.send_with_address("claimRefund", investor, from).await
    }

    /// Reverse an investor's purchase before finalization. The investor must
    /// still be whitelisted to receive the refunded funding token.
    pub async fn reverse(&self, investor: Address, from: Address) -> Result<TxHash> {
        self.send_with_address("reverse", investor, from).await
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Total funding raised so far, denominated in the funding token.
    pub async fn wei_raised(&self) -> Result<U256> {
        self.uint_view("weiRaised").await
    }

    /// Deposit attributed to one investor.
    pub async fn deposits(&self, investor: Address) -> Result<U256> {
        let values = self
            .contract
            .function("deposits", &[DynSolValue::Address(investor)])?
            .call()
            .await
            .context("deposits call failed")?;
        decode_uint(values, "deposits")
    }

    pub async fn total_tokens_sold(&self) -> Result<U256> {
        self.uint_view("totalTokensSold").await
    }

    pub async fn cap(&self) -> Result<U256> {
        self.uint_view("cap").await
    }

    pub async fn goal(&self) -> Result<U256> {
        self.uint_view("goal").await
    }

    pub async fn opening_time(&self) -> Result<U256> {
        self.uint_view("openingTime").await
    }

    pub async fn closing_time(&self) -> Result<U256> {
        self.uint_view("closingTime").await
    }

    pub async fn has_closed(&self) -> Result<bool> {
        self.bool_view("hasClosed").await
    }

    pub async fn goal_reached(&self) -> Result<bool> {
        self.bool_view("goalReached").await
    }

    pub async fn finalized(&self) -> Result<bool> {
        self.bool_view("finalized").await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn send_with_address(
        &self,
        function: &str,
        argument: Address,
        from: Address,
    ) -> Result<TxHash> {
        let pending = self
            .contract
            .function(function, &[DynSolValue::Address(argument)])?
            .from(from)
            .send()
            .await
            .with_context(|| format!("{function} rejected"))?;
        pending
            .watch()
            .await
            .with_context(|| format!("{function} not mined"))
    }

    async fn uint_view(&self, function: &str) -> Result<U256> {
        let values = self
            .contract
            .function(function, &[])?
            .call()
            .await
            .with_context(|| format!("{function} call failed"))?;
        decode_uint(values, function)
    }

    async fn bool_view(&self, function: &str) -> Result<bool> {
        let values = self
            .contract
            .function(function, &[])?
            .call()
            .await
            .with_context(|| format!("{function} call failed"))?;
        decode_bool(values, function)
    }
}
