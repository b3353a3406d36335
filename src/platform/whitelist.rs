//! Whitelist: (address, role) permissions gating token transfers.

use super::{decode_address, decode_bool};
use crate::contracts::Contract;
use alloy::dyn_abi::DynSolValue;
use alloy_primitives::{Address, TxHash};
use anyhow::{Context, Result};

/// The fixed proxy fronting the current [`Whitelist`].
pub struct WhitelistProxy {
    contract: Contract,
}

impl WhitelistProxy {
    pub fn new(contract: Contract) -> Self {
        Self { contract }
    }

    pub fn address(&self) -> Address {
        *self.contract.address()
    }

    /// Address of the whitelist the proxy currently points at.
    pub async fn whitelist(&self) -> Result<Address> {
        let values = self
            .contract
            .function("whitelist", &[])?
            .call()
            .await
            .context("whitelist call failed")?;
        decode_address(values, "whitelist")
    }

    /// Point the proxy at a new whitelist implementation. Owner only.
    pub async fn set(&self, whitelist: Address, from: Address) -> Result<TxHash> {
        let pending = self
            .contract
            .function("set", &[DynSolValue::Address(whitelist)])?
            .from(from)
            .send()
            .await
            .context("set rejected")?;
        pending.watch().await.context("set not mined")
    }
}

/// Role-based permission store. Granting and revoking are owner-only; the
/// token contracts consult it on every transfer.
pub struct Whitelist {
    contract: Contract,
}

impl Whitelist {
    pub fn new(contract: Contract) -> Self {
        Self { contract }
    }

    pub fn address(&self) -> Address {
        *self.contract.address()
    }

    pub async fn grant_permission(
        &self,
        account: Address,
        role: &str,
        from: Address,
    ) -> Result<TxHash> {
        self.permission_call("grantPermission", account, role, from)
            .await
    }

    pub async fn revoke_permission(
        &self,
        account: Address,
        role: &str,
        from: Address,
    ) -> Result<TxHash> {
        self.permission_call("revokePermission", account, role, from)
            .await
    }

    pub async fn grant_permission_batch(
        &self,
        accounts: &[Address],
        role: &str,
        from: Address,
    ) -> Result<TxHash> {
        self.permission_batch_call("grantPermissionBatch", accounts, role, from)
            .await
    }

    pub async fn revoke_permission_batch(
        &self,
        accounts: &[Address],
        role: &str,
        from: Address,
    ) -> Result<TxHash> {
        self.permission_batch_call("revokePermissionBatch", accounts, role, from)
            .await
    }

    /// Succeeds when `account` holds `role`; the contract reverts otherwise,
    /// which surfaces here as an error.
    pub async fn check_role(&self, account: Address, role: &str) -> Result<()> {
        self.contract
            .function(
                "checkRole",
                &[
                    DynSolValue::Address(account),
                    DynSolValue::String(role.to_string()),
                ],
            )?
            .call()
            .await
            .with_context(|| format!("checkRole({account}, {role}) reverted"))?;
        Ok(())
    }

    /// Non-reverting variant of [`Whitelist::check_role`].
    pub async fn has_role(&self, account: Address, role: &str) -> Result<bool> {
        let values = self
            .contract
            .function(
                "hasRole",
                &[
                    DynSolValue::Address(account),
                    DynSolValue::String(role.to_string()),
                ],
            )?
            .call()
            .await
            .context("hasRole call failed")?;
        decode_bool(values, "hasRole")
    }

    async fn permission_call(
        &self,
        function: &str,
        account: Address,
        role: &str,
        from: Address,
    ) -> Result<TxHash> {
        let pending = self
            .contract
            .function(
                function,
                &[
                    DynSolValue::Address(account),
                    DynSolValue::String(role.to_string()),
                ],
            )?
            .from(from)
            .send()
            .await
            .with_context(|| format!("{function} rejected"))?;
        pending
            .watch()
            .await
            .with_context(|| format!("{function} not mined"))
    }

    async fn permission_batch_call(
        &self,
        function: &str,
        accounts: &[Address],
        role: &str,
        from: Address,
    ) -> Result<TxHash> {
        let accounts = accounts
            .iter()
            .copied()
            .map(DynSolValue::Address)
            .collect::<Vec<_>>();
        let pending = self
            .contract
            .function(
                function,
                &[
                    DynSolValue::Array(accounts),
                    DynSolValue::String(role.to_string()),
                ],
            )?
            .from(from)
            .send()
            .await
            .with_context(|| format!("{function} rejected"))?;
        pending
            .watch()
            .await
            .with_context(|| format!("{function} not mined"))
    }
}
