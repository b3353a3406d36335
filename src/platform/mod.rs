//! Typed call surfaces for the platform contracts.
//!
//! Each wrapper issues calls through a bound [`Contract`](crate::contracts::Contract)
//! and decodes single return values. All lifecycle and invariant logic lives
//! on-chain; a rejected call (revert, missing permission, dead endpoint)
//! propagates as an error without classification. State-changing calls take
//! an explicit `from` account and rely on the node to sign, the way the
//! wallet-backed browser layer did.

mod land_registry;
mod token_sale;
mod tokenized_property;
mod whitelist;

pub use land_registry::{LandRegistry, LandRegistryProxy};
pub use token_sale::TokenSale;
pub use tokenized_property::TokenizedProperty;
pub use whitelist::{Whitelist, WhitelistProxy};

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::{Address, U256};
use anyhow::Result;

fn expect_single(mut values: Vec<DynSolValue>, what: &str) -> Result<DynSolValue> {
    if values.len() != 1 {
        anyhow::bail!("{what}: expected one return value, got {}", values.len());
    }
    Ok(values.remove(0))
}

pub(crate) fn decode_address(values: Vec<DynSolValue>, what: &str) -> Result<Address> {
    expect_single(values, what)?
        .as_address()
        .ok_or_else(|| anyhow::anyhow!("{what}: return value is not an address"))
}

pub(crate) fn decode_uint(values: Vec<DynSolValue>, what: &str) -> Result<U256> {
    expect_single(values, what)?
        .as_uint()
        .map(|(value, _bits)| value)
        .ok_or_else(|| anyhow::anyhow!("{what}: return value is not a uint"))
}

pub(crate) fn decode_string(values: Vec<DynSolValue>, what: &str) -> Result<String> {
    match expect_single(values, what)? {
        DynSolValue::String(s) => Ok(s),
        _ => anyhow::bail!("{what}: return value is not a string"),
    }
}

pub(crate) fn decode_bool(values: Vec<DynSolValue>, what: &str) -> Result<bool> {
    expect_single(values, what)?
        .as_bool()
        .ok_or_else(|| anyhow::anyhow!("{what}: return value is not a bool"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_decode_address() {
        let values = vec![DynSolValue::Address(address!(
            "c5a168ed2a712f7e5747f09a70524994d6d1687d"
        ))];
        assert_eq!(
            decode_address(values, "getProperty").unwrap(),
            address!("c5a168ed2a712f7e5747f09a70524994d6d1687d")
        );
    }

    #[test]
    fn test_decode_uint() {
        let values = vec![DynSolValue::Uint(U256::from(42u64), 256)];
        assert_eq!(decode_uint(values, "weiRaised").unwrap(), U256::from(42u64));
    }

    #[test]
    fn test_decode_rejects_wrong_arity() {
        let values = vec![
            DynSolValue::Bool(true),
            DynSolValue::Uint(U256::from(1u64), 256),
        ];
        let err = decode_bool(values, "hasClosed").unwrap_err();
        assert!(err.to_string().contains("expected one return value"));
    }

    #[test]
    fn test_decode_rejects_wrong_type() {
        let values = vec![DynSolValue::Bool(true)];
        assert!(decode_uint(values, "deposits").is_err());
    }
}
