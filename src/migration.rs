//! Deployment runbook for the platform contracts.
//!
//! This module is operational documentation, not a deployer: it records the
//! order in which the platform contracts must be brought up and wired
//! together. The contracts themselves are deployed out of band (hardware
//! wallets, per-property seller accounts); nothing here sends bytecode.
//!
//! The sequence, for a platform bootstrap followed by one property:
//!
//! 1. Deploy `LandRegistryProxy`. The proxy address is permanent and is the
//!    one other contracts read, so it is never redeployed.
//! 2. Deploy `LandRegistry`, then call `set` on the proxy to point at it.
//!    Registry upgrades repeat this pair of steps.
//! 3. Deploy `WhitelistProxy` (also permanent), deploy `Whitelist`, and point
//!    the proxy at it the same way.
//!
//! The platform is now live. Per property:
//!
//! 4. Deploy `TokenizedProperty(eGrid, parcelNumber)` from the seller's
//!    account; the full supply is minted to the deployer.
//! 5. Call `tokenizeProperty(eGrid, token)` on the registry. Until this
//!    registration the token cannot move.
//! 6. Deploy `TokenSale(cap, closingTime, goal, openingTime, rate, token,
//!    sellerWallet)`.
//! 7. Grant the sale the `authorized` whitelist role so it can hold and hand
//!    out the token, then transfer the sale its inventory.
//! 8. Once the sale `hasClosed()`, either the seller or the platform calls
//!    `finalize()`: funds (minus the 1% platform fee) go to the seller when
//!    the goal was met, otherwise investors can claim refunds. Investors
//!    withdraw their tokens afterwards.

use serde::{Deserialize, Serialize};

/// One step of the fixed bootstrap/tokenization sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeployStep {
    DeployLandRegistryProxy,
    DeployLandRegistry,
    PointLandRegistryProxy,
    DeployWhitelistProxy,
    DeployWhitelist,
    PointWhitelistProxy,
    DeployTokenizedProperty,
    RegisterProperty,
    DeployTokenSale,
    WhitelistTokenSale,
    FundTokenSale,
    FinalizeTokenSale,
}

impl DeployStep {
    /// The contract this step targets.
    pub fn contract(&self) -> &'static str {
        match self {
            Self::DeployLandRegistryProxy | Self::PointLandRegistryProxy => "LandRegistryProxy",
            Self::DeployLandRegistry => "LandRegistry",
            Self::RegisterProperty => "LandRegistry",
            Self::DeployWhitelistProxy | Self::PointWhitelistProxy => "WhitelistProxy",
            Self::DeployWhitelist => "Whitelist",
            Self::WhitelistTokenSale => "Whitelist",
            Self::DeployTokenizedProperty | Self::FundTokenSale => "TokenizedProperty",
            Self::DeployTokenSale | Self::FinalizeTokenSale => "TokenSale",
        }
    }

    /// Whether this step deploys a new contract (as opposed to wiring one).
    pub fn is_deploy(&self) -> bool {
        matches!(
            self,
            Self::DeployLandRegistryProxy
                | Self::DeployLandRegistry
                | Self::DeployWhitelistProxy
                | Self::DeployWhitelist
                | Self::DeployTokenizedProperty
                | Self::DeployTokenSale
        )
    }
}

/// The fixed order in which the platform is stood up and one property is
/// tokenized and sold.
pub fn deployment_plan() -> &'static [DeployStep] {
    use DeployStep::*;
    &[
        DeployLandRegistryProxy,
        DeployLandRegistry,
        PointLandRegistryProxy,
        DeployWhitelistProxy,
        DeployWhitelist,
        PointWhitelistProxy,
        DeployTokenizedProperty,
        RegisterProperty,
        DeployTokenSale,
        WhitelistTokenSale,
        FundTokenSale,
        FinalizeTokenSale,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(step: DeployStep) -> usize {
        deployment_plan()
            .iter()
            .position(|s| *s == step)
            .expect("step in plan")
    }

    #[test]
    fn test_proxies_deployed_before_pointed() {
        use DeployStep::*;
        assert!(position(DeployLandRegistryProxy) < position(PointLandRegistryProxy));
        assert!(position(DeployLandRegistry) < position(PointLandRegistryProxy));
        assert!(position(DeployWhitelistProxy) < position(PointWhitelistProxy));
        assert!(position(DeployWhitelist) < position(PointWhitelistProxy));
    }

    #[test]
    fn test_property_registered_before_sale() {
        use DeployStep::*;
        assert!(position(DeployTokenizedProperty) < position(RegisterProperty));
        assert!(position(RegisterProperty) < position(DeployTokenSale));
    }

    #[test]
    fn test_sale_whitelisted_and_funded_before_finalize() {
        use DeployStep::*;
        assert!(position(DeployTokenSale) < position(WhitelistTokenSale));
        assert!(position(WhitelistTokenSale) < position(FundTokenSale));
        assert!(position(FundTokenSale) < position(FinalizeTokenSale));
        assert_eq!(
            deployment_plan().last(),
            Some(&FinalizeTokenSale),
            "finalization closes the sequence"
        );
    }

    #[test]
    fn test_every_step_names_a_contract() {
        for step in deployment_plan() {
            assert!(!step.contract().is_empty());
        }
    }
}
