//! Client layer for the property-tokenization platform.
//!
//! The platform's business logic (token accounting, dividend distribution,
//! crowdsale mechanics, access control) lives in deployed Solidity contracts;
//! this crate only connects to a node, binds those contracts from their ABI
//! artifacts, and issues calls. See [`migration`] for the operational runbook.

pub mod artifacts;
pub mod config;
pub mod contracts;
pub mod migration;
pub mod platform;
pub mod provider;

pub use artifacts::{load_artifact, strip_dir, strip_file, Artifact};
pub use config::{ConnectionSettings, PlatformAddresses, PlatformConfig};
pub use contracts::{Contract, Platform};
pub use migration::{deployment_plan, DeployStep};
pub use platform::{
    LandRegistry, LandRegistryProxy, TokenSale, TokenizedProperty, Whitelist, WhitelistProxy,
};
pub use provider::{fetch_block_number, node_available, ConnectionMode, Connections, Node};
