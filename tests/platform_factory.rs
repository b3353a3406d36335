//! Factory and connection-selection checks. Everything here runs offline;
//! the trailing live check probes for a reachable node first and skips
//! otherwise, so the suite stays green without one.

use alloy_primitives::address;
use property_platform::{
    node_available, ConnectionMode, ConnectionSettings, Platform, PlatformConfig,
};
use std::path::Path;

fn test_config() -> PlatformConfig {
    PlatformConfig::new()
        .with_artifacts_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("artifacts"))
        .with_connection(
            ConnectionSettings::new()
                // Unset var: wallet mode must fall back.
                .with_wallet_env_var("PLATFORM_FACTORY_TEST_WALLET")
                .with_fallback_rpc_url("http://localhost:8545"),
        )
}

#[test]
fn binds_contracts_from_shipped_artifacts() {
    let platform = Platform::new(test_config());
    let token = platform
        .contract(
            "TokenizedProperty",
            address!("9ad61e35f8309af944136283157fabcc5ad371e5"),
        )
        .expect("bind token");

    // The interface carries the artifact's ABI; building a call for a known
    // function needs no network.
    assert!(token.function("totalSupply", &[]).is_ok());
    assert!(token
        .function("balanceOf", &[alloy::dyn_abi::DynSolValue::Address(
            address!("c5a168ed2a712f7e5747f09a70524994d6d1687d"),
        )])
        .is_ok());
}

#[test]
fn missing_artifact_is_an_error() {
    let platform = Platform::new(test_config());
    let err = platform
        .contract(
            "NotAContract",
            address!("c5a168ed2a712f7e5747f09a70524994d6d1687d"),
        )
        .unwrap_err();
    assert!(err.to_string().contains("NotAContract"));
}

#[test]
fn typed_entry_points_bind_offline() {
    let platform = Platform::new(test_config());

    let proxy = platform.land_registry_proxy().expect("registry proxy");
    assert_eq!(
        proxy.address(),
        platform.config().addresses.land_registry_proxy
    );

    let proxy = platform.whitelist_proxy().expect("whitelist proxy");
    assert_eq!(proxy.address(), platform.config().addresses.whitelist_proxy);

    platform
        .tokenized_property(address!("9ad61e35f8309af944136283157fabcc5ad371e5"))
        .expect("token");
    platform
        .token_sale(address!("564540a26fb667306b3abdcb4ead35beb88698ab"))
        .expect("sale");
}

#[test]
fn fallback_mode_ignores_wallet_endpoint() {
    std::env::set_var("PLATFORM_FACTORY_WALLET_SET", "http://localhost:9545");
    let config = test_config().with_connection(
        ConnectionSettings::new()
            .with_wallet_env_var("PLATFORM_FACTORY_WALLET_SET")
            .with_fallback_rpc_url("http://localhost:8545"),
    );
    let platform = Platform::new(config);
    std::env::remove_var("PLATFORM_FACTORY_WALLET_SET");

    let connections = platform.connections();
    assert!(connections.wallet_present());
    assert_eq!(
        connections.endpoint(ConnectionMode::Wallet),
        "http://localhost:9545"
    );
    assert_eq!(
        connections.endpoint(ConnectionMode::Fallback),
        "http://localhost:8545"
    );
}

/// Round-trip against a real node carrying the deployed platform. Points at
/// `PLATFORM_LIVE_RPC` and skips when nothing answers there.
#[tokio::test]
async fn live_proxy_resolution() {
    let endpoint = match std::env::var("PLATFORM_LIVE_RPC") {
        Ok(url) if !url.is_empty() => url,
        _ => {
            eprintln!("Skipping test: PLATFORM_LIVE_RPC not set");
            return;
        }
    };
    if !node_available(&endpoint).await {
        eprintln!("Skipping test: no node at {endpoint}");
        return;
    }

    let config = test_config().with_connection(
        ConnectionSettings::new()
            .with_wallet_env_var("PLATFORM_LIVE_RPC")
            .with_fallback_rpc_url(endpoint),
    );
    let platform = Platform::new(config);

    let registry = platform.land_registry().await.expect("resolve registry");
    assert_ne!(registry.address(), alloy_primitives::Address::ZERO);

    let whitelist = platform.whitelist().await.expect("resolve whitelist");
    assert_ne!(whitelist.address(), alloy_primitives::Address::ZERO);
}
