// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use alloy::primitives::{address, Address, U256};
use lazy_static::lazy_static;
use std::collections::HashMap;

// Wrapped native assets
pub const WETH_MAINNET: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
pub const WBNB_BSC: Address = address!("BB4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c");
pub const WPOL_POLYGON: Address = address!("0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270");
pub const WETH_ARBITRUM: Address = address!("82aF49447D8a07e3bd95BD0d56f35241523fBab1");
pub const WETH_BASE: Address = address!("4200000000000000000000000000000000000006");

// =============================================================================
// NETWORK CONSTANTS
// =============================================================================

pub const CHAIN_ETHEREUM: u64 = 1;
pub const CHAIN_BSC: u64 = 56;
pub const CHAIN_POLYGON: u64 = 137;
pub const CHAIN_ARBITRUM: u64 = 42161;
pub const CHAIN_BASE: u64 = 8453;

pub const SUPPORTED_CHAINS: [u64; 5] = [
    CHAIN_ETHEREUM,
    CHAIN_BSC,
    CHAIN_POLYGON,
    CHAIN_ARBITRUM,
    CHAIN_BASE,
];

/// One supported chain: funding moat, tip baseline, wrapped native and the
/// v2-style router used for both quoting and the executor's swap leg.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub name: &'static str,
    pub rpc_url: String,
    /// Native amount excluded from committed capital on top of gas overhead.
    pub funding_margin_wei: u128,
    /// Priority-fee baseline added on top of the buffered base fee.
    pub priority_fee_wei: u128,
    pub wrapped_native: Address,
    pub router: Address,
}

struct NetworkSpec {
    name: &'static str,
    default_rpc: &'static str,
    funding_margin_wei: u128,
    priority_fee_wei: u128,
    wrapped_native: Address,
    router: Address,
}

lazy_static! {
    static ref NETWORKS_BY_CHAIN: HashMap<u64, NetworkSpec> = {
        let mut m = HashMap::new();
        m.insert(
            CHAIN_ETHEREUM,
            NetworkSpec {
                name: "ethereum",
                default_rpc: "https://eth.llamarpc.com",
                funding_margin_wei: 3_000_000_000_000_000, // 0.003 ETH
                priority_fee_wei: 1_500_000_000,           // 1.5 gwei
                wrapped_native: WETH_MAINNET,
                // Uniswap V2 Router02
                router: address!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D"),
            },
        );
        m.insert(
            CHAIN_BSC,
            NetworkSpec {
                name: "bsc",
                default_rpc: "https://bsc-dataseed.binance.org",
                funding_margin_wei: 10_000_000_000_000_000, // 0.01 BNB
                priority_fee_wei: 3_000_000_000,            // 3 gwei
                wrapped_native: WBNB_BSC,
                // PancakeSwap V2 Router
                router: address!("10ED43C718714eb63d5aA57B78B54704E256024E"),
            },
        );
        m.insert(
            CHAIN_POLYGON,
            NetworkSpec {
                name: "polygon",
                default_rpc: "https://polygon-rpc.com",
                funding_margin_wei: 1_000_000_000_000_000_000, // 1 POL
                priority_fee_wei: 30_000_000_000,              // 30 gwei
                wrapped_native: WPOL_POLYGON,
                // QuickSwap Router
                router: address!("a5E0829CaCEd8fFDD4De3c43696c57F7D7A678ff"),
            },
        );
        m.insert(
            CHAIN_ARBITRUM,
            NetworkSpec {
                name: "arbitrum",
                default_rpc: "https://arb1.arbitrum.io/rpc",
                funding_margin_wei: 1_000_000_000_000_000, // 0.001 ETH
                priority_fee_wei: 10_000_000,              // 0.01 gwei
                wrapped_native: WETH_ARBITRUM,
                // SushiSwap Router
                router: address!("1b02dA8Cb0d097eB8D57A175b88c7D8b47997506"),
            },
        );
        m.insert(
            CHAIN_BASE,
            NetworkSpec {
                name: "base",
                default_rpc: "https://mainnet.base.org",
                funding_margin_wei: 1_000_000_000_000_000, // 0.001 ETH
                priority_fee_wei: 50_000_000,              // 0.05 gwei
                wrapped_native: WETH_BASE,
                // Uniswap V2 Router02 (Base deployment)
                router: address!("4752ba5DBc23f44D87826276BF6Fd6b1C372aD24"),
            },
        );
        m
    };
}

/// Assemble the immutable per-chain config, honoring an RPC override.
pub fn network_for_chain(chain_id: u64, rpc_override: Option<&str>) -> Option<NetworkConfig> {
    NETWORKS_BY_CHAIN.get(&chain_id).map(|spec| NetworkConfig {
        chain_id,
        name: spec.name,
        rpc_url: rpc_override.unwrap_or(spec.default_rpc).to_string(),
        funding_margin_wei: spec.funding_margin_wei,
        priority_fee_wei: spec.priority_fee_wei,
        wrapped_native: spec.wrapped_native,
        router: spec.router,
    })
}

// =============================================================================
// STRIKE CONSTANTS
// =============================================================================

/// Worst-case gas-unit estimate for one executor triangularSwap call. Used
/// both to size the funding overhead and as the broadcast gas limit.
pub const STRIKE_GAS_UNITS: u64 = 450_000;

/// Base-fee floor when the node's estimate is unavailable or implausibly low.
pub const FALLBACK_FEE_WEI: u128 = 5_000_000_000; // 5 gwei

/// Native amount kept untouched regardless of opportunity size.
pub const SAFETY_RESERVE_WEI: u128 = 500_000_000_000_000; // 0.0005

/// Probe input for gem verification: exactly one unit of wrapped native.
pub const GEM_PROBE_AMOUNT_WEI: u128 = 1_000_000_000_000_000_000;

/// Minimum token units (assumed 18 decimals) one probe unit must buy for a
/// candidate to count as a gem: 100,000 whole tokens.
pub fn gem_min_out() -> U256 {
    U256::from(100_000u64) * U256::from(10u64).pow(U256::from(18u64))
}

/// Struck when a discovery candidate carries no resolved address. A single
/// fixed address across all networks: unresolved tickers repeatedly target
/// this token, which is deliberate discovery-mode behavior.
pub const FALLBACK_TOKEN: Address = address!("95aD61b0a150d79219dCF64E1E6Cc01f0B64C4cE");

/// Fixed quote asset for the executor's triangular path.
pub const QUOTE_TOKEN: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

/// Identifier the discovery loop submits once per network per cycle to probe
/// the fallback token.
pub const DISCOVERY_PLACEHOLDER: &str = "discovery";

// =============================================================================
// SCHEDULING DEFAULTS
// =============================================================================

pub const DEFAULT_POLL_SECS: u64 = 45;
pub const DEFAULT_HEALTH_PORT: u16 = 3000;
pub const STRIKE_QUEUE_CAPACITY: usize = 64;
pub const STRIKE_WORKERS: usize = 4;
pub const SIGNAL_TIMEOUT_SECS: u64 = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_chain_has_a_network_spec() {
        for chain in SUPPORTED_CHAINS {
            let net = network_for_chain(chain, None).expect("registry entry");
            assert_eq!(net.chain_id, chain);
            assert!(net.funding_margin_wei > 0);
            assert!(!net.rpc_url.is_empty());
        }
        assert!(network_for_chain(4242, None).is_none());
    }

    #[test]
    fn rpc_override_replaces_default() {
        let net = network_for_chain(CHAIN_ETHEREUM, Some("http://localhost:8545")).unwrap();
        assert_eq!(net.rpc_url, "http://localhost:8545");
    }
}
