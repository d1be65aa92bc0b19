// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::retry::retry_async;
use crate::domain::constants::NetworkConfig;
use crate::domain::error::AppError;
use crate::infrastructure::network::gas::FeeOracle;
use crate::infrastructure::network::provider::{ConnectionFactory, HttpProvider};
use alloy::primitives::U256;
use alloy::providers::Provider;
use alloy::signers::local::PrivateKeySigner;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Signing identity bound to one network's connection. Built once at startup;
/// a network that fails to connect stays disabled for the process lifetime.
pub struct WalletContext {
    pub network: NetworkConfig,
    pub provider: HttpProvider,
    pub signer: PrivateKeySigner,
    pub fee_oracle: FeeOracle,
}

impl WalletContext {
    pub fn connect(network: NetworkConfig, signer: PrivateKeySigner) -> Result<Self, AppError> {
        let provider = ConnectionFactory::http(&network.rpc_url)?;
        let fee_oracle = FeeOracle::new(provider.clone());
        Ok(Self {
            network,
            provider,
            signer,
            fee_oracle,
        })
    }

    pub async fn native_balance(&self) -> Result<U256, AppError> {
        let provider = self.provider.clone();
        let address = self.signer.address();
        retry_async(
            move |_| {
                let provider = provider.clone();
                async move { provider.get_balance(address).await }
            },
            3,
            Duration::from_millis(100),
        )
        .await
        .map_err(|e| AppError::Connection(format!("Balance fetch failed: {}", e)))
    }

    /// Pending-inclusive nonce, fetched fresh immediately before every send.
    /// Never cached: concurrent attempts on the same network must see each
    /// other's in-flight transactions.
    pub async fn pending_nonce(&self) -> Result<u64, AppError> {
        let provider = self.provider.clone();
        let address = self.signer.address();
        retry_async(
            move |_| {
                let provider = provider.clone();
                async move { provider.get_transaction_count(address).pending().await }
            },
            3,
            Duration::from_millis(100),
        )
        .await
        .map_err(|e| AppError::Connection(format!("Failed to fetch nonce: {}", e)))
    }
}

/// Explicit per-network wallet map, constructed once and passed by reference.
/// A chain missing from the map means strikes there are permanently disabled.
pub struct WalletRegistry {
    wallets: HashMap<u64, Arc<WalletContext>>,
}

impl WalletRegistry {
    pub fn build(
        networks: Vec<NetworkConfig>,
        signer: &PrivateKeySigner,
    ) -> Self {
        let mut wallets = HashMap::new();
        for network in networks {
            let chain_id = network.chain_id;
            let name = network.name;
            match WalletContext::connect(network, signer.clone()) {
                Ok(ctx) => {
                    tracing::info!(
                        target: "wallet",
                        chain_id,
                        network = name,
                        address = %ctx.signer.address(),
                        "Wallet ready"
                    );
                    wallets.insert(chain_id, Arc::new(ctx));
                }
                Err(e) => {
                    tracing::warn!(
                        target: "wallet",
                        chain_id,
                        network = name,
                        error = %e,
                        "Wallet setup failed; strikes disabled on this network"
                    );
                }
            }
        }
        Self { wallets }
    }

    pub fn get(&self, chain_id: u64) -> Option<&Arc<WalletContext>> {
        self.wallets.get(&chain_id)
    }

    pub fn chain_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.wallets.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constants::{network_for_chain, CHAIN_ETHEREUM};

    #[test]
    fn registry_skips_networks_with_bad_rpc_urls() {
        let signer = PrivateKeySigner::random();
        let good = network_for_chain(CHAIN_ETHEREUM, Some("http://127.0.0.1:8545")).unwrap();
        let bad = network_for_chain(CHAIN_ETHEREUM, Some("not a url")).map(|mut n| {
            n.chain_id = 999;
            n
        });

        let registry = WalletRegistry::build(vec![good, bad.unwrap()], &signer);
        assert!(registry.get(CHAIN_ETHEREUM).is_some());
        assert!(registry.get(999).is_none());
        assert_eq!(registry.chain_ids(), vec![CHAIN_ETHEREUM]);
    }
}
