// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::parsing::resolve_token;
use crate::domain::constants::{QUOTE_TOKEN, STRIKE_GAS_UNITS};
use crate::domain::error::BroadcastFailure;
use crate::infrastructure::data::contracts::TriangularExecutor;
use crate::infrastructure::network::wallet::{WalletContext, WalletRegistry};
use crate::services::strike::funding::{self, FundingVerdict, StrikeMetrics};
use crate::services::strike::gem;
use alloy::consensus::{SignableTransaction, TxEip1559, TxEnvelope};
use alloy::eips::eip2718::Encodable2718;
use alloy::eips::eip2930::AccessList;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, Bytes, TxKind, B256};
use alloy::providers::Provider;
use alloy::rpc::types::eth::{TransactionInput, TransactionRequest};
use alloy::sol_types::SolCall;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Terminal classification of one strike attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeOutcome {
    /// No wallet for the network; skipped silently.
    SkippedNoWallet,
    /// Candidate failed gem verification.
    GemRejected,
    /// Funding gate abstained.
    NoFunds,
    /// Simulation or broadcast rejected the call; nothing but gas at risk.
    Reverted,
    /// Balance moved between the gate check and the broadcast.
    InsufficientFunds,
    /// Transaction accepted by the node.
    Submitted(B256),
}

impl StrikeOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            StrikeOutcome::SkippedNoWallet => "no_wallet",
            StrikeOutcome::GemRejected => "gem_rejected",
            StrikeOutcome::NoFunds => "no_funds",
            StrikeOutcome::Reverted => "reverted",
            StrikeOutcome::InsufficientFunds => "insufficient_funds",
            StrikeOutcome::Submitted(_) => "submitted",
        }
    }
}

/// Process-lifetime counters, surfaced by the health endpoint.
#[derive(Default)]
pub struct StrikeStats {
    pub attempted: AtomicU64,
    pub submitted: AtomicU64,
    pub gem_rejected: AtomicU64,
    pub no_funds: AtomicU64,
    pub reverted: AtomicU64,
    pub insufficient_funds: AtomicU64,
}

impl StrikeStats {
    fn record(&self, outcome: &StrikeOutcome) {
        let counter = match outcome {
            StrikeOutcome::SkippedNoWallet => return,
            StrikeOutcome::GemRejected => &self.gem_rejected,
            StrikeOutcome::NoFunds => &self.no_funds,
            StrikeOutcome::Reverted => &self.reverted,
            StrikeOutcome::InsufficientFunds => &self.insufficient_funds,
            StrikeOutcome::Submitted(_) => &self.submitted,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

pub struct StrikeExecutor {
    registry: Arc<WalletRegistry>,
    executor_address: Address,
    stats: Arc<StrikeStats>,
    dry_run: bool,
}

impl StrikeExecutor {
    pub fn new(
        registry: Arc<WalletRegistry>,
        executor_address: Address,
        stats: Arc<StrikeStats>,
        dry_run: bool,
    ) -> Self {
        Self {
            registry,
            executor_address,
            stats,
            dry_run,
        }
    }

    /// One attempt for one (network, candidate) pair: verify, gate, build,
    /// simulate, broadcast. Short-circuits on the first failing stage and
    /// never retries; the next polling cycle produces a fresh attempt.
    pub async fn attempt(&self, chain_id: u64, identifier: &str) -> StrikeOutcome {
        self.stats.attempted.fetch_add(1, Ordering::Relaxed);

        let Some(wallet) = self.registry.get(chain_id) else {
            return self.finish(chain_id, identifier, StrikeOutcome::SkippedNoWallet);
        };

        let token = resolve_token(identifier);

        if !gem::verify(wallet, token).await {
            return self.finish(chain_id, identifier, StrikeOutcome::GemRejected);
        }

        let metrics = match funding::evaluate(wallet).await {
            FundingVerdict::Cleared(m) => m,
            verdict @ FundingVerdict::NoFunds { .. } => {
                tracing::info!(
                    target: "strike",
                    chain_id,
                    token = %format!("{:#x}", token),
                    deficit = %verdict.deficit().unwrap_or_default(),
                    "Funding gate abstained"
                );
                return self.finish(chain_id, identifier, StrikeOutcome::NoFunds);
            }
        };

        let outcome = self.fire(wallet, token, metrics).await;
        self.finish(chain_id, identifier, outcome)
    }

    async fn fire(
        &self,
        wallet: &WalletContext,
        token: Address,
        metrics: StrikeMetrics,
    ) -> StrikeOutcome {
        let calldata = TriangularExecutor::triangularSwapCall {
            router: wallet.network.router,
            tokenIn: token,
            tokenOut: QUOTE_TOKEN,
            amountIn: metrics.capital,
        }
        .abi_encode();

        // Fresh pending-inclusive nonce right before the send; a stale value
        // would collide with this process's own prior strikes.
        let nonce = match wallet.pending_nonce().await {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(
                    target: "strike",
                    chain_id = wallet.network.chain_id,
                    error = %e,
                    "Nonce unavailable; abandoning attempt"
                );
                return StrikeOutcome::Reverted;
            }
        };

        let request = TransactionRequest {
            from: Some(wallet.signer.address()),
            to: Some(TxKind::Call(self.executor_address)),
            max_fee_per_gas: Some(metrics.max_fee_per_gas),
            max_priority_fee_per_gas: Some(metrics.max_priority_fee_per_gas),
            gas: Some(STRIKE_GAS_UNITS),
            value: Some(metrics.capital),
            input: TransactionInput::new(calldata.clone().into()),
            nonce: Some(nonce),
            chain_id: Some(wallet.network.chain_id),
            ..Default::default()
        };

        // Read-only rehearsal before committing capital. A failure here is
        // classified like a revert and the transaction is never sent.
        if let Err(e) = wallet.provider.call(request).await {
            tracing::info!(
                target: "strike",
                chain_id = wallet.network.chain_id,
                token = %format!("{:#x}", token),
                reason = %e,
                "Simulation rejected strike"
            );
            return StrikeOutcome::Reverted;
        }

        let (raw, tx_hash) = match self.sign(wallet, nonce, metrics, calldata) {
            Ok(signed) => signed,
            Err(reason) => {
                tracing::warn!(
                    target: "strike",
                    chain_id = wallet.network.chain_id,
                    reason = %reason,
                    "Signing failed; abandoning attempt"
                );
                return StrikeOutcome::Reverted;
            }
        };

        if self.dry_run {
            tracing::info!(
                target: "strike",
                chain_id = wallet.network.chain_id,
                token = %format!("{:#x}", token),
                capital = %metrics.capital,
                tx_hash = %tx_hash,
                "Dry-run: would broadcast strike"
            );
            return StrikeOutcome::Submitted(tx_hash);
        }

        match wallet.provider.send_raw_transaction(&raw).await {
            Ok(_) => StrikeOutcome::Submitted(tx_hash),
            Err(e) => match BroadcastFailure::classify(&e.to_string()) {
                BroadcastFailure::InsufficientFunds => {
                    tracing::warn!(
                        target: "strike",
                        chain_id = wallet.network.chain_id,
                        error = %e,
                        "Balance changed between gate and broadcast"
                    );
                    StrikeOutcome::InsufficientFunds
                }
                BroadcastFailure::Rejected => {
                    tracing::info!(
                        target: "strike",
                        chain_id = wallet.network.chain_id,
                        error = %e,
                        "Broadcast rejected; capital preserved"
                    );
                    StrikeOutcome::Reverted
                }
            },
        }
    }

    fn sign(
        &self,
        wallet: &WalletContext,
        nonce: u64,
        metrics: StrikeMetrics,
        calldata: Vec<u8>,
    ) -> Result<(Vec<u8>, B256), String> {
        let mut tx = TxEip1559 {
            chain_id: wallet.network.chain_id,
            nonce,
            max_priority_fee_per_gas: metrics.max_priority_fee_per_gas,
            max_fee_per_gas: metrics.max_fee_per_gas,
            gas_limit: STRIKE_GAS_UNITS,
            to: TxKind::Call(self.executor_address),
            value: metrics.capital,
            access_list: AccessList::default(),
            input: Bytes::from(calldata),
        };

        let sig = TxSignerSync::sign_transaction_sync(&wallet.signer, &mut tx)
            .map_err(|e| format!("sign tx failed: {e}"))?;
        let signed: TxEnvelope = tx.into_signed(sig).into();
        Ok((signed.encoded_2718(), *signed.tx_hash()))
    }

    fn finish(&self, chain_id: u64, identifier: &str, outcome: StrikeOutcome) -> StrikeOutcome {
        self.stats.record(&outcome);
        match outcome {
            StrikeOutcome::SkippedNoWallet => {}
            StrikeOutcome::Submitted(hash) => {
                tracing::info!(
                    target: "strike",
                    chain_id,
                    candidate = identifier,
                    tx_hash = %hash,
                    "Strike submitted"
                );
            }
            _ => {
                tracing::debug!(
                    target: "strike",
                    chain_id,
                    candidate = identifier,
                    outcome = outcome.label(),
                    "Strike attempt closed"
                );
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constants::FALLBACK_TOKEN;

    #[tokio::test]
    async fn attempt_without_wallet_skips_before_any_rpc() {
        let registry = Arc::new(WalletRegistry::build(Vec::new(), &alloy::signers::local::PrivateKeySigner::random()));
        let stats = Arc::new(StrikeStats::default());
        let executor = StrikeExecutor::new(
            registry,
            Address::from([0x11; 20]),
            stats.clone(),
            true,
        );

        let outcome = executor.attempt(1, "PEPE").await;
        assert_eq!(outcome, StrikeOutcome::SkippedNoWallet);
        assert_eq!(stats.attempted.load(Ordering::Relaxed), 1);
        assert_eq!(stats.submitted.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn outcome_labels_are_stable() {
        assert_eq!(StrikeOutcome::GemRejected.label(), "gem_rejected");
        assert_eq!(StrikeOutcome::Submitted(B256::ZERO).label(), "submitted");
    }

    #[test]
    fn unresolved_candidates_target_the_fallback_token() {
        assert_eq!(resolve_token("discovery"), FALLBACK_TOKEN);
    }
}
