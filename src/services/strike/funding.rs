// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::domain::constants::{
    NetworkConfig, FALLBACK_FEE_WEI, SAFETY_RESERVE_WEI, STRIKE_GAS_UNITS,
};
use crate::infrastructure::network::wallet::WalletContext;
use alloy::primitives::U256;

/// Fee and capital figures for one strike attempt. Recomputed on every
/// attempt: balance and fee conditions shift between polling cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeMetrics {
    /// Native amount risked as the transaction value.
    pub capital: U256,
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingVerdict {
    Cleared(StrikeMetrics),
    NoFunds { required: U256, available: U256 },
}

impl FundingVerdict {
    pub fn deficit(&self) -> Option<U256> {
        match self {
            FundingVerdict::NoFunds {
                required,
                available,
            } => Some(required.saturating_sub(*available)),
            FundingVerdict::Cleared(_) => None,
        }
    }
}

/// Pure funding arithmetic, wei precision throughout.
///
/// Invariants: no-funds iff `balance < overhead + reserve`; otherwise
/// committed capital is exactly `balance - overhead`, where
/// `overhead = STRIKE_GAS_UNITS * effective_fee + funding_margin` and
/// `effective_fee = max(base_fee, fallback) * 1.20 + priority baseline`.
/// A computed capital of zero is additionally rejected: the executor call
/// carries its input as transaction value, and a zero-value swap can only
/// revert.
pub fn appraise(balance: U256, base_fee: u128, network: &NetworkConfig) -> FundingVerdict {
    let max_fee_per_gas = base_fee
        .max(FALLBACK_FEE_WEI)
        .saturating_mul(120)
        / 100
        + network.priority_fee_wei;

    let overhead = U256::from(STRIKE_GAS_UNITS)
        .saturating_mul(U256::from(max_fee_per_gas))
        .saturating_add(U256::from(network.funding_margin_wei));
    let required = overhead.saturating_add(U256::from(SAFETY_RESERVE_WEI));

    if balance < required {
        return FundingVerdict::NoFunds {
            required,
            available: balance,
        };
    }

    let capital = balance - overhead;
    if capital.is_zero() {
        return FundingVerdict::NoFunds {
            required,
            available: balance,
        };
    }

    FundingVerdict::Cleared(StrikeMetrics {
        capital,
        max_fee_per_gas,
        max_priority_fee_per_gas: network.priority_fee_wei,
    })
}

/// Absolute gate: once a token passes the gem filter, only this verdict may
/// abstain from striking. Any provider error evaluates as no-funds.
pub async fn evaluate(wallet: &WalletContext) -> FundingVerdict {
    let balance = match wallet.native_balance().await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                target: "funding",
                chain_id = wallet.network.chain_id,
                error = %e,
                "Balance unavailable; treating as no funds"
            );
            return FundingVerdict::NoFunds {
                required: U256::ZERO,
                available: U256::ZERO,
            };
        }
    };

    let base_fee = match wallet.fee_oracle.base_fee().await {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(
                target: "funding",
                chain_id = wallet.network.chain_id,
                error = %e,
                "Fee estimate unavailable; treating as no funds"
            );
            return FundingVerdict::NoFunds {
                required: U256::ZERO,
                available: balance,
            };
        }
    };

    appraise(balance, base_fee, &wallet.network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constants::{network_for_chain, CHAIN_ETHEREUM};

    fn net() -> NetworkConfig {
        network_for_chain(CHAIN_ETHEREUM, None).unwrap()
    }

    fn overhead_for(base_fee: u128, network: &NetworkConfig) -> U256 {
        let fee = base_fee.max(FALLBACK_FEE_WEI) * 120 / 100 + network.priority_fee_wei;
        U256::from(STRIKE_GAS_UNITS) * U256::from(fee) + U256::from(network.funding_margin_wei)
    }

    #[test]
    fn no_funds_iff_balance_below_overhead_plus_reserve() {
        let network = net();
        let base_fee = 20_000_000_000u128;
        let overhead = overhead_for(base_fee, &network);
        let required = overhead + U256::from(SAFETY_RESERVE_WEI);

        let below = appraise(required - U256::from(1), base_fee, &network);
        assert!(matches!(below, FundingVerdict::NoFunds { .. }));
        assert_eq!(below.deficit(), Some(U256::from(1)));

        let above = appraise(required + U256::from(777), base_fee, &network);
        match above {
            FundingVerdict::Cleared(m) => {
                assert_eq!(m.capital, required + U256::from(777) - overhead);
            }
            other => panic!("expected cleared, got {:?}", other),
        }
    }

    #[test]
    fn exact_boundary_passes_with_capital_equal_to_reserve() {
        let network = net();
        let base_fee = 20_000_000_000u128;
        let required = overhead_for(base_fee, &network) + U256::from(SAFETY_RESERVE_WEI);

        match appraise(required, base_fee, &network) {
            FundingVerdict::Cleared(m) => assert_eq!(m.capital, U256::from(SAFETY_RESERVE_WEI)),
            other => panic!("expected cleared at boundary, got {:?}", other),
        }
    }

    #[test]
    fn effective_fee_applies_buffer_and_baseline() {
        let network = net();
        let base_fee = 50_000_000_000u128;
        let balance = U256::from(10u64) * U256::from(10u64).pow(U256::from(18u64));

        match appraise(balance, base_fee, &network) {
            FundingVerdict::Cleared(m) => {
                assert_eq!(
                    m.max_fee_per_gas,
                    base_fee * 120 / 100 + network.priority_fee_wei
                );
                assert_eq!(m.max_priority_fee_per_gas, network.priority_fee_wei);
            }
            other => panic!("expected cleared, got {:?}", other),
        }
    }

    #[test]
    fn fallback_fee_is_the_floor_for_low_estimates() {
        let network = net();
        let balance = U256::from(10u64) * U256::from(10u64).pow(U256::from(18u64));

        match appraise(balance, 1, &network) {
            FundingVerdict::Cleared(m) => {
                assert_eq!(
                    m.max_fee_per_gas,
                    FALLBACK_FEE_WEI * 120 / 100 + network.priority_fee_wei
                );
            }
            other => panic!("expected cleared, got {:?}", other),
        }
    }

    #[test]
    fn appraisal_is_deterministic_for_unchanged_inputs() {
        let network = net();
        let balance = U256::from(123_456_789_000_000_000u64);
        let first = appraise(balance, 9_000_000_000, &network);
        for _ in 0..10 {
            assert_eq!(appraise(balance, 9_000_000_000, &network), first);
        }
    }

    #[test]
    fn zero_balance_reports_full_deficit() {
        let network = net();
        let verdict = appraise(U256::ZERO, 20_000_000_000, &network);
        let required = overhead_for(20_000_000_000, &network) + U256::from(SAFETY_RESERVE_WEI);
        assert_eq!(verdict.deficit(), Some(required));
    }
}
