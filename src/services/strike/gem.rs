// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::retry::retry_async;
use crate::domain::constants::{gem_min_out, GEM_PROBE_AMOUNT_WEI};
use crate::infrastructure::data::contracts::SwapRouter;
use crate::infrastructure::network::wallet::WalletContext;
use alloy::primitives::{Address, U256};
use std::time::Duration;

/// Threshold check for one quoted output. A gem is a token where one unit of
/// wrapped native buys at least the minimum token count: a low unit value /
/// high supply heuristic aimed at fresh listings, not a security audit.
pub fn is_gem(quoted_out: U256) -> bool {
    !quoted_out.is_zero() && quoted_out >= gem_min_out()
}

/// Point-in-time verification against the network's router. Never cached;
/// liquidity can appear or vanish between polling cycles. Every failure mode
/// (revert, transport error, empty amounts) rejects.
pub async fn verify(wallet: &WalletContext, token: Address) -> bool {
    let router = SwapRouter::new(wallet.network.router, wallet.provider.clone());
    let path = vec![wallet.network.wrapped_native, token];
    let probe = U256::from(GEM_PROBE_AMOUNT_WEI);

    let amounts: Vec<U256> = match retry_async(
        move |_| {
            let c = router.clone();
            let p = path.clone();
            async move { c.getAmountsOut(probe, p).call().await }
        },
        3,
        Duration::from_millis(100),
    )
    .await
    {
        Ok(a) => a,
        Err(e) => {
            tracing::debug!(
                target: "gem",
                chain_id = wallet.network.chain_id,
                token = %format!("{:#x}", token),
                error = %e,
                "Quote failed; rejecting candidate"
            );
            return false;
        }
    };

    match amounts.last() {
        Some(out) => is_gem(*out),
        None => false,
    }
}
