// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::retry::retry_async;
use crate::domain::constants::FALLBACK_FEE_WEI;
use crate::domain::error::AppError;
use crate::infrastructure::network::provider::HttpProvider;
use alloy::providers::Provider;
use alloy::rpc::types::BlockNumberOrTag;
use std::time::Duration;

/// Reads the current base fee from the head block. The funding gate applies
/// its own volatility buffer on top, so no percentile machinery lives here.
#[derive(Clone)]
pub struct FeeOracle {
    provider: HttpProvider,
}

impl FeeOracle {
    pub fn new(provider: HttpProvider) -> Self {
        Self { provider }
    }

    /// Latest-block base fee in wei. Nodes that omit the field (pre-1559
    /// chains, some public RPCs) yield the conservative fallback constant; a
    /// transport failure is an error the caller treats as fail-closed.
    pub async fn base_fee(&self) -> Result<u128, AppError> {
        let provider = self.provider.clone();
        let block = retry_async(
            move |_| {
                let provider = provider.clone();
                async move { provider.get_block_by_number(BlockNumberOrTag::Latest).await }
            },
            3,
            Duration::from_millis(100),
        )
        .await
        .map_err(|e| AppError::Connection(format!("Latest block fetch failed: {}", e)))?;

        let base = block
            .as_ref()
            .and_then(|b| b.header.base_fee_per_gas)
            .map(|v| v as u128)
            .unwrap_or(FALLBACK_FEE_WEI);

        Ok(base)
    }
}
