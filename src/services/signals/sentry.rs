// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::common::parsing::first_ticker;
use crate::services::strike::queue::{SharedStrikeQueue, StrikeRequest};
use teloxide::prelude::*;
use tokio::task::JoinHandle;

/// Messaging sentry credentials. Absence disables the sentry; the core
/// pipeline is unaffected.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    pub bot_token: String,
    /// When set, only messages from this chat qualify.
    pub allowed_chat: Option<i64>,
}

/// Long-lived Telegram listener. Each qualifying message (first cashtag in
/// the text) queues one strike per enabled network. Sentry strikes interleave
/// with discovery strikes without mutual exclusion; duplicate (network,
/// token) attempts are evaluated independently by design.
pub fn spawn_sentry(
    config: SentryConfig,
    queue: SharedStrikeQueue,
    chains: Vec<u64>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let bot = Bot::new(&config.bot_token);
        let allowed_chat = config.allowed_chat.map(ChatId);
        tracing::info!(
            target: "sentry",
            chat_filter = ?config.allowed_chat,
            "Messaging sentry started"
        );

        teloxide::repl(bot, move |msg: Message| {
            let queue = queue.clone();
            let chains = chains.clone();
            async move {
                if let Some(allowed) = allowed_chat {
                    if msg.chat.id != allowed {
                        return respond(());
                    }
                }
                let Some(text) = msg.text() else {
                    return respond(());
                };
                let Some(ticker) = first_ticker(text) else {
                    return respond(());
                };

                tracing::info!(target: "sentry", ticker = %ticker, "Candidate observed");
                for chain_id in &chains {
                    let result = queue
                        .push(StrikeRequest {
                            chain_id: *chain_id,
                            identifier: ticker.clone(),
                            origin: "sentry",
                        })
                        .await;
                    if result.dropped_oldest {
                        tracing::warn!(
                            target: "sentry",
                            chain_id,
                            "Strike queue full; oldest request dropped"
                        );
                    }
                }
                respond(())
            }
        })
        .await;

        tracing::warn!(target: "sentry", "Messaging sentry terminated");
    })
}
