// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use clap::Parser;
use gemstrike::app::config::GlobalSettings;
use gemstrike::app::logging::setup_logging;
use gemstrike::domain::constants::{STRIKE_QUEUE_CAPACITY, STRIKE_WORKERS};
use gemstrike::domain::error::AppError;
use gemstrike::infrastructure::network::wallet::WalletRegistry;
use gemstrike::services::health::{spawn_health_server, HealthState};
use gemstrike::services::signals::sentry::spawn_sentry;
use gemstrike::services::signals::web_intel::IntelClient;
use gemstrike::services::strike::discovery::{spawn_workers, DiscoveryLoop};
use gemstrike::services::strike::executor::{StrikeExecutor, StrikeStats};
use gemstrike::services::strike::queue::StrikeQueue;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "gemstrike opportunity agent")]
struct Cli {
    /// Path to config file (default: config.{toml,yaml,...})
    #[arg(long)]
    config: Option<String>,

    /// Verify and simulate strikes, never broadcast
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Health endpoint port (overrides config/env)
    #[arg(long)]
    health_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let settings = GlobalSettings::load_with_path(cli.config.as_deref())?;
    setup_logging(if settings.debug { "debug" } else { "info" }, false);

    // Both are startup-fatal; the discovery loop must not start without them.
    let signer = settings.signing_key()?;
    let executor_address = settings.executor()?;

    let dry_run = cli.dry_run || settings.dry_run;
    let mode = if dry_run { "dry-run" } else { "live" };
    tracing::info!(
        target: "startup",
        wallet = %signer.address(),
        executor = %executor_address,
        mode,
        "gemstrike starting"
    );

    let registry = Arc::new(WalletRegistry::build(settings.networks(), &signer));
    if registry.is_empty() {
        tracing::warn!(
            target: "startup",
            "No network came up; the agent will idle until restarted"
        );
    }

    let stats = Arc::new(StrikeStats::default());
    let sentry_config = settings.sentry_config();

    spawn_health_server(
        cli.health_port.unwrap_or(settings.health_port),
        HealthState {
            mode,
            sentry_active: sentry_config.is_some(),
            stats: stats.clone(),
        },
    )
    .await;

    let queue = Arc::new(StrikeQueue::new(STRIKE_QUEUE_CAPACITY));
    let executor = Arc::new(StrikeExecutor::new(
        registry.clone(),
        executor_address,
        stats,
        dry_run,
    ));
    spawn_workers(STRIKE_WORKERS, queue.clone(), executor);

    match sentry_config {
        Some(config) => {
            spawn_sentry(config, queue.clone(), registry.chain_ids());
        }
        None => {
            tracing::info!(target: "startup", "Messaging sentry disabled (no credentials)");
        }
    }

    let intel = IntelClient::new()?;
    let discovery = DiscoveryLoop::new(
        intel,
        queue,
        registry.chain_ids(),
        settings.poll_interval(),
    );

    // Last resort: an unexpected exit of the loop surfaces as process failure.
    discovery.run().await
}
