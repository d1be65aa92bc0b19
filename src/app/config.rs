// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::constants::{
    network_for_chain, NetworkConfig, DEFAULT_HEALTH_PORT, DEFAULT_POLL_SECS, SUPPORTED_CHAINS,
};
use crate::domain::error::AppError;
use crate::services::signals::sentry::SentryConfig;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct GlobalSettings {
    // General
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_chains", deserialize_with = "deserialize_chain_list")]
    pub chains: Vec<u64>,

    // Identity; both required for the pipeline to start at all.
    pub wallet_key: Option<String>,
    pub executor_address: Option<Address>,

    // Per-chain RPC overrides, keyed by chain id.
    pub rpc_providers: Option<HashMap<String, String>>,

    // Sentry credentials; absence only disables the messaging listener.
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<i64>,

    // Scheduling
    #[serde(default = "default_health_port")]
    pub health_port: u16,
    #[serde(default = "default_poll_secs")]
    pub poll_secs: u64,
}

fn default_chains() -> Vec<u64> {
    SUPPORTED_CHAINS.to_vec()
}
fn default_health_port() -> u16 {
    DEFAULT_HEALTH_PORT
}
fn default_poll_secs() -> u64 {
    DEFAULT_POLL_SECS
}

/// Accept chain lists both as native arrays (file config) and as
/// comma-separated strings (environment variables).
fn deserialize_chain_list<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ChainList {
        List(Vec<u64>),
        Csv(String),
    }

    match ChainList::deserialize(deserializer)? {
        ChainList::List(v) => Ok(v),
        ChainList::Csv(s) => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<u64>().map_err(serde::de::Error::custom))
            .collect(),
    }
}

impl GlobalSettings {
    pub fn load_with_path(path: Option<&str>) -> Result<Self, AppError> {
        let mut builder = Config::builder();
        builder = match path {
            Some(p) => builder.add_source(File::with_name(p)),
            None => builder.add_source(File::with_name("config").required(false)),
        };
        let cfg = builder
            .add_source(Environment::with_prefix("GEMSTRIKE").separator("__"))
            .build()?;
        Ok(cfg.try_deserialize::<GlobalSettings>()?)
    }

    /// Startup-fatal when absent or malformed: without a signing credential
    /// there is nothing to strike with.
    pub fn signing_key(&self) -> Result<PrivateKeySigner, AppError> {
        let raw = self
            .wallet_key
            .as_deref()
            .ok_or_else(|| AppError::Config("wallet_key is not configured".into()))?;
        PrivateKeySigner::from_str(raw)
            .map_err(|e| AppError::Config(format!("Invalid wallet key: {}", e)))
    }

    /// Startup-fatal when absent: strikes go through one fixed executor.
    pub fn executor(&self) -> Result<Address, AppError> {
        self.executor_address
            .ok_or_else(|| AppError::Config("executor_address is not configured".into()))
    }

    /// Registry entries for the configured chains, RPC overrides applied.
    /// Unknown chain ids are skipped with a warning.
    pub fn networks(&self) -> Vec<NetworkConfig> {
        let mut networks = Vec::with_capacity(self.chains.len());
        for chain_id in &self.chains {
            let rpc_override = self
                .rpc_providers
                .as_ref()
                .and_then(|m| m.get(&chain_id.to_string()))
                .map(String::as_str);
            match network_for_chain(*chain_id, rpc_override) {
                Some(network) => networks.push(network),
                None => {
                    tracing::warn!(
                        target: "config",
                        chain_id,
                        "Unsupported chain id in config; skipping"
                    );
                }
            }
        }
        networks
    }

    pub fn sentry_config(&self) -> Option<SentryConfig> {
        self.telegram_bot_token
            .as_ref()
            .filter(|token| !token.is_empty())
            .map(|token| SentryConfig {
                bot_token: token.clone(),
                allowed_chat: self.telegram_chat_id,
            })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> GlobalSettings {
        GlobalSettings {
            debug: false,
            dry_run: false,
            chains: default_chains(),
            wallet_key: None,
            executor_address: None,
            rpc_providers: None,
            telegram_bot_token: None,
            telegram_chat_id: None,
            health_port: default_health_port(),
            poll_secs: default_poll_secs(),
        }
    }

    #[test]
    fn missing_wallet_key_is_fatal() {
        let settings = minimal();
        assert!(matches!(settings.signing_key(), Err(AppError::Config(_))));
        assert!(matches!(settings.executor(), Err(AppError::Config(_))));
    }

    #[test]
    fn missing_telegram_token_only_disables_the_sentry() {
        let settings = minimal();
        assert!(settings.sentry_config().is_none());

        let mut with_token = minimal();
        with_token.telegram_bot_token = Some("123:abc".into());
        with_token.telegram_chat_id = Some(-100);
        let sentry = with_token.sentry_config().unwrap();
        assert_eq!(sentry.allowed_chat, Some(-100));
    }

    #[test]
    fn networks_apply_rpc_overrides_and_skip_unknown_chains() {
        let mut settings = minimal();
        settings.chains = vec![1, 4242];
        settings.rpc_providers = Some(HashMap::from([(
            "1".to_string(),
            "http://127.0.0.1:8545".to_string(),
        )]));

        let networks = settings.networks();
        assert_eq!(networks.len(), 1);
        assert_eq!(networks[0].chain_id, 1);
        assert_eq!(networks[0].rpc_url, "http://127.0.0.1:8545");
    }

    #[test]
    fn chain_list_accepts_csv_strings() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(deserialize_with = "deserialize_chain_list")]
            chains: Vec<u64>,
        }
        let probe: Probe = serde_json::from_str(r#"{"chains":"1, 56,8453"}"#).unwrap();
        assert_eq!(probe.chains, vec![1, 56, 8453]);
        let probe: Probe = serde_json::from_str(r#"{"chains":[137]}"#).unwrap();
        assert_eq!(probe.chains, vec![137]);
    }
}
