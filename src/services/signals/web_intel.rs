// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::constants::SIGNAL_TIMEOUT_SECS;
use crate::domain::error::AppError;
use std::time::Duration;

pub struct IntelSource {
    pub name: &'static str,
    pub url: &'static str,
}

/// Fixed web-intelligence endpoints. Responses are treated as opaque text and
/// mined for the first cashtag; the JSON shape is never parsed.
pub const INTEL_SOURCES: &[IntelSource] = &[
    IntelSource {
        name: "coingecko_trending",
        url: "https://api.coingecko.com/api/v3/search/trending",
    },
    IntelSource {
        name: "dexscreener_boosts",
        url: "https://api.dexscreener.com/token-boosts/latest/v1",
    },
    IntelSource {
        name: "cryptomoonshots",
        url: "https://www.reddit.com/r/CryptoMoonShots/new.json?limit=25",
    },
];

#[derive(Clone)]
pub struct IntelClient {
    http: reqwest::Client,
}

impl IntelClient {
    pub fn new() -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(SIGNAL_TIMEOUT_SECS))
            .user_agent(concat!("gemstrike/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Initialization(format!("HTTP client build failed: {}", e)))?;
        Ok(Self { http })
    }

    pub async fn fetch(&self, source: &IntelSource) -> Result<String, AppError> {
        let resp = self
            .http
            .get(source.url)
            .send()
            .await
            .map_err(|e| AppError::Connection(format!("{} fetch failed: {}", source.name, e)))?;

        if !resp.status().is_success() {
            return Err(AppError::ApiCall {
                provider: source.name.into(),
                status: resp.status().as_u16(),
            });
        }

        resp.text()
            .await
            .map_err(|e| AppError::Connection(format!("{} body read failed: {}", source.name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_are_https_and_uniquely_named() {
        let mut names: Vec<&str> = INTEL_SOURCES.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), INTEL_SOURCES.len());
        for source in INTEL_SOURCES {
            assert!(source.url.starts_with("https://"), "{}", source.name);
        }
    }
}
