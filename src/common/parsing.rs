// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::constants::FALLBACK_TOKEN;
use alloy::primitives::Address;
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;

lazy_static! {
    // Cashtag-style tickers: "$" followed by uppercase letters.
    static ref TICKER_RE: Regex = Regex::new(r"\$([A-Z]{2,10})\b").expect("ticker regex");
}

/// First ticker-like token in a blob of signal text, without the `$` prefix.
/// Only the first match matters; the rest of the payload is ignored.
pub fn first_ticker(text: &str) -> Option<String> {
    TICKER_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Whether an identifier already carries a resolved on-chain address.
pub fn is_address_shaped(identifier: &str) -> bool {
    let body = strip_0x(identifier);
    body.len() == 40 && body.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Resolve a candidate identifier to a strike target. Address-shaped
/// identifiers are used as-is; everything else (tickers, the discovery
/// placeholder) substitutes the fixed fallback token.
pub fn resolve_token(identifier: &str) -> Address {
    let trimmed = identifier.trim();
    if is_address_shaped(trimmed) {
        if let Ok(addr) = Address::from_str(strip_0x(trimmed)) {
            return addr;
        }
    }
    FALLBACK_TOKEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn first_ticker_takes_the_first_match_only() {
        assert_eq!(
            first_ticker("new gem alert $PEPE then $WIF mooning"),
            Some("PEPE".to_string())
        );
        assert_eq!(first_ticker("{\"title\":\"buy $MOON now\"}"), Some("MOON".to_string()));
    }

    #[test]
    fn first_ticker_ignores_lowercase_and_bare_dollar() {
        assert_eq!(first_ticker("$pepe is not a cashtag"), None);
        assert_eq!(first_ticker("price is $ 100"), None);
        assert_eq!(first_ticker("nothing here"), None);
    }

    #[test]
    fn address_shaped_identifiers_resolve_to_themselves() {
        let addr = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
        assert!(is_address_shaped(addr));
        assert_eq!(
            resolve_token(addr),
            address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")
        );
    }

    #[test]
    fn tickers_and_placeholders_substitute_the_fallback_token() {
        assert!(!is_address_shaped("PEPE"));
        assert_eq!(resolve_token("PEPE"), FALLBACK_TOKEN);
        assert_eq!(resolve_token("discovery"), FALLBACK_TOKEN);
        // Malformed hex of the right length still falls back.
        assert_eq!(resolve_token("0xZZZaaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"), FALLBACK_TOKEN);
    }
}
