//! Dexscreener pair payloads
//!
//! The pairs endpoint answers with a single `pair` object; the tokens
//! endpoint answers with a `pairs` array. Either is accepted, first pair
//! wins.

use serde_json::Value;

use crate::domain::metrics::TokenMetrics;
use crate::ports::Provider;

use super::fields::{decimal_at, lookup};
use super::ParseError;

fn pair_object(body: &Value) -> Option<&Value> {
    if let Some(pair) = lookup(body, &["pair"]).filter(|p| p.is_object()) {
        return Some(pair);
    }
    lookup(body, &["pairs"])
        .and_then(Value::as_array)
        .and_then(|pairs| pairs.first())
        .filter(|p| p.is_object())
}

/// Price-bearing token metrics from a Dexscreener response
pub fn parse_pair(body: &Value) -> Result<TokenMetrics, ParseError> {
    let pair = pair_object(body).ok_or_else(|| ParseError::MalformedResponse {
        provider: Provider::Dexscreener,
        reason: "no pair object in response (token not found)".to_string(),
    })?;

    Ok(TokenMetrics {
        price_usd: decimal_at(pair, &["priceUsd"])?,
        liquidity_usd: decimal_at(pair, &["liquidity", "usd"])?,
        volume_24h_usd: decimal_at(pair, &["volume", "h24"])?,
        price_change_24h_pct: decimal_at(pair, &["priceChange", "h24"])?,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn pair_body() -> Value {
        json!({
            "schemaVersion": "1.0.0",
            "pair": {
                "chainId": "ethereum",
                "dexId": "uniswap",
                "priceUsd": "2.0",
                "liquidity": {"usd": 5000, "base": 1200, "quote": 2.5},
                "volume": {"h24": 18250.75, "h6": 4000},
                "priceChange": {"h24": -12.4},
                "baseToken": {"name": "Pepe", "symbol": "PEPE"}
            }
        })
    }

    #[test]
    fn test_parse_pair() {
        let metrics = parse_pair(&pair_body()).unwrap();
        assert_eq!(metrics.price_usd, Some(dec!(2.0)));
        assert_eq!(metrics.liquidity_usd, Some(dec!(5000)));
        assert_eq!(metrics.volume_24h_usd, Some(dec!(18250.75)));
        assert_eq!(metrics.price_change_24h_pct, Some(dec!(-12.4)));
        // Dexscreener never supplies holder or naming data here
        assert_eq!(metrics.holder_count, None);
        assert_eq!(metrics.name, None);
        assert_eq!(metrics.symbol, None);
    }

    #[test]
    fn test_parse_pairs_array_takes_first() {
        let body = json!({
            "pairs": [
                {"priceUsd": "0.5", "liquidity": {"usd": "20000"}},
                {"priceUsd": "9.9"}
            ]
        });
        let metrics = parse_pair(&body).unwrap();
        assert_eq!(metrics.price_usd, Some(dec!(0.5)));
        assert_eq!(metrics.liquidity_usd, Some(dec!(20000)));
        assert_eq!(metrics.volume_24h_usd, None);
    }

    #[test]
    fn test_missing_pair_is_malformed() {
        for body in [
            json!({"schemaVersion": "1.0.0"}),
            json!({"pair": null}),
            json!({"pairs": []}),
            json!({"pairs": null}),
        ] {
            assert!(matches!(
                parse_pair(&body),
                Err(ParseError::MalformedResponse { provider: Provider::Dexscreener, .. })
            ));
        }
    }

    #[test]
    fn test_bad_price_names_the_field() {
        let body = json!({"pair": {"priceUsd": "N/A"}});
        match parse_pair(&body) {
            Err(ParseError::InvalidNumericField { field, .. }) => assert_eq!(field, "priceUsd"),
            other => panic!("expected InvalidNumericField, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_nested_fields_are_absent() {
        let body = json!({"pair": {"priceUsd": "1.25", "liquidity": {}, "volume": null}});
        let metrics = parse_pair(&body).unwrap();
        assert_eq!(metrics.price_usd, Some(dec!(1.25)));
        assert_eq!(metrics.liquidity_usd, None);
        assert_eq!(metrics.volume_24h_usd, None);
        assert_eq!(metrics.price_change_24h_pct, None);
    }
}
