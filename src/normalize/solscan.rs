//! Solscan token-meta and account payloads
//!
//! The public API reports lookups that found nothing through a top-level
//! `status` other than 1; the newer API wraps results in
//! `{"success": bool, "data": {...}}`. Both envelopes are handled.

use serde_json::Value;

use crate::domain::metrics::{Holding, TokenMetrics, WalletMetrics};
use crate::ports::Provider;

use super::fields::{count_at, decimal_at, decimal_value, lookup, string_at};
use super::ParseError;

fn malformed(provider: Provider, reason: impl Into<String>) -> ParseError {
    ParseError::MalformedResponse {
        provider,
        reason: reason.into(),
    }
}

fn status_ok(status: &Value) -> bool {
    match status {
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => s.trim() == "1",
        Value::Bool(b) => *b,
        _ => false,
    }
}

/// Check the envelope and return the object holding the entity fields
fn unwrap_envelope(provider: Provider, body: &Value) -> Result<&Value, ParseError> {
    if !body.is_object() {
        return Err(malformed(provider, "response is not a JSON object"));
    }
    if let Some(status) = lookup(body, &["status"]) {
        if !status_ok(status) {
            return Err(malformed(provider, format!("not found (status {})", status)));
        }
    }
    if lookup(body, &["success"]).and_then(Value::as_bool) == Some(false) {
        return Err(malformed(provider, "not found (success = false)"));
    }

    match lookup(body, &["data"]) {
        Some(data) if data.is_object() => Ok(data),
        Some(_) => Err(malformed(provider, "data field is not an object")),
        None => Ok(body),
    }
}

/// Name, symbol and holder count from a token-meta response
pub fn parse_token_meta(body: &Value) -> Result<TokenMetrics, ParseError> {
    let data = unwrap_envelope(Provider::SolscanTokenMeta, body)?;

    let holder_count = match count_at(data, &["holder_count"])? {
        Some(count) => Some(count),
        None => count_at(data, &["holder"])?,
    };

    Ok(TokenMetrics {
        name: string_at(data, &["name"]),
        symbol: string_at(data, &["symbol"]),
        holder_count,
        ..Default::default()
    })
}

fn parse_holdings(data: &Value) -> Result<Vec<Holding>, ParseError> {
    let Some(tokens) = lookup(data, &["tokens"]) else {
        return Ok(Vec::new());
    };
    let tokens = tokens
        .as_array()
        .ok_or_else(|| malformed(Provider::SolscanAccount, "tokens field is not an array"))?;

    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| -> Result<Holding, ParseError> {
            let token_address = string_at(token, &["tokenAddress"])
                .or_else(|| string_at(token, &["token_address"]))
                .ok_or_else(|| {
                    malformed(
                        Provider::SolscanAccount,
                        format!("holding {} has no token address", i),
                    )
                })?;
            let amount = lookup(token, &["amount"]).ok_or_else(|| {
                malformed(Provider::SolscanAccount, format!("holding {} has no amount", i))
            })?;
            let amount = decimal_value(&format!("tokens[{}].amount", i), amount)?;

            Ok(Holding::new(token_address, amount))
        })
        .collect()
}

/// Wallet metrics from an account response.
///
/// `subject` is the address that was queried; it is used when the payload
/// does not echo the address back.
pub fn parse_account(subject: &str, body: &Value) -> Result<WalletMetrics, ParseError> {
    let data = unwrap_envelope(Provider::SolscanAccount, body)?;

    let address = string_at(data, &["address"])
        .or_else(|| string_at(data, &["account"]))
        .unwrap_or_else(|| subject.trim().to_string());

    // Absent counters mean a wallet with no recorded activity
    let transaction_count = count_at(data, &["tx_count"])?.unwrap_or(0);
    let total_balance = match lookup(data, &["balance"]) {
        Some(balance) if balance.is_object() => decimal_at(balance, &["total"])?,
        Some(balance) => Some(decimal_value("balance", balance)?),
        None => None,
    }
    .unwrap_or_default();

    let holdings = parse_holdings(data)?;

    WalletMetrics::new(address, transaction_count, total_balance, holdings)
        .map_err(|e| malformed(Provider::SolscanAccount, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    const WALLET: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

    #[test]
    fn test_token_meta() {
        let body = json!({
            "status": 1,
            "name": "Bonk",
            "symbol": "BONK",
            "holder_count": 300,
            "decimals": 5
        });
        let metrics = parse_token_meta(&body).unwrap();
        assert_eq!(metrics.name.as_deref(), Some("Bonk"));
        assert_eq!(metrics.symbol.as_deref(), Some("BONK"));
        assert_eq!(metrics.holder_count, Some(300));
        assert!(!metrics.is_price_bearing());
        assert_eq!(metrics.liquidity_usd, None);
    }

    #[test]
    fn test_token_meta_v2_envelope() {
        let body = json!({
            "success": true,
            "data": {"name": "Jito", "symbol": "JTO", "holder": "15023"}
        });
        let metrics = parse_token_meta(&body).unwrap();
        assert_eq!(metrics.symbol.as_deref(), Some("JTO"));
        assert_eq!(metrics.holder_count, Some(15023));
    }

    #[test]
    fn test_token_meta_missing_holders_stays_unknown() {
        let body = json!({"name": "Mystery"});
        let metrics = parse_token_meta(&body).unwrap();
        assert_eq!(metrics.holder_count, None);
        assert_eq!(metrics.symbol, None);
    }

    #[test]
    fn test_not_found_status_is_malformed() {
        for body in [json!({"status": 0}), json!({"status": "404"}), json!({"success": false})] {
            assert!(matches!(
                parse_token_meta(&body),
                Err(ParseError::MalformedResponse { provider: Provider::SolscanTokenMeta, .. })
            ));
        }
    }

    #[test]
    fn test_account() {
        let body = json!({
            "status": 1,
            "tx_count": 40,
            "balance": {"total": "12.5"},
            "tokens": [
                {"tokenAddress": "MintB", "amount": "100"},
                {"tokenAddress": "MintA", "amount": 2.5}
            ]
        });
        let wallet = parse_account(WALLET, &body).unwrap();
        assert_eq!(wallet.address(), WALLET);
        assert_eq!(wallet.transaction_count(), 40);
        assert_eq!(wallet.total_balance(), dec!(12.5));

        // Provider order preserved, never folded into the balance
        let holdings = wallet.holdings();
        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings[0], Holding::new("MintB", dec!(100)));
        assert_eq!(holdings[1], Holding::new("MintA", dec!(2.5)));
    }

    #[test]
    fn test_account_defaults_missing_counters_to_zero() {
        let wallet = parse_account(WALLET, &json!({})).unwrap();
        assert_eq!(wallet.transaction_count(), 0);
        assert_eq!(wallet.total_balance(), dec!(0));
        assert!(wallet.holdings().is_empty());
    }

    #[test]
    fn test_account_prefers_payload_address() {
        let body = json!({"address": "EchoedAddress", "tx_count": "150"});
        let wallet = parse_account(WALLET, &body).unwrap();
        assert_eq!(wallet.address(), "EchoedAddress");
        assert_eq!(wallet.transaction_count(), 150);
    }

    #[test]
    fn test_account_without_any_address_is_malformed() {
        assert!(matches!(
            parse_account("", &json!({"tx_count": 3})),
            Err(ParseError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_account_bad_holding_amount() {
        let body = json!({"tokens": [{"tokenAddress": "MintA", "amount": "lots"}]});
        match parse_account(WALLET, &body) {
            Err(ParseError::InvalidNumericField { field, value }) => {
                assert_eq!(field, "tokens[0].amount");
                assert_eq!(value, "\"lots\"");
            }
            other => panic!("expected InvalidNumericField, got {:?}", other),
        }
    }

    #[test]
    fn test_account_negative_balance_is_malformed() {
        let body = json!({"balance": {"total": -1}});
        assert!(matches!(
            parse_account(WALLET, &body),
            Err(ParseError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_account_negative_tx_count() {
        let body = json!({"tx_count": -3});
        assert!(matches!(
            parse_account(WALLET, &body),
            Err(ParseError::InvalidNumericField { .. })
        ));
    }
}
