//! Etherscan `stats/tokensupply` payloads
//!
//! The result is the token's total supply in base units. It is not a holder
//! count and never fills `holder_count`.

use serde_json::Value;

use crate::domain::metrics::TokenMetrics;
use crate::ports::Provider;

use super::fields::{decimal_at, lookup, string_at};
use super::ParseError;

pub fn parse_token_supply(body: &Value) -> Result<TokenMetrics, ParseError> {
    let status_ok = match lookup(body, &["status"]) {
        Some(Value::String(s)) => s.trim() == "1",
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    };

    if !status_ok {
        // Etherscan puts the error text in `result` when the call fails
        let message = string_at(body, &["message"]).unwrap_or_else(|| "NOTOK".to_string());
        let detail = string_at(body, &["result"]).unwrap_or_default();
        return Err(ParseError::MalformedResponse {
            provider: Provider::Etherscan,
            reason: format!("{} {}", message, detail).trim().to_string(),
        });
    }

    let total_supply = decimal_at(body, &["result"])?.ok_or_else(|| ParseError::MalformedResponse {
        provider: Provider::Etherscan,
        reason: "missing result".to_string(),
    })?;

    Ok(TokenMetrics {
        total_supply: Some(total_supply),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_token_supply() {
        let body = json!({"status": "1", "message": "OK", "result": "21265524714464"});
        let metrics = parse_token_supply(&body).unwrap();
        assert_eq!(metrics.total_supply, Some(dec!(21265524714464)));
        assert_eq!(metrics.holder_count, None);
        assert!(!metrics.is_price_bearing());
    }

    #[test]
    fn test_error_status() {
        let body = json!({"status": "0", "message": "NOTOK", "result": "Invalid API Key"});
        match parse_token_supply(&body) {
            Err(ParseError::MalformedResponse { provider, reason }) => {
                assert_eq!(provider, Provider::Etherscan);
                assert_eq!(reason, "NOTOK Invalid API Key");
            }
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_status_is_malformed() {
        assert!(parse_token_supply(&json!({"result": "5"})).is_err());
    }

    #[test]
    fn test_non_numeric_result() {
        let body = json!({"status": "1", "message": "OK", "result": "0xdeadbeef"});
        assert!(matches!(
            parse_token_supply(&body),
            Err(ParseError::InvalidNumericField { .. })
        ));
    }
}
