// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! `key=value` policy parameter parsing.

use anyhow::{Result, bail};
use fluxion_types::PolicyParameters;
use serde_json::Value;

/// Parse one `key=value` pair. The value is read as JSON and falls back to a
/// plain string when it is not valid JSON.
pub fn parse_param(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Invalid parameter '{raw}': expected KEY=VALUE");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Invalid parameter '{raw}': empty name");
    }
    let value = value.trim();
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok((key.to_owned(), value))
}

/// Parse every `--param` occurrence; later occurrences win
pub fn parse_params(raw: &[String]) -> Result<PolicyParameters> {
    let mut parameters = PolicyParameters::new();
    for item in raw {
        let (key, value) = parse_param(item)?;
        parameters.insert(key, value);
    }
    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_types() {
        assert_eq!(parse_param("window_size=20").unwrap(), ("window_size".to_owned(), json!(20)));
        assert_eq!(parse_param("level=2.5").unwrap().1, json!(2.5));
        assert_eq!(parse_param("enabled=true").unwrap().1, json!(true));
        assert_eq!(parse_param("bands=[1, 2]").unwrap().1, json!([1, 2]));
        assert_eq!(parse_param("label=\"quoted\"").unwrap().1, json!("quoted"));
        assert_eq!(parse_param("label=fast").unwrap().1, json!("fast"));
        assert_eq!(parse_param(" sell_above = 40 ").unwrap(), ("sell_above".to_owned(), json!(40)));
    }

    #[test]
    fn test_value_may_contain_equals() {
        assert_eq!(parse_param("expr=a=b").unwrap().1, json!("a=b"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse_param("window_size").is_err());
        assert!(parse_param("=5").is_err());
    }

    #[test]
    fn test_later_params_win() {
        let params = parse_params(&["a=1".to_owned(), "b=2".to_owned(), "a=3".to_owned()]).unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some(&json!(3)));
    }
}
