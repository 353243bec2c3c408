//! Lenient decoding of monetary amounts.
//!
//! Amounts arrive as JSON numbers, numeric strings, empty strings or `null`.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

fn parse<E: serde::de::Error>(raw: RawAmount) -> Result<Option<BigDecimal>, E> {
    let text = match raw {
        RawAmount::Number(number) => number.to_string(),
        RawAmount::Text(text) if text.trim().is_empty() => return Ok(None),
        RawAmount::Text(text) => text.trim().to_owned(),
    };

    BigDecimal::from_str(&text)
        .map(Some)
        .map_err(|_| E::custom(format!("invalid amount: {text}")))
}

/// Deserializes an optional amount; absent, `null` and `""` become `None`.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawAmount>::deserialize(deserializer)? {
        Some(raw) => parse(raw),
        None => Ok(None),
    }
}

/// Parses a user-supplied amount, returning `None` for blank input.
pub fn parse_input(input: &str) -> Option<BigDecimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    BigDecimal::from_str(trimmed).ok()
}
