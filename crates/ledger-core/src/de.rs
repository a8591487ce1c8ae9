//! # Lenient Number Decoding
//!
//! Form-driven clients send decimals and ids either as JSON numbers or as the
//! raw text of an input field (`"12.50"`, `"7"`). These helpers are used with
//! `#[serde(deserialize_with = ...)]` so both shapes decode to the same value.
//!
//! ```rust
//! use ledger_core::ProductInput;
//!
//! let a: ProductInput = serde_json::from_str(r#"{"name":"Oil 1L","rate":"120.50"}"#).unwrap();
//! let b: ProductInput = serde_json::from_str(r#"{"name":"Oil 1L","rate":120.5}"#).unwrap();
//! assert_eq!(a.rate, b.rate);
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

/// Decodes an `f64` from a JSON number or numeric string.
pub fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(i) => Ok(i as f64),
        NumberOrString::Float(f) => Ok(f),
        NumberOrString::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a decimal number, got '{s}'"))),
    }
}

/// Decodes an `i64` from a JSON number or numeric string.
///
/// Floats are accepted only when they carry no fractional part.
pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(i) => Ok(i),
        NumberOrString::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(f as i64),
        NumberOrString::Float(f) => Err(D::Error::custom(format!(
            "expected an integer, got {f}"
        ))),
        NumberOrString::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expected an integer, got '{s}'"))),
    }
}

/// Like [`integer`], but `null` and the empty string decode to `None`.
///
/// Pair with `#[serde(default)]` so an absent field is `None` too.
pub fn optional_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Int(i)) => Ok(Some(i)),
        Some(NumberOrString::Float(f)) if f.fract() == 0.0 && f.is_finite() => Ok(Some(f as i64)),
        Some(NumberOrString::Float(f)) => Err(D::Error::custom(format!(
            "expected an integer, got {f}"
        ))),
        Some(NumberOrString::Str(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected an integer, got '{s}'"))),
    }
}
