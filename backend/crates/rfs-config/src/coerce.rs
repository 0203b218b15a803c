//! Lenient field coercion for config documents written by the web UI.
//!
//! Values are accepted only when they are "truthy"; empty strings, zero,
//! `false`, `null`, arrays and objects all fall back to the default.

use serde_json::Value;

pub(crate) fn string_or(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".into(),
        _ => fallback.into(),
    }
}

pub(crate) fn port_or(value: Option<&Value>, fallback: u16) -> u16 {
    let candidate = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    candidate
        .filter(|port| *port != 0)
        .and_then(|port| u16::try_from(port).ok())
        .unwrap_or(fallback)
}
