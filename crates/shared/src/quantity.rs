use serde::{Deserialize, Deserializer};

/// Coerce a form value into a quantity.
///
/// Blank, non-numeric, negative and non-finite input all read as `0.0`, so an
/// unparseable value never reaches an aggregation. A single decimal comma is
/// accepted (`"0,5"`).
pub fn parse_quantity(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let value = trimmed
        .parse::<f64>()
        .or_else(|_| trimmed.replacen(',', ".", 1).parse::<f64>())
        .unwrap_or(0.0);

    sanitize_quantity(value)
}

/// Coerce a form value into a headcount. Fractions are truncated.
pub fn parse_count(input: &str) -> u32 {
    // `as` saturates at u32::MAX
    parse_quantity(input).trunc() as u32
}

pub fn sanitize_quantity(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Lookup key for ingredient names and units: trimmed and lowercased.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Coerce any JSON value into a quantity (numbers, numeric strings, else 0).
pub fn quantity_from_value(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(number) => number.as_f64().map_or(0.0, sanitize_quantity),
        serde_json::Value::String(text) => parse_quantity(text),
        _ => 0.0,
    }
}

/// `deserialize_with` helper for quantity fields that may arrive as strings.
pub fn deserialize_quantity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(quantity_from_value(&value))
}

/// `deserialize_with` helper for headcount fields that may arrive as strings.
pub fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(quantity_from_value(&value).trunc() as u32)
}
