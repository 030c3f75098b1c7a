use chrono::Local;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// First value among `keys` that is present on `item`. Null values and
/// empty strings count as absent.
pub fn first_present<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|key| item.get(*key)).find(|value| match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    })
}

/// Numeric reading of a JSON number or numeric string.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

/// Integer reading; fractional input is truncated.
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| as_f64(value).map(|f| f.trunc() as i64)),
        _ => as_f64(value).map(|f| f.trunc() as i64),
    }
}

/// Textual reading of a JSON scalar.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Date used when upstream does not say when its data was updated.
pub fn today_display() -> String {
    Local::now().format("%-m/%-d/%Y").to_string()
}

/// Accepts strings, numbers or null where a string is expected.
pub fn de_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_text(&value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_present_skips_missing_null_and_empty() {
        let item = json!({ "BA": "", "AVG": null, "avg": ".401", "ba": "0.300" });
        assert_eq!(
            first_present(&item, &["BA", "AVG", "avg", "ba"]),
            Some(&json!(".401"))
        );
        assert_eq!(first_present(&item, &["OBP", "obp"]), None);
    }

    #[test]
    fn numbers_parse_from_strings_and_numbers() {
        assert_eq!(as_f64(&json!("0.512")), Some(0.512));
        assert_eq!(as_f64(&json!(".512")), Some(0.512));
        assert_eq!(as_f64(&json!(3)), Some(3.0));
        assert_eq!(as_f64(&json!("1,204")), Some(1204.0));
        assert_eq!(as_f64(&json!("N/A")), None);
        assert_eq!(as_f64(&json!([1])), None);
        assert_eq!(as_i64(&json!("40")), Some(40));
        assert_eq!(as_i64(&json!("40.9")), Some(40));
        assert_eq!(as_i64(&json!(12)), Some(12));
        assert_eq!(as_i64(&json!({})), None);
    }

    #[test]
    fn rounding_to_two_places() {
        assert_eq!(round2(12.0 / 40.0), 0.3);
        assert_eq!(round2(2.0 / 3.0), 0.67);
    }
}
