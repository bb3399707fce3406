//! Lenient deserializers.
//!
//! Browser forms and query strings send numbers and booleans as strings and
//! dates as full ISO timestamps. These helpers coerce such inputs into the
//! declared types. Error messages start with `must ` so the validation layer
//! can prefix them with the offending field name.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, de::Error as _};

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Text(String),
}

/// Parses `YYYY-MM-DD`, falling back to the date part of an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntOrString::Int(v)) => Ok(Some(v)),
        Some(IntOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(IntOrString::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom("must be a whole number")),
    }
}

pub fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(v)) => Ok(Some(v)),
        Some(BoolOrString::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            _ => Err(D::Error::custom("must be true or false")),
        },
    }
}

pub fn deserialize_f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(v) => Ok(v),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| D::Error::custom("must be a number")),
    }
}

pub fn deserialize_date_lenient<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| D::Error::custom("must be a date in YYYY-MM-DD format"))
}

pub fn deserialize_optional_date_lenient<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom("must be a date in YYYY-MM-DD format")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        page: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_bool")]
        active: Option<bool>,
        #[serde(deserialize_with = "deserialize_f64_lenient")]
        hours: f64,
        #[serde(deserialize_with = "deserialize_date_lenient")]
        date: NaiveDate,
        #[serde(default, deserialize_with = "deserialize_optional_date_lenient")]
        until: Option<NaiveDate>,
    }

    #[test]
    fn test_coerces_strings() {
        let form: Form = serde_json::from_value(json!({
            "page": "3",
            "active": "true",
            "hours": "7.5",
            "date": "2026-02-01",
            "until": ""
        }))
        .unwrap();

        assert_eq!(form.page, Some(3));
        assert_eq!(form.active, Some(true));
        assert_eq!(form.hours, 7.5);
        assert_eq!(form.date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(form.until, None);
    }

    #[test]
    fn test_accepts_native_types() {
        let form: Form = serde_json::from_value(json!({
            "page": 2,
            "active": false,
            "hours": 8,
            "date": "2026-02-01T09:30:00.000Z"
        }))
        .unwrap();

        assert_eq!(form.page, Some(2));
        assert_eq!(form.active, Some(false));
        assert_eq!(form.hours, 8.0);
        assert_eq!(form.date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = serde_json::from_value::<Form>(json!({
            "hours": "lots",
            "date": "2026-02-01"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("must be a number"));

        let err = serde_json::from_value::<Form>(json!({
            "hours": 1,
            "date": "01/02/2026"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_parse_date_keeps_written_calendar_day() {
        assert_eq!(
            parse_date("2026-03-01T00:00:00+05:00"),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert_eq!(parse_date("not a date"), None);
    }
}
