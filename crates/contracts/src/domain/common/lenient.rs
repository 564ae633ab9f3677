//! Tolerant readers for values that arrive from HTML forms.
//!
//! Form fields reach the API as strings as often as numbers: `"12"`, `12`,
//! `""` and `null` must all be accepted for an optional id. Readings are
//! read the way a form field is read: leading whitespace skipped and the
//! longest numeric prefix used.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Longest numeric prefix of `raw` (after leading whitespace).
///
/// Accepts an optional sign, digits and one decimal point. Reading stops at
/// the first other character, so `"37,5"` is 37. Returns `None` when there
/// is no digit at all.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let bytes = raw.trim_start().as_bytes();
    let mut pos = 0;
    let mut text = String::new();

    if let Some(&sign) = bytes.first() {
        if sign == b'+' || sign == b'-' {
            text.push(sign as char);
            pos = 1;
        }
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &bytes[int_start..pos];

    let mut frac_part: &[u8] = &[];
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_part = &bytes[frac_start..end];
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    if int_part.is_empty() {
        text.push('0');
    } else {
        text.push_str(std::str::from_utf8(int_part).ok()?);
    }
    if !frac_part.is_empty() {
        text.push('.');
        text.push_str(std::str::from_utf8(frac_part).ok()?);
    }

    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn text_to_i32<E: de::Error>(text: &str) -> Result<Option<i32>, E> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| E::custom(format!("'{}' bukan angka yang valid", text)))
}

/// Optional integer given as number, numeric string, empty string or null
pub fn opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Int(v)) => i32::try_from(v)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("{} di luar jangkauan", v))),
        Some(NumberOrText::Float(v)) if v.is_finite() => Ok(Some(v.trunc() as i32)),
        Some(NumberOrText::Float(v)) => Err(de::Error::custom(format!("{} bukan angka", v))),
        Some(NumberOrText::Text(s)) => text_to_i32(&s),
    }
}

/// Optional count given as number, numeric string, empty string or null
pub fn opt_usize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Int(v)) => usize::try_from(v)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("{} di luar jangkauan", v))),
        Some(NumberOrText::Float(v)) => {
            Err(de::Error::custom(format!("{} bukan bilangan bulat", v)))
        }
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("'{}' bukan angka yang valid", s))),
    }
}

/// Optional typed id, read like [`opt_i32`]
pub fn opt_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<i32>,
{
    Ok(opt_i32(deserializer)?.map(T::from))
}

/// Free text where `null` means empty and numbers are kept as typed
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(String::new()),
        Some(NumberOrText::Int(v)) => Ok(v.to_string()),
        Some(NumberOrText::Float(v)) => Ok(v.to_string()),
        Some(NumberOrText::Text(s)) => Ok(s),
    }
}

/// Optional decimal given as number, numeric string, empty string or null
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Int(v)) => Ok(Some(v as f64)),
        Some(NumberOrText::Float(v)) => Ok(Some(v)),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(s)) => parse_leading_number(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("'{}' bukan angka yang valid", s))),
    }
}

/// Optional date given as `YYYY-MM-DD` or as an ISO timestamp
pub fn opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_date(text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("'{}' bukan tanggal yang valid", text))),
    }
}

/// Date part of `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS...`
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let date_part = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "opt_i32")]
        id: Option<i32>,
        #[serde(default, deserialize_with = "opt_f64")]
        weight: Option<f64>,
        #[serde(default, deserialize_with = "opt_date")]
        born: Option<NaiveDate>,
    }

    fn form(json: &str) -> Form {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn leading_number_reads_like_a_form_field() {
        assert_eq!(parse_leading_number("120"), Some(120.0));
        assert_eq!(parse_leading_number("  36.6 C"), Some(36.6));
        assert_eq!(parse_leading_number("36,5"), Some(36.0));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("-3"), Some(-3.0));
        assert_eq!(parse_leading_number("98%"), Some(98.0));
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("-"), None);
    }

    #[test]
    fn ids_accept_numbers_and_strings() {
        assert_eq!(form(r#"{"id": 3}"#).id, Some(3));
        assert_eq!(form(r#"{"id": "3"}"#).id, Some(3));
        assert_eq!(form(r#"{"id": ""}"#).id, None);
        assert_eq!(form(r#"{"id": null}"#).id, None);
        assert_eq!(form(r#"{}"#).id, None);
        assert!(serde_json::from_str::<Form>(r#"{"id": "x"}"#).is_err());
    }

    #[test]
    fn counts_accept_numbers_strings_and_blanks() {
        #[derive(Deserialize)]
        struct Paging {
            #[serde(default, deserialize_with = "opt_usize")]
            limit: Option<usize>,
        }
        let read = |json: &str| serde_json::from_str::<Paging>(json).map(|p| p.limit);
        assert_eq!(read(r#"{"limit": 20}"#).unwrap(), Some(20));
        assert_eq!(read(r#"{"limit": "20"}"#).unwrap(), Some(20));
        assert_eq!(read(r#"{"limit": ""}"#).unwrap(), None);
        assert_eq!(read(r#"{}"#).unwrap(), None);
        assert!(read(r#"{"limit": -1}"#).is_err());
        assert!(read(r#"{"limit": "ten"}"#).is_err());
    }

    #[test]
    fn decimals_accept_numbers_and_strings() {
        assert_eq!(form(r#"{"weight": "72.5"}"#).weight, Some(72.5));
        assert_eq!(form(r#"{"weight": 70}"#).weight, Some(70.0));
        assert_eq!(form(r#"{"weight": ""}"#).weight, None);
    }

    #[test]
    fn text_fields_tolerate_null_and_numbers() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "text")]
            nadi: String,
        }
        let read = |json: &str| serde_json::from_str::<Row>(json).unwrap().nadi;
        assert_eq!(read(r#"{"nadi": "80"}"#), "80");
        assert_eq!(read(r#"{"nadi": 80}"#), "80");
        assert_eq!(read(r#"{"nadi": null}"#), "");
        assert_eq!(read(r#"{}"#), "");
    }

    #[test]
    fn dates_accept_plain_and_iso_forms() {
        let expected = NaiveDate::from_ymd_opt(1990, 1, 1);
        assert_eq!(form(r#"{"born": "1990-01-01"}"#).born, expected);
        assert_eq!(form(r#"{"born": "1990-01-01T00:00:00.000Z"}"#).born, expected);
        assert_eq!(form(r#"{"born": ""}"#).born, None);
        assert!(serde_json::from_str::<Form>(r#"{"born": "01/01/1990"}"#).is_err());
    }
}
