//! Table-driven normalization of admin form submissions.
//!
//! Form clients send every field as a string (possibly empty); API clients
//! may send typed JSON. Each field has one [`Coercion`] rule, and
//! [`normalize`] turns a raw object into one whose values already have the
//! stored types, ready for `serde_json::from_value`.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Calendar years a `Year` field may hold.
pub const YEAR_RANGE: RangeInclusive<i32> = 1900..=9999;

/// How one form field is converted to its stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Trimmed string that must not be empty.
    RequiredText,
    /// Trimmed string; empty becomes null.
    Text,
    /// `YYYY-MM-DD`; empty becomes null.
    Date,
    /// `HH:MM:SS` race time; empty becomes null.
    Duration,
    /// `MM:SS` race time; empty becomes null.
    ShortDuration,
    /// Year within [`YEAR_RANGE`]; empty or unparseable becomes null.
    Year,
    /// Non-negative integer; empty or unparseable becomes 0.
    Count,
    /// Boolean; absent becomes false.
    Flag,
    /// Comma-separated string or array of strings; empty becomes null.
    CityList,
}

/// Rules for the member form, keyed by stored column name.
pub const MEMBER_FORM_RULES: &[(&str, Coercion)] = &[
    ("full_name", Coercion::RequiredText),
    ("date_of_birth", Coercion::Date),
    ("year_joined", Coercion::Year),
    ("email", Coercion::Text),
    ("phone", Coercion::Text),
    ("instagram", Coercion::Text),
    ("strava", Coercion::Text),
    ("total_marathons", Coercion::Count),
    ("marathon_pr", Coercion::Duration),
    ("marathon_pr_year", Coercion::Year),
    ("marathon_pr_city", Coercion::Text),
    ("boston_count", Coercion::Count),
    ("half_marathon_pr", Coercion::Duration),
    ("ten_k_pr", Coercion::ShortDuration),
    ("sub3_marathons", Coercion::Count),
    ("most_run_marathon", Coercion::Text),
    ("marathon_cities", Coercion::CityList),
    ("other_marathon_cities", Coercion::Text),
    ("bio", Coercion::Text),
    ("photo_url", Coercion::Text),
    ("photo_authorized", Coercion::Flag),
    ("has_placeholder_photo", Coercion::Flag),
    ("is_legend", Coercion::Flag),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(String),
    #[error("{field} must be {expected}")]
    Invalid {
        field: String,
        expected: &'static str,
    },
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("form body must be a JSON object")]
    NotAnObject,
}

/// Apply `rules` to every field of `raw`. Fields missing from `raw` are
/// coerced as if they were absent; fields not in `rules` are rejected.
pub fn normalize(raw: &Value, rules: &[(&str, Coercion)]) -> Result<Map<String, Value>, FormError> {
    let raw = raw.as_object().ok_or(FormError::NotAnObject)?;

    if let Some(unknown) = raw
        .keys()
        .find(|k| !rules.iter().any(|(name, _)| name == k))
    {
        return Err(FormError::UnknownField(unknown.clone()));
    }

    let mut out = Map::with_capacity(rules.len());
    for &(field, rule) in rules {
        let value = coerce(field, rule, raw.get(field).unwrap_or(&Value::Null))?;
        out.insert(field.to_string(), value);
    }
    Ok(out)
}

/// Coerce a single raw value under `rule`.
pub fn coerce(field: &str, rule: Coercion, raw: &Value) -> Result<Value, FormError> {
    let invalid = |expected: &'static str| FormError::Invalid {
        field: field.to_string(),
        expected,
    };

    match rule {
        Coercion::RequiredText => match text(raw).ok_or_else(|| invalid("a string"))? {
            Some(s) => Ok(Value::String(s)),
            None => Err(FormError::Required(field.to_string())),
        },
        Coercion::Text => Ok(text(raw)
            .ok_or_else(|| invalid("a string"))?
            .map_or(Value::Null, Value::String)),
        Coercion::Date => match text(raw).ok_or_else(|| invalid("a date"))? {
            Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
                .map_err(|_| invalid("a date formatted YYYY-MM-DD")),
            None => Ok(Value::Null),
        },
        Coercion::Duration => match text(raw).ok_or_else(|| invalid("a time"))? {
            Some(s) if is_clock(&s, 3) => Ok(Value::String(s)),
            Some(_) => Err(invalid("a time formatted HH:MM:SS")),
            None => Ok(Value::Null),
        },
        Coercion::ShortDuration => match text(raw).ok_or_else(|| invalid("a time"))? {
            Some(s) if is_clock(&s, 2) => Ok(Value::String(s)),
            Some(_) => Err(invalid("a time formatted MM:SS")),
            None => Ok(Value::Null),
        },
        Coercion::Year => match integer(raw) {
            Some(year) if YEAR_RANGE.contains(&year) => Ok(Value::from(year)),
            Some(_) => Err(invalid("a year between 1900 and 9999")),
            None => Ok(Value::Null),
        },
        Coercion::Count => {
            let n = integer(raw).unwrap_or(0);
            if n < 0 {
                return Err(invalid("zero or greater"));
            }
            Ok(Value::from(n))
        }
        Coercion::Flag => match raw {
            Value::Null => Ok(Value::Bool(false)),
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) => match s.trim() {
                "" | "false" => Ok(Value::Bool(false)),
                "true" => Ok(Value::Bool(true)),
                _ => Err(invalid("true or false")),
            },
            _ => Err(invalid("true or false")),
        },
        Coercion::CityList => {
            let cities: Vec<String> = match raw {
                Value::Null => Vec::new(),
                Value::String(s) => split_cities(s.split(',')),
                Value::Array(items) => {
                    let mut names = Vec::with_capacity(items.len());
                    for item in items {
                        names.push(item.as_str().ok_or_else(|| invalid("a list of city names"))?);
                    }
                    split_cities(names.into_iter())
                }
                _ => return Err(invalid("a list of city names")),
            };
            if cities.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(Value::from(cities))
            }
        }
    }
}

/// `None` if the value is not textual; `Some(None)` if it is blank.
fn text(raw: &Value) -> Option<Option<String>> {
    match raw {
        Value::Null => Some(None),
        Value::String(s) => {
            let trimmed = s.trim();
            Some((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        _ => None,
    }
}

fn integer(raw: &Value) -> Option<i32> {
    match raw {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn split_cities<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut cities: Vec<String> = Vec::new();
    for name in names.map(str::trim).filter(|n| !n.is_empty()) {
        if !cities.iter().any(|c| c == name) {
            cities.push(name.to_string());
        }
    }
    cities
}

/// `HH:MM:SS` when `parts == 3`, `MM:SS` when `parts == 2`. Leading field may
/// have one or two digits; the rest must be two digits below 60.
fn is_clock(s: &str, parts: usize) -> bool {
    let fields: Vec<&str> = s.split(':').collect();
    if fields.len() != parts {
        return false;
    }
    fields.iter().enumerate().all(|(i, f)| {
        let len_ok = if i == 0 { (1..=2).contains(&f.len()) } else { f.len() == 2 };
        len_ok
            && f.chars().all(|c| c.is_ascii_digit())
            && (i == 0 || f.parse::<u32>().is_ok_and(|v| v < 60))
    })
}
