use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One scalar cell of a data record.
///
/// Deserialization is untagged: JSON numbers become `Number`, RFC 3339
/// strings become `Time`, two-element numeric arrays become `Range`, any
/// other string stays `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Time(DateTime<Utc>),
    Text(String),
    Range(f64, f64),
}

impl FieldValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric projection used for continuous scales.
    ///
    /// Times project to unix milliseconds. Text, booleans and ranges have no
    /// single numeric position.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            Self::Time(time) => Some(time.timestamp_millis() as f64),
            _ => None,
        }
    }

    /// Numeric extent covered by this value (both ends for ranges).
    #[must_use]
    pub fn numeric_extent(&self) -> Option<(f64, f64)> {
        match self {
            Self::Range(low, high) if low.is_finite() && high.is_finite() => {
                Some((low.min(*high), low.max(*high)))
            }
            other => other.as_f64().map(|value| (value, value)),
        }
    }

    #[must_use]
    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Time(time) => Some(*time),
            _ => None,
        }
    }

    /// Default display text when no formatter is configured.
    #[must_use]
    pub fn to_label(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => format_number(*value),
            Self::Time(time) => time.format("%Y-%m-%d").to_string(),
            Self::Text(text) => text.clone(),
            Self::Range(low, high) => format!("{}-{}", format_number(*low), format_number(*high)),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

/// Ordered mapping from field name to value.
pub type Record = IndexMap<String, FieldValue>;

/// Builds a record from `(field, value)` pairs.
#[must_use]
pub fn record<K, V, I>(fields: I) -> Record
where
    K: Into<String>,
    V: Into<FieldValue>,
    I: IntoIterator<Item = (K, V)>,
{
    fields
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// Reads a field, treating absent fields as `Null`.
#[must_use]
pub fn field<'a>(record: &'a Record, name: &str) -> &'a FieldValue {
    static NULL: FieldValue = FieldValue::Null;
    record.get(name).unwrap_or(&NULL)
}

fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    // Trim float noise such as 0.30000000000000004.
    let rounded = (value * 1e10).round() / 1e10;
    rounded.to_string()
}
