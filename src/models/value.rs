use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;

/// Date layouts accepted when a text cell is coerced to a date
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%b-%Y"];
// `%.f` also matches a missing fraction, so `00:00:00` and `00:00:00.000` both parse
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S %p",
];

/// A single cell of a [`Table`](super::Table)
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

/// The storage class of a whole column, derived from its non-null cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Bool,
    Int,
    Float,
    Text,
    Date,
    Empty,
}

impl ColumnKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Int | ColumnKind::Float)
    }

    /// Text and boolean columns are summarised by value counts
    pub fn is_categorical(&self) -> bool {
        matches!(self, ColumnKind::Text | ColumnKind::Bool)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnKind::Bool => "bool",
            ColumnKind::Int => "int64",
            ColumnKind::Float => "float64",
            ColumnKind::Text => "object",
            ColumnKind::Date => "datetime64",
            ColumnKind::Empty => "empty",
        }
    }
}

impl Value {
    /// Infer a typed value from a raw CSV cell. Dates stay text until explicitly coerced.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        if let Some(flag) = parse_bool(trimmed) {
            return Value::Bool(flag);
        }
        if let Ok(int) = trimmed.parse::<i64>() {
            return Value::Int(int);
        }
        if looks_numeric(trimmed) {
            if let Ok(float) = trimmed.parse::<f64>() {
                return Value::Float(float);
            }
        }
        Value::Text(raw.to_string())
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Value::Null => ColumnKind::Empty,
            Value::Bool(_) => ColumnKind::Bool,
            Value::Int(_) => ColumnKind::Int,
            Value::Float(_) => ColumnKind::Float,
            Value::Text(_) => ColumnKind::Text,
            Value::Date(_) => ColumnKind::Date,
        }
    }

    /// Null cells and float NaN both count as missing
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) if !f.is_nan() => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String form used for join keys and grouping; `None` for missing cells
    pub fn key(&self) -> Option<String> {
        if self.is_null() {
            None
        } else {
            Some(self.to_string())
        }
    }

    /// Coerce to text, keeping nulls null
    pub fn to_text(&self) -> Value {
        match self.key() {
            Some(text) => Value::Text(text),
            None => Value::Null,
        }
    }

    /// Coerce to float; anything unparseable becomes null
    pub fn to_float(&self) -> Value {
        match self {
            Value::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float)
                .unwrap_or(Value::Null),
            other => other.as_f64().map(Value::Float).unwrap_or(Value::Null),
        }
    }

    /// Coerce to boolean: non-zero numbers and truthy words are true
    pub fn to_bool(&self) -> Value {
        match self {
            Value::Bool(b) => Value::Bool(*b),
            Value::Int(i) => Value::Bool(*i != 0),
            Value::Float(f) if !f.is_nan() => Value::Bool(*f != 0.0),
            Value::Text(s) => match parse_bool(s.trim()) {
                Some(flag) => Value::Bool(flag),
                None => match s.trim().to_ascii_lowercase().as_str() {
                    "y" | "yes" | "1" => Value::Bool(true),
                    "n" | "no" | "0" | "" => Value::Bool(false),
                    _ => Value::Bool(true),
                },
            },
            _ => Value::Null,
        }
    }

    /// Coerce to a date; unparseable entries become null rather than failing
    pub fn to_date(&self) -> Value {
        match self {
            Value::Date(d) => Value::Date(*d),
            Value::Text(s) => parse_date(s).map(Value::Date).unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) if x.is_nan() => Ok(()),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Parse a date in any of the layouts the ridership exports have used
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.naive_local().date())
        })
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// `f64::from_str` accepts "inf" and "NaN", which are station names here, not numbers
fn looks_numeric(raw: &str) -> bool {
    raw.bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        && raw.bytes().any(|b| b.is_ascii_digit())
}
