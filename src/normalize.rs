//! Cell normalization helpers shared by the row mappers.
//!
//! All helpers are total: malformed input degrades to an empty string, `None` or
//! [`Tristate::Unknown`], never to an error.

use crate::record::{Record, Value};

/// Three-valued result of [`parse_boolish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tristate {
    True,
    False,
    Unknown,
}

impl Tristate {
    #[must_use]
    pub fn is_known(self) -> bool {
        !matches!(self, Tristate::Unknown)
    }

    #[must_use]
    pub fn as_option(self) -> Option<bool> {
        match self {
            Tristate::True => Some(true),
            Tristate::False => Some(false),
            Tristate::Unknown => None,
        }
    }
}

impl From<bool> for Tristate {
    fn from(b: bool) -> Self {
        if b { Tristate::True } else { Tristate::False }
    }
}

/// Null and missing become an empty string, strings are trimmed, anything else is kept.
#[must_use]
pub fn normalize_value(v: Option<&Value>) -> Value {
    match v {
        None | Some(Value::Null) => Value::Str(String::new()),
        Some(Value::Str(s)) => Value::Str(s.trim().to_string()),
        Some(other) => other.clone(),
    }
}

/// First candidate that is present and not a blank string, normalized.
pub fn pick_str<S: AsRef<str>>(rec: &Record, fields: &[S]) -> String {
    fields
        .iter()
        .filter_map(|f| rec.get(f.as_ref()))
        .find(|v| !v.is_null() && !v.is_blank_str())
        .map(|v| normalize_value(Some(v)).to_string())
        .unwrap_or_default()
}

/// First candidate that coerces to a finite number.
pub fn pick_num<S: AsRef<str>>(rec: &Record, fields: &[S]) -> Option<f64> {
    fields.iter().filter_map(|f| rec.get(f.as_ref())).find_map(parse_number)
}

/// Best-effort numeric coercion.
///
/// Strings are trimmed and a lone decimal comma (`"123,45"`) is read as a decimal point.
/// Booleans coerce to `1`/`0`. NaN and infinities are rejected.
#[must_use]
pub fn parse_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Num(n) => *n,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Str(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            if s.contains(',') && !s.contains('.') {
                s.replacen(',', ".", 1).parse().ok()?
            } else {
                s.parse().ok()?
            }
        }
        Value::Null => return None,
    };
    n.is_finite().then_some(n)
}

#[must_use]
pub fn format_price(v: Option<f64>) -> String {
    v.map(|p| format!("{p:.2}")).unwrap_or_default()
}

/// Identifier-safe token: lowercase ASCII letters and digits joined by single dashes.
#[must_use]
pub fn slugify(v: &str) -> String {
    let s = v.trim().to_lowercase();
    let mut out = String::with_capacity(s.len());
    let mut prev_dash = false;
    for ch in s.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
            prev_dash = false;
        } else if !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }
    let mut slug = out.trim_matches('-').to_string();
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    slug
}

#[must_use]
pub fn parse_boolish(v: Option<&Value>) -> Tristate {
    match v {
        None | Some(Value::Null) => Tristate::Unknown,
        Some(Value::Bool(b)) => Tristate::from(*b),
        Some(Value::Num(n)) => Tristate::from(*n != 0.0),
        Some(Value::Str(s)) => match s.trim().to_lowercase().as_str() {
            "1" | "true" | "t" | "y" | "yes" | "si" | "s" => Tristate::True,
            "0" | "false" | "f" | "n" | "no" => Tristate::False,
            _ => Tristate::Unknown,
        },
    }
}
