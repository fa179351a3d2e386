//! Resource quantity parsing (`20Gi`, `500m`, `1e3`, ...).

use regex::Regex;
use std::fmt;

/// Shape every quantity must have before its suffix is checked.
pub const QUANTITY_FMT: &str = "^([+-]?[0-9.]+)([eEinumkKMGTP]*[-+]?[0-9]*)$";

const BINARY_SUFFIXES: &[&str] = &["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];
const DECIMAL_SUFFIXES: &[&str] = &["n", "u", "m", "", "k", "M", "G", "T", "P", "E"];

/// A parsed quantity. Only the properties validation needs are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    raw: String,
    negative: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The string does not have the shape of a quantity
    Format,
    /// The numeric part is well-formed but the suffix is unknown
    Suffix(String),
}

impl fmt::Display for QuantityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityError::Format => write!(
                f,
                "quantities must match the regular expression '{}'",
                QUANTITY_FMT
            ),
            QuantityError::Suffix(s) => write!(f, "unable to parse quantity's suffix {:?}", s),
        }
    }
}

impl std::error::Error for QuantityError {}

impl Quantity {
    pub fn parse(input: &str) -> Result<Self, QuantityError> {
        let re = Regex::new(QUANTITY_FMT).map_err(|_| QuantityError::Format)?;
        let caps = re.captures(input).ok_or(QuantityError::Format)?;
        let number = caps.get(1).map_or("", |m| m.as_str());
        let suffix = caps.get(2).map_or("", |m| m.as_str());

        let (negative, digits) = match number.as_bytes().first() {
            Some(b'-') => (true, &number[1..]),
            Some(b'+') => (false, &number[1..]),
            _ => (false, number),
        };
        if digits.matches('.').count() > 1 || !digits.bytes().any(|b| b.is_ascii_digit()) {
            return Err(QuantityError::Format);
        }
        if !is_known_suffix(suffix) {
            return Err(QuantityError::Suffix(suffix.to_string()));
        }

        let is_zero = digits.bytes().all(|b| b == b'0' || b == b'.');
        Ok(Self {
            raw: input.to_string(),
            negative: negative && !is_zero,
        })
    }

    /// Strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn is_known_suffix(suffix: &str) -> bool {
    if BINARY_SUFFIXES.contains(&suffix) || DECIMAL_SUFFIXES.contains(&suffix) {
        return true;
    }
    // Decimal exponent: e3, E-2, e+10
    let Some(exp) = suffix.strip_prefix(&['e', 'E'][..]) else {
        return false;
    };
    let exp = exp.strip_prefix(&['+', '-'][..]).unwrap_or(exp);
    !exp.is_empty() && exp.bytes().all(|b| b.is_ascii_digit())
}
