//! # Values (and their comparison rules)
//!
//! This module provides a [`Value`], the discriminated scalar stored in every
//! row cell. `Eq` and `Hash` are total and never coerce, which makes `Value`
//! usable as an exact-match index key. The looser comparison used by WHERE
//! clauses lives in [`Value::compare_coerced`].

use crate::DataTypeKind;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A typed scalar value.
///
/// Text values that happen to look like numbers are kept as text; the
/// numeric-string coercion only applies during [`Value::compare_coerced`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Integer(i64),
    Text(String),
}

impl Value {
    /// The [`DataTypeKind`] this value inhabits.
    pub fn kind(&self) -> DataTypeKind {
        match self {
            Value::Integer(_) => DataTypeKind::Integer,
            Value::Text(_) => DataTypeKind::Text,
        }
    }

    /// Returns `true` iff the value can be stored in a column of `kind`.
    pub fn conforms_to(&self, kind: DataTypeKind) -> bool {
        self.kind() == kind
    }

    /// Views the value as a number when possible: integers as-is, text only
    /// when the whole string parses as an integer.
    fn as_numeric(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }

    /// Compares two values under the WHERE-clause coercion rule.
    ///
    /// Each operand is coerced independently: a text value that fully parses
    /// as a number is compared numerically. Two numbers order numerically,
    /// two non-numeric texts order lexicographically, and a number against a
    /// non-numeric text is incomparable (`None`). `!=` treats incomparable
    /// operands as unequal; the ordering operators treat them as no match.
    pub fn compare_coerced(&self, other: &Value) -> Option<Ordering> {
        match (self.as_numeric(), other.as_numeric()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (None, None) => match (self, other) {
                (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
                // Unreachable today: only text can fail numeric coercion.
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
