//! What a statement evaluates to: a status message for mutations and DDL, or
//! an ordered sequence of projected records for SELECT / DESCRIBE / SHOW.

use serde::Serialize;
use std::fmt;
use ty::Value;

/// One projected output row. Field order is the projection order, which is
/// why this is not a plain map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// The result of one executed statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StatementOutput {
    /// Human-readable status, e.g. `1 row inserted`.
    Message(String),
    /// Projected records, in table order.
    Rows(Vec<Record>),
}

impl StatementOutput {
    pub fn message(text: impl Into<String>) -> Self {
        StatementOutput::Message(text.into())
    }
}

impl fmt::Display for StatementOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementOutput::Message(text) => write!(f, "{}", text),
            StatementOutput::Rows(records) if records.is_empty() => write!(f, "(no rows)"),
            StatementOutput::Rows(records) => {
                for (i, record) in records.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", record)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions_sorted::assert_eq;

    #[test]
    fn test_record_preserves_field_order() {
        let mut record = Record::new();
        record.push("z", Value::Integer(1));
        record.push("a", Value::from("x"));

        let names: Vec<&str> = record.fields().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["z", "a"]);
        assert_eq!(record.to_string(), "z: 1, a: x");
    }

    #[test]
    fn test_output_display() {
        assert_eq!(StatementOutput::message("ok").to_string(), "ok");
        assert_eq!(StatementOutput::Rows(vec![]).to_string(), "(no rows)");
    }
}
