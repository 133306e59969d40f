use std::collections::BTreeMap;

use derive_more::Display;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::collection::FieldKind;

#[derive(Debug, PartialEq, Display)]
pub enum RecordError {
    #[display("unknown collection {_0}")]
    UnknownCollection(String),
    #[display("unknown field {_0}")]
    UnknownField(String),
    #[display("missing field {_0}")]
    MissingField(String),
    #[display("field {field} is not {expected:?}")]
    WrongType { field: String, expected: FieldKind },
    #[display("cannot read {raw:?} as {expected:?}")]
    Unparsable { raw: String, expected: FieldKind },
}

impl std::error::Error for RecordError {}

/// A single field of a record as exchanged with the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Decimal(Decimal),
    Text(String),
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<Decimal> for FieldValue {
    fn from(d: Decimal) -> Self {
        FieldValue::Decimal(d)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_owned())
    }
}

impl FieldValue {
    /// Coerces raw text (CSV cells, form input) into a value of the given kind.
    /// Empty text becomes `Null`.
    pub fn parse(raw: &str, kind: FieldKind) -> Result<FieldValue, RecordError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(FieldValue::Null);
        }

        let unparsable = || RecordError::Unparsable {
            raw: raw.to_owned(),
            expected: kind,
        };

        match kind {
            FieldKind::Integer => raw
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| unparsable()),
            FieldKind::Decimal => raw
                .parse::<Decimal>()
                .map(FieldValue::Decimal)
                .map_err(|_| unparsable()),
            FieldKind::Text => Ok(FieldValue::Text(raw.to_owned())),
        }
    }

    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldValue::Null => None,
            FieldValue::Integer(_) => Some(FieldKind::Integer),
            FieldValue::Decimal(_) => Some(FieldKind::Decimal),
            FieldValue::Text(_) => Some(FieldKind::Text),
        }
    }
}

/// A projected record: only the fields that were asked for.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record(BTreeMap<String, FieldValue>);

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.0.insert(field.to_owned(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn integer(&self, field: &str) -> Result<i64, RecordError> {
        match self.require(field)? {
            FieldValue::Integer(i) => Ok(*i),
            _ => Err(wrong_type(field, FieldKind::Integer)),
        }
    }

    /// Integers are accepted where a decimal is expected.
    pub fn decimal(&self, field: &str) -> Result<Decimal, RecordError> {
        match self.require(field)? {
            FieldValue::Decimal(d) => Ok(*d),
            FieldValue::Integer(i) => Ok(Decimal::from(*i)),
            _ => Err(wrong_type(field, FieldKind::Decimal)),
        }
    }

    /// Missing or null text reads as empty.
    pub fn text(&self, field: &str) -> Result<String, RecordError> {
        match self.get(field) {
            None | Some(FieldValue::Null) => Ok(String::new()),
            Some(FieldValue::Text(s)) => Ok(s.clone()),
            Some(_) => Err(wrong_type(field, FieldKind::Text)),
        }
    }

    fn require(&self, field: &str) -> Result<&FieldValue, RecordError> {
        match self.get(field) {
            None | Some(FieldValue::Null) => Err(RecordError::MissingField(field.to_owned())),
            Some(v) => Ok(v),
        }
    }
}

fn wrong_type(field: &str, expected: FieldKind) -> RecordError {
    RecordError::WrongType {
        field: field.to_owned(),
        expected,
    }
}
