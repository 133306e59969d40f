use serde::Serialize;

use crate::domain::record::FieldValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
}

/// One `[field, operator, value]` triple.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition(pub String, pub Operator, pub FieldValue);

impl Condition {
    pub fn field(&self) -> &str {
        &self.0
    }

    pub fn value(&self) -> &FieldValue {
        &self.2
    }
}

/// Conjunction of conditions; empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Domain(Vec<Condition>);

impl Domain {
    pub fn all() -> Self {
        Domain::default()
    }

    pub fn field_eq(field: &str, value: impl Into<FieldValue>) -> Self {
        Domain::all().and_eq(field, value)
    }

    pub fn status(status: impl ToString) -> Self {
        Domain::field_eq("status", status.to_string())
    }

    pub fn and_eq(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.0.push(Condition(field.to_owned(), Operator::Eq, value.into()));
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::props::AccountStatus;

    use super::*;

    #[test]
    fn serializes_as_triples() {
        let domain = Domain::status(AccountStatus::Active).and_eq("id", 4i64);

        assert_eq!(
            serde_json::to_string(&domain).unwrap(),
            r#"[["status","=","active"],["id","=",4]]"#
        );
        assert_eq!(serde_json::to_string(&Domain::all()).unwrap(), "[]");
    }
}
