//! Search domains in Odoo's `[field, operator, value]` triple form.

use crate::xmlrpc::Value;

/// An implicitly AND-ed list of conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Domain {
    conditions: Vec<Value>,
}

impl Domain {
    /// The empty domain, matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.with(field, "=", value)
    }

    pub fn ge(self, field: &str, value: impl Into<Value>) -> Self {
        self.with(field, ">=", value)
    }

    pub fn le(self, field: &str, value: impl Into<Value>) -> Self {
        self.with(field, "<=", value)
    }

    /// Add `field = value` only when a value is present.
    pub fn eq_opt<V: Into<Value>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.eq(field, value),
            None => self,
        }
    }

    pub fn with(mut self, field: &str, operator: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(Value::Array(vec![
            Value::from(field),
            Value::from(operator),
            value.into(),
        ]));
        self
    }
}

impl From<Domain> for Value {
    fn from(domain: Domain) -> Self {
        Value::Array(domain.conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_equality() {
        assert_eq!(
            Value::from(Domain::all().eq_opt::<i64>("employee_id", None)),
            Value::Array(Vec::new())
        );

        let domain = Domain::all().eq_opt("employee_id", Some(42i64));
        assert_eq!(
            Value::from(domain),
            Value::Array(vec![Value::Array(vec![
                Value::from("employee_id"),
                Value::from("="),
                Value::Int(42),
            ])])
        );
    }

    #[test]
    fn test_conditions_are_separate_triples() {
        let domain = Domain::all()
            .ge("date_from", "2024-05-01 00:00:00")
            .le("date_to", "2024-05-01 23:59:59")
            .eq("state", "validate");
        let value = Value::from(domain);
        let triples = value.as_array().unwrap();
        assert_eq!(triples.len(), 3);
        assert!(triples.iter().all(|t| t.as_array().map(|a| a.len()) == Some(3)));
    }
}
