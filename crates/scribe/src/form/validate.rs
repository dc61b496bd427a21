//! Validation engine.
//!
//! [`validate`] is a pure function of the current values and a
//! [`ConstraintSpec`]. It returns only the failing fields; a field with no
//! entry in the [`ValidationResult`] is valid.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer, ser::SerializeMap};

use super::{ConstraintSpec, FieldId, FieldValues, Rule};

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{} can't be blank", .0.pretty_name())]
    MissingValue(FieldId),
    #[error("{} is not a number", .0.pretty_name())]
    NotANumber(FieldId),
}

impl ValidationError {
    pub fn field(&self) -> FieldId {
        match self {
            ValidationError::MissingValue(id) | ValidationError::NotANumber(id) => *id,
        }
    }
}

/// Errors of one validation pass, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<FieldId, ValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, id: FieldId) -> Option<&ValidationError> {
        self.errors.get(&id)
    }

    /// Display message for a field, `None` when the field is valid.
    pub fn message(&self, id: FieldId) -> Option<String> {
        self.get(id).map(ToString::to_string)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &ValidationError)> {
        self.errors.iter().map(|(id, err)| (*id, err))
    }
}

/// Serialises as `{"<field-id>": ["<message>"]}`, matching the usual shape
/// of client-side validator output.
impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (id, err) in &self.errors {
            map.serialize_entry(id.as_str(), &[err.to_string()])?;
        }
        map.end()
    }
}

/// Evaluate `spec` against `values`.
///
/// Rules of a field run in declaration order; the first failing rule
/// decides the field's error.
pub fn validate(values: &FieldValues, spec: &ConstraintSpec) -> ValidationResult {
    let errors = spec
        .iter()
        .filter_map(|(id, rules)| {
            let value = values.get(id);
            rules
                .iter()
                .find_map(|rule| check(*rule, id, value))
                .map(|err| (id, err))
        })
        .collect();
    ValidationResult { errors }
}

fn check(rule: Rule, id: FieldId, value: &str) -> Option<ValidationError> {
    let trimmed = value.trim();
    match rule {
        Rule::Presence { allow_empty } => {
            (!allow_empty && trimmed.is_empty()).then_some(ValidationError::MissingValue(id))
        }
        Rule::Numericality => {
            (!trimmed.is_empty() && !is_number(trimmed)).then_some(ValidationError::NotANumber(id))
        }
    }
}

/// Integer or decimal with optional sign and exponent. `inf` / `NaN`
/// spellings are rejected even though `f64` parsing accepts them.
fn is_number(s: &str) -> bool {
    s.parse::<f64>().is_ok_and(f64::is_finite)
        && s.chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
}
