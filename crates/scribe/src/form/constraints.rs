//! Declarative validation constraints.
//!
//! Each field carries an ordered list of [`Rule`]s. The standard spec is
//! declared once per process and never changes afterwards.

use lazy_static::lazy_static;

use super::FieldId;

/// A single validation rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// The value must not be blank. With `allow_empty` set, a blank value
    /// passes (values are never absent, so the rule then always holds).
    Presence { allow_empty: bool },
    /// A non-blank value must parse as a finite number. Blank values are
    /// left to the presence rule.
    Numericality,
}

impl Rule {
    pub const fn presence() -> Self {
        Rule::Presence { allow_empty: false }
    }
}

/// Rules per field, in field declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintSpec {
    fields: Vec<(FieldId, Vec<Rule>)>,
}

lazy_static! {
    static ref STANDARD: ConstraintSpec = ConstraintSpec::default()
        .field(FieldId::InputField1, [Rule::presence(), Rule::Numericality])
        .field(
            FieldId::SelectField1,
            [Rule::Presence { allow_empty: false }],
        );
}

impl Default for ConstraintSpec {
    /// A spec listing every field with no rules.
    fn default() -> Self {
        Self {
            fields: FieldId::ALL.iter().map(|id| (*id, Vec::new())).collect(),
        }
    }
}

impl ConstraintSpec {
    /// The form's constraints: `input-field-1` is required and numeric,
    /// `select-field-1` is required.
    pub fn standard() -> &'static ConstraintSpec {
        &STANDARD
    }

    /// Replace the rule list of one field.
    pub fn field(mut self, id: FieldId, rules: impl IntoIterator<Item = Rule>) -> Self {
        if let Some((_, slot)) = self.fields.iter_mut().find(|(f, _)| *f == id) {
            *slot = rules.into_iter().collect();
        }
        self
    }

    pub fn rules(&self, id: FieldId) -> &[Rule] {
        self.fields
            .iter()
            .find(|(f, _)| *f == id)
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &[Rule])> {
        self.fields.iter().map(|(id, rules)| (*id, rules.as_slice()))
    }

    /// True if the field has a presence rule that rejects blank values.
    pub fn is_required(&self, id: FieldId) -> bool {
        self.rules(id)
            .iter()
            .any(|r| matches!(r, Rule::Presence { allow_empty: false }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_spec_covers_every_field() {
        let ids: Vec<_> = ConstraintSpec::standard().iter().map(|(id, _)| id).collect();
        assert_eq!(ids, FieldId::ALL);
    }

    #[test]
    fn standard_spec_rules() {
        let spec = ConstraintSpec::standard();
        assert_eq!(
            spec.rules(FieldId::InputField1),
            [Rule::presence(), Rule::Numericality]
        );
        assert_eq!(spec.rules(FieldId::SelectField1), [Rule::presence()]);
        assert!(spec.is_required(FieldId::InputField1));
        assert!(spec.is_required(FieldId::SelectField1));
    }

    #[test]
    fn standard_spec_is_shared() {
        assert!(std::ptr::eq(
            ConstraintSpec::standard(),
            ConstraintSpec::standard()
        ));
    }

    #[test]
    fn allow_empty_presence_is_not_required() {
        let spec = ConstraintSpec::default()
            .field(FieldId::SelectField1, [Rule::Presence { allow_empty: true }]);
        assert!(!spec.is_required(FieldId::SelectField1));
        assert!(spec.rules(FieldId::InputField1).is_empty());
    }
}
