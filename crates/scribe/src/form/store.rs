//! Field state store.
//!
//! Values live in an immutable [`FieldValues`] snapshot behind an `Arc`.
//! `set_field` swaps in a new snapshot with one field replaced, so a
//! snapshot handed out earlier never changes and callers can detect
//! changes with `Arc::ptr_eq`. Validation errors are only ever replaced as
//! a whole, by `submit`.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::{
    ConstraintSpec, FieldId, FieldKind, FormError, ValidationResult, field::menu_item, validate,
};

/// Current value of every field. Empty strings on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldValues {
    #[serde(rename = "input-field-1")]
    input_field_1: String,
    #[serde(rename = "select-field-1")]
    select_field_1: String,
}

impl FieldValues {
    pub fn get(&self, id: FieldId) -> &str {
        match id {
            FieldId::InputField1 => &self.input_field_1,
            FieldId::SelectField1 => &self.select_field_1,
        }
    }

    /// Copy of `self` with one field replaced.
    pub fn with(&self, id: FieldId, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot_mut(id) = value.into();
        next
    }

    fn slot_mut(&mut self, id: FieldId) -> &mut String {
        match id {
            FieldId::InputField1 => &mut self.input_field_1,
            FieldId::SelectField1 => &mut self.select_field_1,
        }
    }
}

/// Per-field lifecycle. Only `submit` moves a field into a validated phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FieldPhase {
    #[default]
    Pristine,
    Edited,
    ValidatedOk,
    ValidatedError,
}

/// Snapshots before and after a `set_field` call.
#[derive(Clone, Debug)]
pub struct FieldChange {
    pub field: FieldId,
    pub previous: Arc<FieldValues>,
    pub current: Arc<FieldValues>,
}

impl FieldChange {
    /// False when the new value equals the old one.
    pub fn changed(&self) -> bool {
        self.previous.get(self.field) != self.current.get(self.field)
    }
}

pub struct FormStore {
    spec: &'static ConstraintSpec,
    values: Arc<FieldValues>,
    result: Arc<ValidationResult>,
    phases: [FieldPhase; FieldId::ALL.len()],
    submissions: usize,
}

impl FormStore {
    pub fn new(spec: &'static ConstraintSpec) -> Self {
        Self {
            spec,
            values: Arc::new(FieldValues::default()),
            result: Arc::new(ValidationResult::default()),
            phases: [FieldPhase::Pristine; FieldId::ALL.len()],
            submissions: 0,
        }
    }

    pub fn spec(&self) -> &'static ConstraintSpec {
        self.spec
    }

    /// Current values snapshot.
    pub fn values(&self) -> Arc<FieldValues> {
        Arc::clone(&self.values)
    }

    pub fn value(&self, id: FieldId) -> &str {
        self.values.get(id)
    }

    /// Result of the last submit (empty before the first one).
    pub fn result(&self) -> Arc<ValidationResult> {
        Arc::clone(&self.result)
    }

    /// Error message to show next to a field.
    pub fn error(&self, id: FieldId) -> Option<String> {
        self.result.message(id)
    }

    pub fn phase(&self, id: FieldId) -> FieldPhase {
        self.phases[Self::index(id)]
    }

    pub fn submissions(&self) -> usize {
        self.submissions
    }

    /// Replace one field's value. Other fields and the last validation
    /// result are left as they are.
    pub fn set_field(&mut self, id: FieldId, value: impl Into<String>) -> FieldChange {
        let previous = Arc::clone(&self.values);
        self.values = Arc::new(previous.with(id, value));
        self.phases[Self::index(id)] = FieldPhase::Edited;
        debug!(field = %id, value = self.values.get(id), "field changed");
        FieldChange {
            field: id,
            previous,
            current: Arc::clone(&self.values),
        }
    }

    /// Change handler for select controls: receives the option's display
    /// label and its key, and stores the key.
    pub fn select_option(
        &mut self,
        id: FieldId,
        _label: &str,
        key: &str,
    ) -> Result<FieldChange, FormError> {
        if !matches!(id.kind(), FieldKind::Select { .. }) {
            return Err(FormError::NotASelect(id));
        }
        let item = menu_item(key)?;
        Ok(self.set_field(id, item.key))
    }

    /// Validate the current values and replace the whole result.
    pub fn submit(&mut self) -> Arc<ValidationResult> {
        let result = validate(&self.values, self.spec);
        for id in FieldId::ALL {
            self.phases[Self::index(id)] = if result.get(id).is_some() {
                FieldPhase::ValidatedError
            } else {
                FieldPhase::ValidatedOk
            };
        }
        self.submissions += 1;
        info!(
            submission = self.submissions,
            errors = result.len(),
            "form submitted"
        );
        self.result = Arc::new(result);
        self.result()
    }

    fn index(id: FieldId) -> usize {
        match id {
            FieldId::InputField1 => 0,
            FieldId::SelectField1 => 1,
        }
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(ConstraintSpec::standard())
    }
}
