pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod errors;
pub mod form;
pub mod logging;
pub mod theme;
pub mod tui;

use form::{ConstraintSpec, FieldId, FormError, FormStore, ValidationResult};

/// Headless validation of one set of values against the standard
/// constraints. An empty select key counts as "nothing selected".
pub fn run_check(input_field_1: &str, select_field_1: &str) -> Result<ValidationResult, FormError> {
    let mut store = FormStore::new(ConstraintSpec::standard());
    store.set_field(FieldId::InputField1, input_field_1);
    if !select_field_1.is_empty() {
        store.select_option(FieldId::SelectField1, select_field_1, select_field_1)?;
    }
    Ok(store.submit().as_ref().clone())
}
