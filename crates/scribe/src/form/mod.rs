//! Form domain: field identifiers, the field state store, declarative
//! constraints and the validation engine.
//!
//! Nothing in here knows about the terminal. The `components::form`
//! module projects this state onto widgets and feeds key input back in.
//!
//! Typical usage:
//! ```ignore
//! use scribe::form::{ConstraintSpec, FieldId, FormStore};
//!
//! let mut store = FormStore::new(ConstraintSpec::standard());
//! store.set_field(FieldId::InputField1, "42");
//! store.select_option(FieldId::SelectField1, "menu-item-value-2", "menu-item-value-2");
//! assert!(store.submit().is_valid());
//! ```

pub mod constraints;
pub mod field;
pub mod store;
pub mod validate;

pub use constraints::{ConstraintSpec, Rule};
pub use field::{FieldId, FieldKind, MENU_ITEMS, MenuItem};
pub use store::{FieldChange, FieldPhase, FieldValues, FormStore};
pub use validate::{ValidationError, ValidationResult, validate};

/// Caller errors when addressing the form through strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unknown field id `{0}`")]
    UnknownField(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("field `{0}` is not a select control")]
    NotASelect(FieldId),
}
