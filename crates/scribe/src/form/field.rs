//! Field identifiers and control metadata.
//!
//! The set of fields is closed: every form value, constraint and error is
//! keyed by [`FieldId`], so an unknown field can only appear when parsing
//! a string coming from outside (CLI, config), which yields
//! [`FormError::UnknownField`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::FormError;

/// Identifier of a form field (the key into values, constraints and errors).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldId {
    #[serde(rename = "input-field-1")]
    InputField1,
    #[serde(rename = "select-field-1")]
    SelectField1,
}

impl FieldId {
    /// All fields in display order.
    pub const ALL: [FieldId; 2] = [FieldId::InputField1, FieldId::SelectField1];

    pub const fn as_str(self) -> &'static str {
        match self {
            FieldId::InputField1 => "input-field-1",
            FieldId::SelectField1 => "select-field-1",
        }
    }

    /// Id of the control the field is bound to.
    pub const fn control_id(self) -> &'static str {
        match self {
            FieldId::InputField1 => "text-field-1",
            FieldId::SelectField1 => "select-field-1",
        }
    }

    /// Floating label shown above the control.
    pub const fn label(self) -> &'static str {
        match self {
            FieldId::InputField1 => "Input TextField",
            FieldId::SelectField1 => "Input SelectField",
        }
    }

    /// Human-readable attribute name used in error messages
    /// (`input-field-1` -> `Input field 1`).
    pub fn pretty_name(self) -> String {
        let spaced = self.as_str().replace(['-', '_'], " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::InputField1 => FieldKind::Text,
            FieldId::SelectField1 => FieldKind::Select {
                options: MENU_ITEMS,
            },
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Kind of control a field renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text editor; stores the raw input.
    Text,
    /// Fixed option list; stores the selected option's key.
    Select { options: &'static [MenuItem] },
}

/// One option of a select control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub key: &'static str,
    pub label: &'static str,
}

pub const MENU_ITEMS: &[MenuItem] = &[
    MenuItem {
        key: "menu-item-value-1",
        label: "menu-item-value-1",
    },
    MenuItem {
        key: "menu-item-value-2",
        label: "menu-item-value-2",
    },
    MenuItem {
        key: "menu-item-value-3",
        label: "menu-item-value-3",
    },
];

/// Look up a menu item by key.
pub fn menu_item(key: &str) -> Result<&'static MenuItem, FormError> {
    MENU_ITEMS
        .iter()
        .find(|item| item.key == key)
        .ok_or_else(|| FormError::UnknownOption(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_strings() {
        for id in FieldId::ALL {
            assert_eq!(id.as_str().parse::<FieldId>().unwrap(), id);
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        let err = "input-field-2".parse::<FieldId>().unwrap_err();
        assert_eq!(err, FormError::UnknownField("input-field-2".into()));
    }

    #[test]
    fn pretty_names_match_message_style() {
        assert_eq!(FieldId::InputField1.pretty_name(), "Input field 1");
        assert_eq!(FieldId::SelectField1.pretty_name(), "Select field 1");
    }

    #[test]
    fn text_control_is_bound_to_input_field() {
        assert_eq!(FieldId::InputField1.control_id(), "text-field-1");
        assert_eq!(FieldId::SelectField1.control_id(), "select-field-1");
    }

    #[test]
    fn select_offers_exactly_three_options() {
        let FieldKind::Select { options } = FieldId::SelectField1.kind() else {
            panic!("select-field-1 must be a select");
        };
        let keys: Vec<_> = options.iter().map(|o| o.key).collect();
        assert_eq!(
            keys,
            ["menu-item-value-1", "menu-item-value-2", "menu-item-value-3"]
        );
        assert!(menu_item("menu-item-value-4").is_err());
    }
}
