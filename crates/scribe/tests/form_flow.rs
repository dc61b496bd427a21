//! End-to-end behaviour of the form without a terminal:
//! - submit with defaults flags both fields
//! - corrected values clear every error on the next submit
//! - key input drives the same store the validation reads
//! - the headless check mirrors the interactive result

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;

use scribe::{
    action::Action,
    components::{Component, form::FormView},
    form::{ConstraintSpec, FieldId, FormStore, ValidationError},
    run_check,
};

fn press(view: &mut FormView, code: KeyCode) {
    view.handle_key_events(KeyEvent::new(code, KeyModifiers::NONE))
        .unwrap();
}

#[test]
fn submit_with_defaults_then_fix_both_fields() {
    let mut store = FormStore::new(ConstraintSpec::standard());

    let first = store.submit();
    assert_eq!(
        first.get(FieldId::InputField1),
        Some(&ValidationError::MissingValue(FieldId::InputField1))
    );
    assert_eq!(
        first.get(FieldId::SelectField1),
        Some(&ValidationError::MissingValue(FieldId::SelectField1))
    );

    store.set_field(FieldId::InputField1, "5");
    store
        .select_option(FieldId::SelectField1, "menu-item-value-3", "menu-item-value-3")
        .unwrap();
    let second = store.submit();
    assert!(second.is_valid());
    for id in FieldId::ALL {
        assert_eq!(store.error(id), None);
    }
}

#[test]
fn keyboard_session_reaches_a_valid_submit() {
    let mut view = FormView::new(FormStore::default());
    assert_eq!(view.update(Action::Submit).unwrap(), Some(Action::Submitted(2)));

    // text field: type, confirm
    press(&mut view, KeyCode::Char('5'));
    press(&mut view, KeyCode::Enter);
    // select field: open picker, go to the third option, choose it
    press(&mut view, KeyCode::Down);
    press(&mut view, KeyCode::Enter);
    press(&mut view, KeyCode::Down);
    press(&mut view, KeyCode::Down);
    press(&mut view, KeyCode::Enter);

    assert_eq!(view.store().value(FieldId::InputField1), "5");
    assert_eq!(view.store().value(FieldId::SelectField1), "menu-item-value-3");
    assert_eq!(view.update(Action::Submit).unwrap(), Some(Action::Submitted(0)));
    assert!(view.store().result().is_valid());
}

#[test]
fn non_numeric_input_is_reported_after_submit() {
    let mut view = FormView::new(FormStore::default());
    for c in "abc".chars() {
        press(&mut view, KeyCode::Char(c));
    }
    press(&mut view, KeyCode::Enter);
    press(&mut view, KeyCode::Down);
    press(&mut view, KeyCode::Right);

    view.update(Action::Submit).unwrap();
    assert_eq!(
        view.store().error(FieldId::InputField1).as_deref(),
        Some("Input field 1 is not a number")
    );
    assert_eq!(view.store().error(FieldId::SelectField1), None);
}

#[test]
fn headless_check_matches_interactive_validation() {
    let result = run_check("42", "menu-item-value-2").unwrap();
    assert!(result.is_valid());
    assert_eq!(serde_json::to_string(&result).unwrap(), "{}");

    let result = run_check("", "").unwrap();
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        serde_json::json!({
            "input-field-1": ["Input field 1 can't be blank"],
            "select-field-1": ["Select field 1 can't be blank"],
        })
    );

    assert!(run_check("1", "menu-item-value-9").is_err());
}
