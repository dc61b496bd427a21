//! Rendering of the form card into an in-memory terminal.

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, widgets::BorderType};

use scribe::{
    action::Action,
    components::{Component, form::FormView},
    form::{ConstraintSpec, FieldId, FormStore, Rule},
    theme::Theme,
};

fn draw(view: &mut FormView, theme: &Theme) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
    terminal
        .draw(|f| view.draw(f, f.area(), theme).unwrap())
        .unwrap();
    terminal.backend().buffer().clone()
}

fn screen_text(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn labels_and_submit_control_are_visible() {
    let mut view = FormView::new(FormStore::default());
    let text = screen_text(&draw(&mut view, &Theme::default()));
    assert!(text.contains("Input TextField"));
    assert!(text.contains("Input SelectField"));
    assert!(text.contains("[ Submit ]"));
    assert!(!text.contains("can't be blank"));
}

#[test]
fn required_fields_are_marked() {
    let mut view = FormView::new(FormStore::default());
    let text = screen_text(&draw(&mut view, &Theme::default()));
    assert!(text.contains("Input TextField *"));
    assert!(text.contains("Input SelectField *"));

    let optional_select: &'static ConstraintSpec = Box::leak(Box::new(
        ConstraintSpec::default()
            .field(FieldId::InputField1, [Rule::presence(), Rule::Numericality])
            .field(FieldId::SelectField1, [Rule::Presence { allow_empty: true }]),
    ));
    let mut view = FormView::new(FormStore::new(optional_select));
    let text = screen_text(&draw(&mut view, &Theme::default()));
    assert!(text.contains("Input TextField *"));
    assert!(!text.contains("Input SelectField *"));
}

#[test]
fn errors_appear_after_submit_and_clear_after_valid_submit() {
    let theme = Theme::default();
    let mut view = FormView::new(FormStore::default());
    view.update(Action::Submit).unwrap();
    let text = screen_text(&draw(&mut view, &theme));
    assert!(text.contains("Input field 1 can't be blank"));
    assert!(text.contains("Select field 1 can't be blank"));

    let mut store = FormStore::default();
    store.set_field(FieldId::InputField1, "5");
    store
        .select_option(FieldId::SelectField1, "menu-item-value-3", "menu-item-value-3")
        .unwrap();
    let mut view = FormView::new(store);
    view.update(Action::Submit).unwrap();
    let text = screen_text(&draw(&mut view, &theme));
    assert!(!text.contains("can't be blank"));
    assert!(text.contains("menu-item-value-3"));
}

#[test]
fn rounded_frames_when_not_flat() {
    let theme = Theme {
        flat: false,
        ..Theme::default()
    };
    assert_eq!(theme.border_type(), BorderType::Rounded);
    let mut view = FormView::new(FormStore::default());
    let text = screen_text(&draw(&mut view, &theme));
    assert!(text.contains('╭'));

    let mut view = FormView::new(FormStore::default());
    let text = screen_text(&draw(&mut view, &Theme::default()));
    assert!(!text.contains('╭'));
    assert!(text.contains('┌'));
}
