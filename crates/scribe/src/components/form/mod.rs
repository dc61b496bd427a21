//! Interactive form (logic only; drawing lives in `render.rs`).
//!
//! Responsibilities:
//! - focus ring over the two field controls and the submit button
//! - text editing through `tui_input`, pushing every change into the store
//! - select cycling and the option picker, storing the option key
//! - turning submit requests into a validation pass on the store
//!
//! The store owns all form state; this component only keeps UI state
//! (focus, edit buffer, open picker).

mod render;

use color_eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Rect};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;
use tui_input::{Input, backend::crossterm::EventHandler};

use super::Component;
use crate::{
    action::Action,
    form::{FieldChange, FieldId, FieldKind, FormStore, MenuItem},
    theme::Theme,
    tui::{EventResponse, Frame},
};

pub use render::{CARD_HEIGHT, CARD_WIDTH};

/// A focusable control on the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Field(FieldId),
    Submit,
}

pub const CONTROLS: [Control; 3] = [
    Control::Field(FieldId::InputField1),
    Control::Field(FieldId::SelectField1),
    Control::Submit,
];

pub struct FormView {
    store: FormStore,
    focused: usize,
    /// Text edit session: buffer plus the value to restore on Esc.
    editing: Option<(Input, String)>,
    /// Highlighted row of the open option picker.
    picker: Option<usize>,
    action_tx: Option<UnboundedSender<Action>>,
}

impl FormView {
    pub fn new(store: FormStore) -> Self {
        Self {
            store,
            focused: 0,
            editing: None,
            picker: None,
            action_tx: None,
        }
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn focused(&self) -> Control {
        CONTROLS[self.focused]
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn picker(&self) -> Option<usize> {
        self.picker
    }

    pub(crate) fn edit_buffer(&self) -> Option<&Input> {
        self.editing.as_ref().map(|(input, _)| input)
    }

    fn focused_field(&self) -> Option<FieldId> {
        match self.focused() {
            Control::Field(id) => Some(id),
            Control::Submit => None,
        }
    }

    fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % CONTROLS.len();
    }

    fn focus_prev(&mut self) {
        self.focused = (self.focused + CONTROLS.len() - 1) % CONTROLS.len();
    }

    fn emit(&self, action: Action) {
        if let Some(tx) = &self.action_tx {
            let _ = tx.send(action);
        }
    }

    /// Redraw only when the store actually changed.
    fn after_change(change: FieldChange) -> Option<EventResponse<Action>> {
        Some(EventResponse::Stop(if change.changed() {
            Action::Render
        } else {
            Action::Tick
        }))
    }

    // --- text editing ------------------------------------------------------------------------

    fn start_editing(&mut self, id: FieldId) {
        let current = self.store.value(id).to_string();
        self.editing = Some((Input::default().with_value(current.clone()), current));
        self.emit(Action::EditMode(true));
    }

    fn finish_editing(&mut self, revert: bool) -> Option<EventResponse<Action>> {
        let (_, original) = self.editing.take()?;
        self.emit(Action::EditMode(false));
        match (revert, self.focused_field()) {
            (true, Some(id)) => Self::after_change(self.store.set_field(id, original)),
            _ => Some(EventResponse::Stop(Action::Render)),
        }
    }

    fn edit_key(&mut self, key: KeyEvent) -> Option<EventResponse<Action>> {
        match key.code {
            KeyCode::Enter | KeyCode::Tab | KeyCode::BackTab => {
                let response = self.finish_editing(false);
                match key.code {
                    KeyCode::Tab => self.focus_next(),
                    KeyCode::BackTab => self.focus_prev(),
                    _ => {}
                }
                response
            }
            KeyCode::Esc => self.finish_editing(true),
            _ => {
                let id = self.focused_field()?;
                let (input, _) = self.editing.as_mut()?;
                match input.handle_event(&CrosstermEvent::Key(key)) {
                    Some(changed) if changed.value => {
                        let value = input.value().to_string();
                        Self::after_change(self.store.set_field(id, value))
                    }
                    _ => Some(EventResponse::Stop(Action::Render)),
                }
            }
        }
    }

    // --- select ------------------------------------------------------------------------------

    fn options(id: FieldId) -> &'static [MenuItem] {
        match id.kind() {
            FieldKind::Select { options } => options,
            FieldKind::Text => &[],
        }
    }

    fn selected_index(&self, id: FieldId) -> Option<usize> {
        let current = self.store.value(id);
        Self::options(id).iter().position(|o| o.key == current)
    }

    fn choose(&mut self, id: FieldId, index: usize) -> Option<EventResponse<Action>> {
        let item = Self::options(id).get(index)?;
        match self.store.select_option(id, item.label, item.key) {
            Ok(change) => Self::after_change(change),
            Err(err) => Some(EventResponse::Stop(Action::Error(err.to_string()))),
        }
    }

    fn cycle(&mut self, id: FieldId, forward: bool) -> Option<EventResponse<Action>> {
        let len = Self::options(id).len();
        if len == 0 {
            return None;
        }
        let next = match (self.selected_index(id), forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.choose(id, next)
    }

    fn picker_key(&mut self, key: KeyEvent, highlighted: usize) -> Option<EventResponse<Action>> {
        let id = self.focused_field()?;
        let len = Self::options(id).len().max(1);
        match key.code {
            KeyCode::Up | KeyCode::BackTab => self.picker = Some((highlighted + len - 1) % len),
            KeyCode::Down | KeyCode::Tab => self.picker = Some((highlighted + 1) % len),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.picker = None;
                return self.choose(id, highlighted);
            }
            KeyCode::Esc => self.picker = None,
            _ => {}
        }
        Some(EventResponse::Stop(Action::Render))
    }

    // --- submit ------------------------------------------------------------------------------

    /// Validate the current values; errors are replaced as a whole.
    pub fn submit(&mut self) -> Action {
        if self.editing.is_some() {
            self.finish_editing(false);
        }
        self.picker = None;
        let result = self.store.submit();
        debug!(valid = result.is_valid(), "validation finished");
        Action::Submitted(result.len())
    }
}

impl Component for FormView {
    fn name(&self) -> &'static str {
        "form"
    }

    fn height_constraint(&self) -> Constraint {
        Constraint::Min(CARD_HEIGHT)
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(tx);
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return Ok(Some(EventResponse::Stop(Action::Submit)));
        }
        if self.editing.is_some() {
            return Ok(self.edit_key(key));
        }
        if let Some(highlighted) = self.picker {
            return Ok(self.picker_key(key, highlighted));
        }

        let response = match (self.focused(), key.code) {
            (_, KeyCode::Down | KeyCode::Tab) => {
                self.focus_next();
                Some(EventResponse::Stop(Action::Render))
            }
            (_, KeyCode::Up | KeyCode::BackTab) => {
                self.focus_prev();
                Some(EventResponse::Stop(Action::Render))
            }
            (Control::Submit, KeyCode::Enter | KeyCode::Char(' ')) => {
                Some(EventResponse::Stop(Action::Submit))
            }
            (Control::Submit, KeyCode::Char('q')) => Some(EventResponse::Stop(Action::Quit)),
            (Control::Field(id), code) => match (id.kind(), code) {
                (FieldKind::Text, KeyCode::Enter) => {
                    self.start_editing(id);
                    Some(EventResponse::Stop(Action::Render))
                }
                // typing on a focused text field starts an edit session
                (FieldKind::Text, KeyCode::Char(_) | KeyCode::Backspace)
                    if !key.modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    self.start_editing(id);
                    self.edit_key(key)
                }
                (FieldKind::Select { .. }, KeyCode::Enter) => {
                    self.picker = Some(self.selected_index(id).unwrap_or(0));
                    Some(EventResponse::Stop(Action::Render))
                }
                (FieldKind::Select { .. }, KeyCode::Right | KeyCode::Char(' ')) => {
                    self.cycle(id, true)
                }
                (FieldKind::Select { .. }, KeyCode::Left) => self.cycle(id, false),
                // `q` is text on a text control and quits everywhere else
                (FieldKind::Select { .. }, KeyCode::Char('q')) => {
                    Some(EventResponse::Stop(Action::Quit))
                }
                _ => None,
            },
            _ => None,
        };
        Ok(response)
    }

    fn handle_paste(&mut self, text: String) -> Result<Option<EventResponse<Action>>> {
        let Some(id) = self.focused_field() else {
            return Ok(None);
        };
        if id.kind() != FieldKind::Text {
            return Ok(None);
        }
        if self.editing.is_none() {
            self.start_editing(id);
        }
        let Some((input, _)) = self.editing.as_mut() else {
            return Ok(None);
        };
        let value = format!("{}{}", input.value(), text.replace(['\r', '\n'], ""));
        *input = Input::default().with_value(value.clone());
        Ok(Self::after_change(self.store.set_field(id, value)))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Submit => Ok(Some(self.submit())),
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, theme: &Theme) -> Result<()> {
        render::render_form(self, f, area, theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ValidationError;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(view: &mut FormView, code: KeyCode) -> Option<EventResponse<Action>> {
        view.handle_key_events(key(code)).unwrap()
    }

    #[test]
    fn focus_wraps_around_the_ring() {
        let mut view = FormView::new(FormStore::default());
        assert_eq!(view.focused(), Control::Field(FieldId::InputField1));
        press(&mut view, KeyCode::Up);
        assert_eq!(view.focused(), Control::Submit);
        press(&mut view, KeyCode::Tab);
        assert_eq!(view.focused(), Control::Field(FieldId::InputField1));
    }

    #[test]
    fn typing_updates_the_store_on_every_keystroke() {
        let mut view = FormView::new(FormStore::default());
        press(&mut view, KeyCode::Char('4'));
        assert!(view.is_editing());
        assert_eq!(view.store().value(FieldId::InputField1), "4");
        press(&mut view, KeyCode::Char('2'));
        assert_eq!(view.store().value(FieldId::InputField1), "42");
        press(&mut view, KeyCode::Enter);
        assert!(!view.is_editing());
        assert_eq!(view.store().value(FieldId::InputField1), "42");
    }

    #[test]
    fn escape_restores_the_value_from_before_the_edit() {
        let mut view = FormView::new(FormStore::default());
        press(&mut view, KeyCode::Char('1'));
        press(&mut view, KeyCode::Enter);
        press(&mut view, KeyCode::Enter);
        press(&mut view, KeyCode::Char('x'));
        assert_eq!(view.store().value(FieldId::InputField1), "1x");
        press(&mut view, KeyCode::Esc);
        assert_eq!(view.store().value(FieldId::InputField1), "1");
    }

    #[test]
    fn select_cycles_and_stores_keys() {
        let mut view = FormView::new(FormStore::default());
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Right);
        assert_eq!(view.store().value(FieldId::SelectField1), "menu-item-value-1");
        press(&mut view, KeyCode::Left);
        assert_eq!(view.store().value(FieldId::SelectField1), "menu-item-value-3");
    }

    #[test]
    fn picker_chooses_highlighted_option() {
        let mut view = FormView::new(FormStore::default());
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Enter);
        assert_eq!(view.picker(), Some(0));
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Enter);
        assert_eq!(view.picker(), None);
        assert_eq!(view.store().value(FieldId::SelectField1), "menu-item-value-2");
    }

    #[test]
    fn submit_button_and_shortcut_request_submit() {
        let mut view = FormView::new(FormStore::default());
        let shortcut = view
            .handle_key_events(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(shortcut, Some(EventResponse::Stop(Action::Submit)));

        press(&mut view, KeyCode::BackTab);
        assert_eq!(
            press(&mut view, KeyCode::Enter),
            Some(EventResponse::Stop(Action::Submit))
        );
    }

    #[test]
    fn submit_reports_error_count_and_keeps_errors_while_editing() {
        let mut view = FormView::new(FormStore::default());
        assert_eq!(view.update(Action::Submit).unwrap(), Some(Action::Submitted(2)));

        press(&mut view, KeyCode::Char('9'));
        assert_eq!(
            view.store().result().get(FieldId::InputField1),
            Some(&ValidationError::MissingValue(FieldId::InputField1))
        );
        assert_eq!(view.update(Action::Submit).unwrap(), Some(Action::Submitted(1)));
        assert!(!view.is_editing());
    }

    #[test]
    fn q_is_text_on_the_text_field_and_quits_elsewhere() {
        let mut view = FormView::new(FormStore::default());
        press(&mut view, KeyCode::Char('q'));
        assert!(view.is_editing());
        assert_eq!(view.store().value(FieldId::InputField1), "q");
        press(&mut view, KeyCode::Enter);

        press(&mut view, KeyCode::Down);
        assert_eq!(
            press(&mut view, KeyCode::Char('q')),
            Some(EventResponse::Stop(Action::Quit))
        );
        press(&mut view, KeyCode::Down);
        assert_eq!(
            press(&mut view, KeyCode::Char('q')),
            Some(EventResponse::Stop(Action::Quit))
        );
    }

    #[test]
    fn paste_goes_into_the_text_field() {
        let mut view = FormView::new(FormStore::default());
        view.handle_paste("12\n".into()).unwrap();
        assert_eq!(view.store().value(FieldId::InputField1), "12");
    }
}
