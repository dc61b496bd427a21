use color_eyre::Result;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::{
    action::Action,
    theme::{Theme, UiGroup},
    tui::Frame,
};

/// Single bottom line: editing mode, outcome of the last submit and key
/// hints on the left, color depth on the right.
#[derive(Default)]
pub struct StatusBar {
    editing: bool,
    last_submit: Option<usize>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    fn outcome(&self) -> Option<(String, UiGroup)> {
        match self.last_submit? {
            0 => Some(("submitted, no errors".to_string(), UiGroup::Success)),
            1 => Some(("1 field needs attention".to_string(), UiGroup::Error)),
            n => Some((format!("{n} fields need attention"), UiGroup::Error)),
        }
    }

    fn hints(&self) -> &'static str {
        if self.editing {
            "Enter: confirm  Esc: cancel"
        } else {
            "Tab/↑↓: move  Enter: edit/select/submit  ←→: choose  Ctrl+S: submit  Ctrl+C: quit"
        }
    }
}

impl Component for StatusBar {
    fn name(&self) -> &'static str {
        "status"
    }

    fn height_constraint(&self) -> Constraint {
        Constraint::Length(1)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::EditMode(editing) => self.editing = editing,
            Action::Submitted(errors) => self.last_submit = Some(errors),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, theme: &Theme) -> Result<()> {
        let cols =
            Layout::horizontal([Constraint::Percentage(80), Constraint::Percentage(20)]).split(area);

        let mode = if self.editing { " EDIT " } else { " NAV " };
        let mut left = vec![
            Span::styled(mode, theme.style(UiGroup::ButtonFocused)),
            Span::raw(" "),
        ];
        if let Some((text, group)) = self.outcome() {
            left.push(Span::styled(text, theme.style(group)));
            left.push(Span::raw("  "));
        }
        left.push(Span::styled(self.hints(), theme.style(UiGroup::Hint)));

        f.render_widget(Paragraph::new(Line::from(left)), cols[0]);
        f.render_widget(
            Paragraph::new(Span::styled(
                format!(" {} ", theme.mode_label()),
                theme.style(UiGroup::Button),
            ))
            .alignment(Alignment::Right),
            cols[1],
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_submit_outcome_and_mode() {
        let mut bar = StatusBar::new();
        assert_eq!(bar.outcome(), None);

        bar.update(Action::Submitted(2)).unwrap();
        assert_eq!(
            bar.outcome(),
            Some(("2 fields need attention".to_string(), UiGroup::Error))
        );

        bar.update(Action::Submitted(0)).unwrap();
        assert_eq!(bar.outcome().map(|(t, _)| t).as_deref(), Some("submitted, no errors"));

        bar.update(Action::EditMode(true)).unwrap();
        assert!(bar.hints().starts_with("Enter: confirm"));
    }
}
