use color_eyre::Result;
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    text::Line,
    widgets::Paragraph,
};

use super::Component;
use crate::{
    theme::{Theme, UiGroup},
    tui::Frame,
};

/// Title banner across the top of the screen.
pub struct Header {
    title: String,
}

impl Header {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new("Welcome to Scribe")
    }
}

impl Component for Header {
    fn name(&self) -> &'static str {
        "header"
    }

    fn height_constraint(&self) -> Constraint {
        Constraint::Length(3)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, theme: &Theme) -> Result<()> {
        let style = theme.style(UiGroup::Title);
        let lines = vec![
            Line::raw(""),
            Line::raw(self.title.as_str()),
            Line::raw(""),
        ];
        let banner = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(style);
        f.render_widget(banner, area);
        Ok(())
    }
}
