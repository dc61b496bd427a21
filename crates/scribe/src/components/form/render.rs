use color_eyre::Result;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
};

use super::{Control, FormView};
use crate::{
    form::{FieldId, FieldKind, MenuItem},
    theme::{Theme, UiGroup},
    tui::Frame,
};

pub const CARD_WIDTH: u16 = 56;
/// Border, top padding, two field blocks and the button row.
pub const CARD_HEIGHT: u16 = 2 + 1 + 2 * FIELD_HEIGHT + 1;

/// Label, 3-row value box, error line and spacer.
const FIELD_HEIGHT: u16 = 6;

/// Compute a centered rectangle with a fixed width/height clamped to `area`.
pub fn centered_rect_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x.saturating_add(area.width.saturating_sub(w) / 2),
        y: area.y.saturating_add(area.height.saturating_sub(h) / 2),
        width: w,
        height: h,
    }
}

/// One-cell offset block behind `rect`, clipped to `bounds`.
fn shadow_rect(rect: Rect, bounds: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width,
        height: rect.height,
    }
    .intersection(bounds)
}

/// Text shown inside a field's value box.
fn display_value(view: &FormView, id: FieldId) -> (String, UiGroup) {
    if view.focused() == Control::Field(id) {
        if let Some(input) = view.edit_buffer() {
            return (input.value().to_string(), UiGroup::Value);
        }
    }
    let value = view.store().value(id);
    match id.kind() {
        FieldKind::Text if value.is_empty() => ("type a number".into(), UiGroup::Placeholder),
        FieldKind::Text => (value.to_string(), UiGroup::Value),
        FieldKind::Select { options } => match options.iter().find(|o| o.key == value) {
            Some(item) => (item.label.to_string(), UiGroup::Value),
            None => ("choose an option".into(), UiGroup::Placeholder),
        },
    }
}

pub fn render_form(view: &FormView, f: &mut Frame<'_>, area: Rect, theme: &Theme) -> Result<()> {
    if area.width < 10 || area.height < 5 {
        return Ok(());
    }

    let card = centered_rect_fixed(area, CARD_WIDTH, CARD_HEIGHT);
    if !theme.flat {
        f.render_widget(
            Block::default().style(theme.style(UiGroup::Shadow)),
            shadow_rect(card, area),
        );
    }
    f.render_widget(Clear, card);

    let frame = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type())
        .border_style(theme.style(UiGroup::Border))
        .style(theme.style(UiGroup::Canvas))
        .padding(Padding::new(2, 2, 1, 0));
    let inner = frame.inner(card);
    f.render_widget(frame, card);

    let rows = Layout::vertical([
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(1),
    ])
    .split(inner);

    for (id, row) in FieldId::ALL.into_iter().zip(rows.iter()) {
        render_field(view, f, *row, theme, id);
    }
    render_submit(view, f, rows[2], theme);

    if let (Some(highlighted), Control::Field(id)) = (view.picker(), view.focused()) {
        if let FieldKind::Select { options } = id.kind() {
            render_picker(f, area, theme, id, options, highlighted);
        }
    }
    Ok(())
}

fn render_field(view: &FormView, f: &mut Frame<'_>, area: Rect, theme: &Theme, id: FieldId) {
    let focused = view.focused() == Control::Field(id);
    let [label_area, box_area, error_area, _] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let label_group = if focused {
        UiGroup::LabelFocused
    } else {
        UiGroup::Label
    };
    let mut label = vec![Span::styled(id.label(), theme.style(label_group))];
    if view.store().spec().is_required(id) {
        label.push(Span::styled(" *", theme.style(UiGroup::Error)));
    }
    f.render_widget(Paragraph::new(Line::from(label)), label_area);

    let border_group = if focused {
        UiGroup::BorderFocused
    } else {
        UiGroup::Border
    };
    let value_block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type())
        .border_style(theme.style(border_group))
        .style(theme.style(UiGroup::Canvas));
    let value_inner = value_block.inner(box_area);

    let (text, group) = display_value(view, id);
    let mut spans = vec![Span::styled(text, theme.style(group))];
    if let FieldKind::Select { .. } = id.kind() {
        let pad = (value_inner.width as usize).saturating_sub(spans[0].width() + 1);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled("▾", theme.style(border_group)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(value_block), box_area);

    if let Some(input) = view.edit_buffer().filter(|_| focused) {
        let scroll = input.visual_scroll(value_inner.width.saturating_sub(1) as usize);
        let x = input.visual_cursor().saturating_sub(scroll) as u16;
        f.set_cursor_position(Position::new(
            value_inner.x + x.min(value_inner.width.saturating_sub(1)),
            value_inner.y,
        ));
    }

    if let Some(message) = view.store().error(id) {
        f.render_widget(
            Paragraph::new(Span::styled(message, theme.style(UiGroup::Error))),
            error_area,
        );
    }
}

fn render_submit(view: &FormView, f: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let group = if view.focused() == Control::Submit {
        UiGroup::ButtonFocused
    } else {
        UiGroup::Button
    };
    f.render_widget(
        Paragraph::new(Span::styled("[ Submit ]", theme.style(group))).alignment(Alignment::Left),
        area,
    );
}

fn render_picker(
    f: &mut Frame<'_>,
    area: Rect,
    theme: &Theme,
    id: FieldId,
    options: &[MenuItem],
    highlighted: usize,
) {
    let height = options.len() as u16 + 2;
    let popup = centered_rect_fixed(area, CARD_WIDTH.saturating_sub(8), height);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type())
        .border_style(theme.style(UiGroup::BorderFocused))
        .title(Span::styled(
            format!(" {} ", id.label()),
            theme.style(UiGroup::PickerHeader),
        ))
        .style(theme.style(UiGroup::Canvas));

    let items: Vec<ListItem> = options
        .iter()
        .map(|o| ListItem::new(o.label).style(theme.style(UiGroup::Value)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(theme.style(UiGroup::OptionSelected))
        .highlight_symbol("› ");
    let mut state = ListState::default().with_selected(Some(highlighted));
    f.render_stateful_widget(list, popup, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_clamped_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect_fixed(area, 20, 4), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_rect_fixed(area, 80, 40), area);
    }

    #[test]
    fn shadow_stays_inside_bounds() {
        let bounds = Rect::new(0, 0, 20, 10);
        let shadow = shadow_rect(Rect::new(0, 0, 20, 10), bounds);
        assert_eq!(shadow, Rect::new(1, 1, 19, 9));
    }
}
