//! Controls popup: lists every action with its bindings and lets the user
//! rebind them.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use page_motion::config::{Action, AppConfig};

/// Interactive controls / keybinding popup overlay.
pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
    pub selected: usize,
    pub awaiting_rebind: bool,
}

impl<'a> Widget for ControlsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // actions + 3 blank rows + reset + hint + 2 border rows
        let height = (Action::ALL.len() as u16) + 7;
        let popup = centered_fixed(56, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Controls ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        for (i, &action) in Action::ALL.iter().enumerate() {
            lines.push(self.action_row(i, action, inner.width as usize));
        }

        let reset_selected = self.selected == Action::ALL.len();
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("{}⟳ Reset bindings", marker(reset_selected)),
            row_style(reset_selected),
        )));

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter: add key  Del: clear  Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

impl ControlsPopup<'_> {
    /// Label left-aligned, bindings right-aligned.
    fn action_row(&self, index: usize, action: Action, width: usize) -> Line<'static> {
        let selected = index == self.selected;
        let capturing = selected && self.awaiting_rebind;

        let keys = if capturing {
            "Press a key…".to_string()
        } else {
            self.config.display_bindings(action)
        };
        let mut key_style = Style::default().fg(Color::Yellow);
        if selected {
            key_style = key_style.bg(Color::DarkGray);
        }
        if capturing {
            key_style = key_style.add_modifier(Modifier::BOLD);
        }

        let label_col = format!("{}{:<26}", marker(selected), action.label());
        let keys_width = width.saturating_sub(label_col.chars().count()).max(1);
        Line::from(vec![
            Span::styled(label_col, row_style(selected)),
            Span::styled(format!("{keys:>keys_width$}"), key_style),
        ])
    }
}

fn marker(selected: bool) -> &'static str {
    if selected {
        " ▸ "
    } else {
        "   "
    }
}

fn row_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_fixed(56, 22, area), Rect::new(0, 0, 40, 10));
        assert_eq!(centered_fixed(20, 4, area), Rect::new(10, 3, 20, 4));
    }
}
