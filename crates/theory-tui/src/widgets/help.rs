//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `F1`; close with `F1` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("Tab", "Select highlighted match, or next field"),
    ("Shift+Tab", "Previous field"),
    ("↑  /  ↓", "Move through matches"),
    ("Enter", "Select highlighted match"),
    ("Escape", "Close the match list"),
    ("←  →  Home  End", "Move the cursor"),
    ("Backspace / Delete", "Delete a character"),
    ("Mouse", "Hover to highlight, click to select"),
    ("Ctrl+n", "New task (clear the form)"),
    ("F1", "Toggle this help popup"),
    ("Ctrl+c  /  Ctrl+q", "Quit"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = BINDINGS.len() as u16 + 2;
        let popup = centered_rect(66, height, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" theory-task keybindings (F1 to close) ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {key:<22}"),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
