//! Single-line text field: one row of the form: a label and an input box.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` / `Delete` remove the character before / under the cursor.
//! - `Left` / `Right` move one character, `Home` / `End` jump to the ends.
//!
//! The field value itself lives in the form; [`TextCursor`] only tracks where
//! the caret sits inside it.

use crate::event::AppEvent;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Caret position for the focused field, as a byte offset on a char boundary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TextCursor {
    pub pos: usize,
}

impl TextCursor {
    /// Place the caret after the last character.
    pub fn at_end(value: &str) -> Self {
        Self { pos: value.len() }
    }

    /// Apply an editing event to `value`. Returns `true` when the text
    /// changed; caret-only moves return `false`.
    pub fn edit(&mut self, value: &mut String, event: &AppEvent) -> bool {
        self.pos = self.pos.min(value.len());
        while !value.is_char_boundary(self.pos) {
            self.pos -= 1;
        }

        match event {
            AppEvent::Char(c) => {
                value.insert(self.pos, *c);
                self.pos += c.len_utf8();
                true
            }
            AppEvent::Backspace => {
                let Some(prev) = prev_boundary(value, self.pos) else {
                    return false;
                };
                value.remove(prev);
                self.pos = prev;
                true
            }
            AppEvent::Delete => {
                if self.pos >= value.len() {
                    return false;
                }
                value.remove(self.pos);
                true
            }
            AppEvent::Left => {
                if let Some(prev) = prev_boundary(value, self.pos) {
                    self.pos = prev;
                }
                false
            }
            AppEvent::Right => {
                if let Some(c) = value[self.pos..].chars().next() {
                    self.pos += c.len_utf8();
                }
                false
            }
            AppEvent::Home => {
                self.pos = 0;
                false
            }
            AppEvent::End => {
                self.pos = value.len();
                false
            }
            _ => false,
        }
    }

    /// Column of the caret in `value`, counted in characters.
    pub fn column(&self, value: &str) -> usize {
        value
            .get(..self.pos.min(value.len()))
            .map(|s| s.chars().count())
            .unwrap_or_else(|| value.chars().count())
    }
}

fn prev_boundary(value: &str, pos: usize) -> Option<usize> {
    value[..pos].char_indices().last().map(|(i, _)| i)
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// The label column of a field, with a focus marker in front.
pub struct FieldLabel<'a> {
    label: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FieldLabel<'a> {
    pub fn new(label: &'a str, focused: bool, theme: &'a Theme) -> Self {
        Self {
            label,
            focused,
            theme,
        }
    }
}

impl Widget for FieldLabel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (marker, marker_style) = if self.focused {
            ("▸ ", self.theme.border_focused)
        } else {
            ("  ", self.theme.border_unfocused)
        };
        let line = Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(format!("{}:", self.label), self.theme.label),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// The input box of a field.
pub struct FieldValue<'a> {
    value: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FieldValue<'a> {
    pub fn new(value: &'a str, focused: bool, theme: &'a Theme) -> Self {
        Self {
            value,
            focused,
            theme,
        }
    }

    /// Absolute terminal position of the caret inside `input`.
    pub fn cursor_position(value: &str, cursor: TextCursor, input: Rect) -> (u16, u16) {
        let width = input.width as usize;
        let skip = value.chars().count().saturating_sub(width.saturating_sub(1));
        let col = cursor.column(value).saturating_sub(skip);
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        let x = input
            .x
            .saturating_add(col)
            .min(input.right().saturating_sub(1));
        (x, input.y)
    }
}

impl Widget for FieldValue<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let base = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        // Underscores mark the input box; text draws over them.
        let width = area.width as usize;
        buf.set_string(area.x, area.y, "_".repeat(width), base);

        // Keep the end of the text visible when it is wider than the box.
        let skip = self.value.chars().count().saturating_sub(width.saturating_sub(1));
        let shown: String = self.value.chars().skip(skip).collect();
        buf.set_stringn(area.x, area.y, shown, width, self.theme.value);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn type_str(cursor: &mut TextCursor, value: &mut String, s: &str) {
        for c in s.chars() {
            cursor.edit(value, &AppEvent::Char(c));
        }
    }

    #[test]
    fn typing_and_backspace() {
        let mut value = String::new();
        let mut cursor = TextCursor::default();
        type_str(&mut cursor, &mut value, "phle");
        assert_eq!(value, "phle");
        assert!(cursor.edit(&mut value, &AppEvent::Backspace));
        assert_eq!(value, "phl");
        assert_eq!(cursor.pos, 3);
    }

    #[test]
    fn caret_moves_do_not_change_text() {
        let mut value = "store".to_string();
        let mut cursor = TextCursor::at_end(&value);
        assert!(!cursor.edit(&mut value, &AppEvent::Home));
        assert_eq!(cursor.pos, 0);
        assert!(!cursor.edit(&mut value, &AppEvent::Right));
        assert_eq!(cursor.pos, 1);
        assert!(cursor.edit(&mut value, &AppEvent::Delete));
        assert_eq!(value, "sore");
        assert!(!cursor.edit(&mut value, &AppEvent::End));
        assert!(!cursor.edit(&mut value, &AppEvent::Delete));
    }

    #[test]
    fn multibyte_editing_stays_on_char_boundaries() {
        let mut value = "Café".to_string();
        let mut cursor = TextCursor::at_end(&value);
        cursor.edit(&mut value, &AppEvent::Left);
        assert_eq!(cursor.column(&value), 3);
        cursor.edit(&mut value, &AppEvent::Delete);
        assert_eq!(value, "Caf");
        cursor.edit(&mut value, &AppEvent::Char('é'));
        assert_eq!(value, "Café");
        assert_eq!(cursor.column(&value), 4);
    }

    #[test]
    fn stale_cursor_is_clamped() {
        let mut value = "ab".to_string();
        let mut cursor = TextCursor { pos: 10 };
        cursor.edit(&mut value, &AppEvent::Char('c'));
        assert_eq!(value, "abc");
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut value = "x".to_string();
        let mut cursor = TextCursor::default();
        assert!(!cursor.edit(&mut value, &AppEvent::Backspace));
        assert_eq!(value, "x");
    }

    #[test]
    fn long_value_shows_its_tail() {
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        FieldValue::new("abcdefgh", false, &theme).render(area, &mut buf);
        let text: String = (0..5).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(text, "efgh_");
    }
}
