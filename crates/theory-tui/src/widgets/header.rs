//! Header line: task reference on the left, clock on the right.

use crate::theme::Theme;
use chrono::NaiveDateTime;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use std::fmt::Write;

pub struct Header<'a> {
    reference: &'a str,
    time: String,
    date: String,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// `time_format` / `date_format` are chrono strftime strings; an invalid
    /// one renders as `?` instead of failing the frame.
    pub fn new(
        reference: &'a str,
        now: NaiveDateTime,
        time_format: &str,
        date_format: &str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            reference,
            time: format_or_placeholder(now, time_format),
            date: format_or_placeholder(now, date_format),
            theme,
        }
    }
}

fn format_or_placeholder(now: NaiveDateTime, fmt: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", now.format(fmt)) {
        Ok(()) => out,
        Err(_) => {
            tracing::warn!(format = fmt, "invalid clock format");
            "?".to_string()
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let reference = if self.reference.is_empty() { "-" } else { self.reference };
        let left = Line::from(vec![
            Span::styled(" REF: ", self.theme.label),
            Span::styled(reference, self.theme.header_reference),
        ]);
        buf.set_line(area.x, area.y, &left, area.width);

        let clock = format!("TIME: {} | DATE: {} ", self.time, self.date);
        let width = clock.chars().count() as u16;
        let x = area.right().saturating_sub(width).max(area.x);
        buf.set_stringn(x, area.y, clock, area.width as usize, self.theme.header_clock);
    }
}
