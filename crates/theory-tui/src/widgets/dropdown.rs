//! Autocomplete popup: the list of matches drawn under (or over) a field.
//!
//! Placement and hit-testing are pure functions of rectangles so the app can
//! route mouse events to rows without re-rendering.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Widget},
};
use std::ops::Range;
use theory_core::autocomplete::SearchSession;
use theory_core::search::split_highlighted;

/// Where the popup for an input at `anchor` goes, showing `rows` rows.
///
/// The popup sits directly below the input. When that would overflow the
/// viewport and there is more room above, it flips above instead. Its height
/// is clamped to the room on the chosen side, so it may end up showing fewer
/// rows than requested (the session scrolls to keep the highlight visible).
pub fn placement(anchor: Rect, rows: usize, viewport: Rect) -> Rect {
    let wanted = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2);
    let below = viewport.bottom().saturating_sub(anchor.bottom());
    let above = anchor.y.saturating_sub(viewport.y);

    let (y, height) = if wanted <= below || below >= above {
        (anchor.bottom(), wanted.min(below))
    } else {
        let height = wanted.min(above);
        (anchor.y - height, height)
    };

    let x = anchor.x.max(viewport.x);
    let width = anchor.width.min(viewport.right().saturating_sub(x));
    Rect::new(x, y, width, height)
}

/// Number of match rows that fit inside a popup of this size.
pub fn capacity(popup: Rect) -> usize {
    popup.height.saturating_sub(2) as usize
}

/// The session row under terminal cell (`col`, `row`), if any.
///
/// `window` is the range of session rows currently drawn, as returned by
/// [`SearchSession::visible_window`] for this popup's capacity.
pub fn row_at(popup: Rect, window: Range<usize>, col: u16, row: u16) -> Option<usize> {
    let inner = Block::bordered().inner(popup);
    if col < inner.x || col >= inner.right() || row < inner.y || row >= inner.bottom() {
        return None;
    }
    let index = window.start + (row - inner.y) as usize;
    window.contains(&index).then_some(index)
}

/// Whether (`col`, `row`) falls anywhere on the popup, border included.
pub fn contains(popup: Rect, col: u16, row: u16) -> bool {
    col >= popup.x && col < popup.right() && row >= popup.y && row < popup.bottom()
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct Dropdown<'a> {
    session: &'a SearchSession,
    theme: &'a Theme,
}

impl<'a> Dropdown<'a> {
    pub fn new(session: &'a SearchSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

impl Widget for Dropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 3 {
            return;
        }
        Clear.render(area, buf);

        let rows = self.session.rows();
        let title = format!(" {} ", rows.len());
        let block = Block::bordered()
            .title_top(Line::from(title).right_aligned())
            .border_style(self.theme.dropdown_border);
        let inner = block.inner(area);
        block.render(area, buf);

        let window = self.session.visible_window(capacity(area));
        for (offset, index) in window.enumerate() {
            let Some(row) = rows.get(index) else { break };
            let selected = self.session.highlighted() == Some(index);
            let base = if selected {
                self.theme.dropdown_selected
            } else {
                self.theme.dropdown_row
            };

            let spans: Vec<Span> = split_highlighted(&row.label, &row.highlights)
                .into_iter()
                .map(|(text, hit)| {
                    let style: Style = if hit {
                        base.patch(self.theme.match_highlight)
                    } else {
                        base
                    };
                    Span::styled(text, style)
                })
                .collect();

            let y = inner.y + offset as u16;
            buf.set_style(Rect::new(inner.x, y, inner.width, 1), base);
            buf.set_line(inner.x, y, &Line::from(spans), inner.width);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use theory_core::autocomplete::{Autocomplete, AutocompleteConfig, Nav};
    use theory_core::{Record, RecordCollection};

    const VIEWPORT: Rect = Rect::new(0, 0, 80, 24);

    #[test]
    fn placed_below_when_it_fits() {
        let anchor = Rect::new(10, 5, 30, 1);
        assert_eq!(placement(anchor, 4, VIEWPORT), Rect::new(10, 6, 30, 6));
    }

    #[test]
    fn flips_above_near_the_bottom() {
        let anchor = Rect::new(10, 20, 30, 1);
        assert_eq!(placement(anchor, 4, VIEWPORT), Rect::new(10, 14, 30, 6));
    }

    #[test]
    fn height_clamped_to_available_room() {
        let anchor = Rect::new(0, 12, 30, 1);
        // 11 rows below, 12 above: flips above and clamps.
        assert_eq!(placement(anchor, 20, VIEWPORT), Rect::new(0, 0, 30, 12));

        let anchor = Rect::new(0, 3, 30, 1);
        assert_eq!(placement(anchor, 50, VIEWPORT), Rect::new(0, 4, 30, 20));
    }

    #[test]
    fn width_clamped_to_viewport() {
        let anchor = Rect::new(70, 2, 30, 1);
        assert_eq!(placement(anchor, 1, VIEWPORT).width, 10);
    }

    #[test]
    fn hit_testing_maps_cells_to_rows() {
        let popup = Rect::new(10, 6, 30, 6);
        assert_eq!(row_at(popup, 0..4, 12, 7), Some(0));
        assert_eq!(row_at(popup, 0..4, 12, 10), Some(3));
        assert_eq!(row_at(popup, 5..9, 12, 8), Some(6));
        // Border and outside cells
        assert_eq!(row_at(popup, 0..4, 10, 7), None);
        assert_eq!(row_at(popup, 0..4, 12, 6), None);
        assert_eq!(row_at(popup, 0..4, 50, 7), None);
        // Inside the box but past the last row
        assert_eq!(row_at(popup, 0..2, 12, 10), None);
        assert!(contains(popup, 10, 6));
        assert!(!contains(popup, 40, 6));
    }

    #[test]
    fn renders_highlighted_row_and_matches() {
        let theme = Theme::load_default();
        let records = RecordCollection::new(vec![
            Record::new("Store", Vec::<(String, String)>::new()),
            Record::new("Store Room", Vec::<(String, String)>::new()),
        ]);
        let mut ac = Autocomplete::new(AutocompleteConfig::default());
        ac.on_input("sto", Some(records));
        ac.key(Nav::Down);
        let session = ac.session().unwrap();

        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        Dropdown::new(session, &theme).render(area, &mut buf);

        let line = |y: u16| -> String { (1..19).map(|x| buf[(x, y)].symbol().to_string()).collect() };
        assert!(line(1).starts_with("Store "));
        assert!(line(2).starts_with("Store Room"));
        assert_eq!(buf[(1, 1)].style().fg, theme.match_highlight.fg);
        assert_eq!(buf[(10, 1)].style().bg, theme.dropdown_selected.bg);
        assert_ne!(buf[(12, 2)].style().bg, theme.dropdown_selected.bg);
    }
}
