//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal (raw mode, alternate screen, mouse
//! capture), drives the crossterm event loop, and tears everything down
//! cleanly on exit or panic. All form behaviour lives in
//! [`FormController`]; this module only routes events and draws.

use crate::{
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        dropdown::{self, Dropdown},
        header::Header,
        help::HelpPopup,
        text_field::{FieldLabel, FieldValue, TextCursor},
    },
};
use chrono::{Local, NaiveDateTime};
use crossterm::{
    event::{self as ct_event, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame, Terminal,
};
use std::{io, time::Duration};
use theory_core::{
    config::{Config, UiConfig},
    form::FIELD_ORDER,
    FieldId, FormController, KeyOutcome, Nav, RecordStore,
};

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// One line of the form pane.
#[derive(Debug, Clone, Copy)]
enum Row {
    Field(FieldId),
    Section(&'static str),
    Gap,
}

const ROWS: [Row; 15] = [
    Row::Field(FIELD_ORDER[0]),
    Row::Field(FIELD_ORDER[1]),
    Row::Gap,
    Row::Section("From"),
    Row::Field(FIELD_ORDER[2]),
    Row::Field(FIELD_ORDER[3]),
    Row::Field(FIELD_ORDER[4]),
    Row::Gap,
    Row::Section("To"),
    Row::Field(FIELD_ORDER[5]),
    Row::Field(FIELD_ORDER[6]),
    Row::Field(FIELD_ORDER[7]),
    Row::Gap,
    Row::Field(FIELD_ORDER[8]),
    Row::Field(FIELD_ORDER[9]),
];

/// Screen geometry for one frame. Pure function of the terminal size, so
/// mouse events can be resolved without the last rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLayout {
    pub viewport: Rect,
    pub header: Rect,
    pub body: Rect,
    pub status: Rect,
    labels: [Rect; FIELD_ORDER.len()],
    inputs: [Rect; FIELD_ORDER.len()],
    sections: Vec<(Rect, &'static str)>,
}

impl FormLayout {
    pub fn compute(viewport: Rect, label_width: u16) -> Self {
        let header = Rect { height: viewport.height.min(1), ..viewport };
        let status = Rect {
            y: viewport.bottom().saturating_sub(1).max(header.bottom()),
            height: viewport.height.saturating_sub(1).min(1),
            ..viewport
        };
        let body = Rect {
            y: header.bottom(),
            height: status.y.saturating_sub(header.bottom()),
            ..viewport
        };
        let inner = Block::bordered().inner(body);

        let label_width = label_width.min(inner.width);
        let input_x = inner.x + label_width + 1;
        let input_width = inner.right().saturating_sub(input_x).saturating_sub(1);

        let mut labels = [Rect::default(); FIELD_ORDER.len()];
        let mut inputs = [Rect::default(); FIELD_ORDER.len()];
        let mut sections = Vec::new();

        for (offset, row) in ROWS.iter().enumerate() {
            let y = inner.y + offset as u16;
            if y >= inner.bottom() {
                break;
            }
            match *row {
                Row::Field(field) => {
                    labels[field.index()] = Rect::new(inner.x, y, label_width, 1);
                    inputs[field.index()] = Rect::new(input_x, y, input_width, 1);
                }
                Row::Section(title) => sections.push((Rect::new(inner.x, y, inner.width, 1), title)),
                Row::Gap => {}
            }
        }

        Self {
            viewport,
            header,
            body,
            status,
            labels,
            inputs,
            sections,
        }
    }

    pub fn input(&self, field: FieldId) -> Rect {
        self.inputs[field.index()]
    }

    pub fn label(&self, field: FieldId) -> Rect {
        self.labels[field.index()]
    }

    /// The field whose label or input covers (`col`, `row`).
    pub fn field_at(&self, col: u16, row: u16) -> Option<FieldId> {
        FIELD_ORDER.iter().copied().find(|f| {
            dropdown::contains(self.label(*f), col, row) || dropdown::contains(self.input(*f), col, row)
        })
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub controller: FormController,
    pub reference: String,
    /// Index into [`FIELD_ORDER`].
    pub focus: usize,
    pub cursor: TextCursor,
    pub theme: Theme,
    pub ui: UiConfig,
    pub layout: FormLayout,
    pub show_help: bool,
    /// Shown in the status line instead of the key hints.
    pub status: Option<String>,
    pub quit: bool,
}

impl AppState {
    pub fn focused(&self) -> FieldId {
        FIELD_ORDER[self.focus.min(FIELD_ORDER.len() - 1)]
    }

    /// Where the open popup is drawn, if any.
    pub fn popup(&self) -> Option<(FieldId, Rect)> {
        let field = self.controller.open_field()?;
        let session = self.controller.autocomplete(field)?.session()?;
        let rows = session.rows().len().min(self.ui.dropdown_rows.max(1) as usize);
        let rect = dropdown::placement(self.layout.input(field), rows, self.layout.viewport);
        Some((field, rect))
    }

    /// Session row under (`col`, `row`) of the open popup.
    fn popup_row_at(&self, col: u16, row: u16) -> Option<(FieldId, usize)> {
        let (field, rect) = self.popup()?;
        let session = self.controller.autocomplete(field)?.session()?;
        let window = session.visible_window(dropdown::capacity(rect));
        dropdown::row_at(rect, window, col, row).map(|r| (field, r))
    }

    fn set_focus(&mut self, index: usize) {
        let index = index.min(FIELD_ORDER.len() - 1);
        if index != self.focus {
            self.controller.dismiss_all();
            tracing::debug!(from = %self.focused(), to = %FIELD_ORDER[index], "focus");
            self.focus = index;
        }
        self.cursor = TextCursor::at_end(self.controller.form().get(self.focused()));
    }

    fn focus_next(&mut self) {
        self.set_focus((self.focus + 1) % FIELD_ORDER.len());
    }

    fn focus_prev(&mut self) {
        self.set_focus((self.focus + FIELD_ORDER.len() - 1) % FIELD_ORDER.len());
    }

    fn resize(&mut self, width: u16, height: u16) {
        let viewport = Rect::new(0, 0, width, height);
        self.layout = FormLayout::compute(viewport, self.ui.label_width);
    }

    fn click(&mut self, col: u16, row: u16) {
        if let Some((open, index)) = self.popup_row_at(col, row) {
            if self.controller.click(open, index).is_some() {
                self.cursor = TextCursor::at_end(self.controller.form().get(open));
            }
            return;
        }
        let target = self.layout.field_at(col, row);
        if let Some((open, rect)) = self.popup() {
            // The popup and its own field keep the session alive.
            if dropdown::contains(rect, col, row) || target == Some(open) {
                return;
            }
        }

        // Anywhere else closes the popup without touching the value.
        self.controller.dismiss_all();
        if let Some(target) = target {
            self.set_focus(target.index());
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub state: AppState,
}

impl App {
    /// `store == None` means the record source failed to load: the form
    /// still works, its autocompletes just never open.
    pub fn new(config: &Config, store: Option<RecordStore>, theme: Theme, status: Option<String>) -> Self {
        let controller = FormController::new(config, store.as_ref());
        let reference = store.map(|s| s.reference).unwrap_or_default();
        let viewport = Rect::new(0, 0, 80, 24);

        let state = AppState {
            controller,
            reference,
            focus: 0,
            cursor: TextCursor::default(),
            theme,
            ui: config.ui.clone(),
            layout: FormLayout::compute(viewport, config.ui.label_width),
            show_help: false,
            status,
            quit: false,
        };
        App { state }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let size = terminal.size()?;
        self.state.resize(size.width, size.height);

        loop {
            {
                let s = &self.state;
                let now = Local::now().naive_local();
                terminal.draw(|frame| draw(frame, s, now))?;
            }

            if self.state.quit {
                break;
            }

            // The timeout doubles as the clock refresh interval.
            if ct_event::poll(Duration::from_millis(250))? {
                if let Some(ev) = event::to_app_event(ct_event::read()?) {
                    self.handle(ev);
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        if !matches!(event, AppEvent::MouseMove(..)) {
            tracing::debug!(field = %self.state.focused(), event = ?event, "event");
        }

        // Help popup intercepts all events; only close keys pass through.
        if self.state.show_help {
            match event {
                AppEvent::ToggleHelp | AppEvent::Escape => self.state.show_help = false,
                AppEvent::Quit => self.state.quit = true,
                AppEvent::Resize(w, h) => self.state.resize(w, h),
                _ => {}
            }
            return;
        }

        let s = &mut self.state;
        let field = s.focused();

        match event {
            AppEvent::Quit => s.quit = true,
            AppEvent::ToggleHelp => s.show_help = true,
            AppEvent::NewTask => {
                s.controller.clear();
                s.focus = 0;
                s.cursor = TextCursor::default();
            }
            AppEvent::Resize(w, h) => s.resize(w, h),

            AppEvent::Char(_) | AppEvent::Backspace | AppEvent::Delete => {
                let mut value = s.controller.form().get(field).to_string();
                if s.cursor.edit(&mut value, &event) {
                    s.controller.set_value(field, value);
                }
            }
            AppEvent::Left | AppEvent::Right | AppEvent::Home | AppEvent::End => {
                let mut value = s.controller.form().get(field).to_string();
                s.cursor.edit(&mut value, &event);
            }

            AppEvent::Up => {
                s.controller.key(field, Nav::Up);
            }
            AppEvent::Down => {
                s.controller.key(field, Nav::Down);
            }
            AppEvent::Enter => {
                if let KeyOutcome::Committed(_) = s.controller.key(field, Nav::Enter) {
                    s.cursor = TextCursor::at_end(s.controller.form().get(field));
                }
            }
            AppEvent::Escape => {
                s.controller.key(field, Nav::Escape);
            }
            // An open popup with nothing highlighted keeps the focus.
            AppEvent::Tab => {
                if !matches!(s.controller.key(field, Nav::Tab), KeyOutcome::Handled) {
                    s.focus_next();
                }
            }
            AppEvent::BackTab => s.focus_prev(),

            AppEvent::MouseMove(col, row) => {
                if let Some((open, index)) = s.popup_row_at(col, row) {
                    s.controller.hover(open, index);
                }
            }
            AppEvent::Click(col, row) => s.click(col, row),
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw one frame. `now` feeds the header clock.
pub fn draw(frame: &mut Frame, state: &AppState, now: NaiveDateTime) {
    let layout = FormLayout::compute(frame.area(), state.ui.label_width);
    let theme = &state.theme;
    let buf = frame.buffer_mut();

    Header::new(&state.reference, now, &state.ui.time_format, &state.ui.date_format, theme)
        .render(layout.header, buf);

    Block::bordered()
        .title(" Theory Task Request ")
        .border_style(theme.border_unfocused)
        .render(layout.body, buf);

    for (rect, title) in &layout.sections {
        buf.set_string(rect.x, rect.y, *title, theme.header_reference);
    }

    let focused = state.focused();
    for field in FIELD_ORDER {
        let is_focused = field == focused;
        let value = state.controller.form().get(field);
        FieldLabel::new(field.label(), is_focused, theme).render(layout.label(field), buf);
        FieldValue::new(value, is_focused, theme).render(layout.input(field), buf);
    }

    let status = match &state.status {
        Some(message) => Line::from(Span::styled(format!(" {message}"), theme.status_error)),
        None => Line::from(Span::styled(
            " Tab: next  Shift+Tab: back  F1: help  Ctrl+N: new task  Ctrl+Q: quit",
            theme.status_hint,
        )),
    };
    buf.set_line(layout.status.x, layout.status.y, &status, layout.status.width);

    // The popup is placed against this frame's geometry, not the cached one.
    let popup = state.controller.open_field().and_then(|field| {
        let session = state.controller.autocomplete(field)?.session()?;
        let rows = session.rows().len().min(state.ui.dropdown_rows.max(1) as usize);
        let rect = dropdown::placement(layout.input(field), rows, layout.viewport);
        Some((session, rect))
    });
    if let Some((session, rect)) = popup {
        Dropdown::new(session, theme).render(rect, buf);
    }

    if state.show_help {
        HelpPopup::new(theme).render(layout.viewport, buf);
        return;
    }

    let input = layout.input(focused);
    if !input.is_empty() {
        let value = state.controller.form().get(focused);
        frame.set_cursor_position(FieldValue::cursor_position(value, state.cursor, input));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        previous(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
