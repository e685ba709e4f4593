#![allow(unused)]
//! Headless TUI harness: drives the real [`App`] with semantic events and
//! renders into a ratatui `TestBackend`.
//!
//! # What this covers
//!
//! - Typing into a bound field opens the popup beneath it, and the frame
//!   shows the marked rows.
//! - Near the bottom of a short terminal the popup flips above the field.
//! - Keyboard and mouse commits land in the form, companions included.
//!
//! # What this does NOT cover
//!
//! - Raw crossterm decoding (unit-tested in `theory_tui::event`)
//! - Real terminal setup and teardown
//!
//! # Running
//!
//! ```sh
//! cargo test --test headless_harness
//! ```

mod common;
use common::*;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use theory_core::config::Config;
use theory_core::form::{Endpoint, Role};
use theory_core::FieldId;
use theory_tui::app::{draw, App};
use theory_tui::event::AppEvent;
use theory_tui::theme::Theme;

const FROM_LOCATION: FieldId = FieldId::Endpoint(Endpoint::From, Role::Location);
const FROM_DEPARTMENT: FieldId = FieldId::Endpoint(Endpoint::From, Role::Department);
const TO_LOCATION: FieldId = FieldId::Endpoint(Endpoint::To, Role::Location);

fn app(width: u16, height: u16) -> App {
    let mut app = App::new(&Config::defaults(), Some(sample_store()), Theme::load_default(), None);
    app.handle(AppEvent::Resize(width, height));
    app
}

fn focus(app: &mut App, field: FieldId) {
    for _ in 0..field.index() {
        app.handle(AppEvent::Tab);
    }
    assert_eq!(app.state.focused(), field);
}

fn type_str(app: &mut App, text: &str) {
    text.chars().for_each(|c| app.handle(AppEvent::Char(c)));
}

fn render(app: &App, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let now = NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|d| d.and_hms_opt(14, 0, 0))
        .unwrap();
    terminal.draw(|frame| draw(frame, &app.state, now)).unwrap();
    terminal.backend().buffer().clone()
}

fn line(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
}

#[test]
fn typing_opens_popup_below_field() {
    let mut app = app(80, 24);
    focus(&mut app, FROM_LOCATION);
    type_str(&mut app, "ph");

    let (_, popup) = app.state.popup().unwrap();
    let input = app.state.layout.input(FROM_LOCATION);
    assert_eq!(popup.y, input.bottom());

    let buf = render(&app, 80, 24);
    assert!(line(&buf, popup.y + 1).contains("RCB00025 - Phlebotomy Waiting Room"));
    assert!(line(&buf, popup.y + 2).contains("RCB00027 - Phelobotomy"));
    // The match itself is styled differently from the rest of the row.
    let ph = buf[(input.x + 12, popup.y + 1)].style();
    let rest = buf[(input.x + 20, popup.y + 1)].style();
    assert_ne!(ph, rest);
}

#[test]
fn popup_flips_above_near_the_bottom() {
    let mut app = app(80, 16);
    focus(&mut app, TO_LOCATION);
    type_str(&mut app, "rcb");

    let (_, popup) = app.state.popup().unwrap();
    let input = app.state.layout.input(TO_LOCATION);
    assert_eq!(popup.bottom(), input.y);

    let buf = render(&app, 80, 16);
    assert!(line(&buf, popup.y + 1).contains("RCB00025 - Phlebotomy Waiting Room"));
}

#[test]
fn keyboard_walkthrough_fills_the_form() {
    let mut app = app(80, 24);
    focus(&mut app, FROM_LOCATION);
    type_str(&mut app, "phle");
    app.handle(AppEvent::Down);
    app.handle(AppEvent::Enter);

    let form = app.state.controller.form();
    assert_eq!(form.get(FROM_LOCATION), "RCB00025 - Phlebotomy Waiting Room");
    assert_eq!(form.get(FROM_DEPARTMENT), "RUG - DAY SURGERY");

    let buf = render(&app, 80, 24);
    let input = app.state.layout.input(FROM_DEPARTMENT);
    assert!(line(&buf, input.y).contains("RUG - DAY SURGERY"));
}

#[test]
fn mouse_click_on_row_commits() {
    let mut app = app(80, 24);
    focus(&mut app, FROM_LOCATION);
    type_str(&mut app, "store");
    let (_, popup) = app.state.popup().unwrap();

    // Second row: RCB00043 - Store
    app.handle(AppEvent::Click(popup.x + 2, popup.y + 2));
    assert_eq!(app.state.controller.form().get(FROM_LOCATION), "RCB00043 - Store");
    assert!(app.state.popup().is_none());
}
