//! Semantic application events: crossterm key and mouse events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] on every
//! [`crossterm::event::Event`] and match on the returned [`AppEvent`].
//!
//! # Keybindings
//!
//! Every focusable element of the form is a text field, so there is no
//! separate navigation mode: printable characters always type.
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `Ctrl+c`, `Ctrl+q`      | `Quit`                     |
//! | `Ctrl+n`                | `NewTask`                  |
//! | `F1`                    | `ToggleHelp`               |
//! | `Tab`                   | `Tab`                      |
//! | `Shift+Tab`             | `BackTab`                  |
//! | `↑` / `↓`               | `Up` / `Down`              |
//! | `←` / `→`               | `Left` / `Right`           |
//! | `Home` / `End`          | `Home` / `End`             |
//! | printable char          | `Char(c)`                  |
//! | `Backspace` / `Delete`  | `Backspace` / `Delete`     |
//! | `Enter`                 | `Enter`                    |
//! | `Esc`                   | `Escape`                   |
//! | mouse move              | `MouseMove(col, row)`      |
//! | left button press       | `Click(col, row)`          |
//! | terminal resize         | `Resize(w, h)`             |

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Clear the form and start a new request.
    NewTask,
    ToggleHelp,
    /// Commit the highlighted row, or move focus to the next field.
    Tab,
    /// Move focus to the previous field.
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    /// A printable character forwarded to the focused field.
    Char(char),
    Backspace,
    Delete,
    Enter,
    Escape,
    /// Pointer moved to (column, row).
    MouseMove(u16, u16),
    /// Left button pressed at (column, row).
    Click(u16, u16),
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`].
///
/// Returns `None` for events that carry no meaning for the application
/// (key releases on terminals that emit them, scroll wheel, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') | Char('q') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('n') if key.modifiers == Mod::CONTROL => Some(AppEvent::NewTask),
        F(1) => Some(AppEvent::ToggleHelp),

        // Some terminals report Shift+Tab as BackTab with SHIFT set, others
        // without it.
        BackTab => Some(AppEvent::BackTab),
        Tab if key.modifiers == Mod::SHIFT => Some(AppEvent::BackTab),
        Tab if key.modifiers == Mod::NONE => Some(AppEvent::Tab),

        Up => Some(AppEvent::Up),
        Down => Some(AppEvent::Down),
        Left => Some(AppEvent::Left),
        Right => Some(AppEvent::Right),
        Home => Some(AppEvent::Home),
        End => Some(AppEvent::End),

        // Printable characters, including shifted ones
        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace => Some(AppEvent::Backspace),
        Delete => Some(AppEvent::Delete),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_mouse(mouse: MouseEvent) -> Option<AppEvent> {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
            Some(AppEvent::MouseMove(mouse.column, mouse.row))
        }
        MouseEventKind::Down(MouseButton::Left) => Some(AppEvent::Click(mouse.column, mouse.row)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> Event {
        key(code, KeyModifiers::CONTROL)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn quit_keys() {
        assert_eq!(to_app_event(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('q'))), Some(AppEvent::Quit));
    }

    #[test]
    fn plain_q_types() {
        assert_eq!(to_app_event(press(KeyCode::Char('q'))), Some(AppEvent::Char('q')));
    }

    #[test]
    fn new_task_and_help() {
        assert_eq!(to_app_event(ctrl(KeyCode::Char('n'))), Some(AppEvent::NewTask));
        assert_eq!(to_app_event(press(KeyCode::F(1))), Some(AppEvent::ToggleHelp));
    }

    #[test]
    fn tab_and_back_tab() {
        assert_eq!(to_app_event(press(KeyCode::Tab)), Some(AppEvent::Tab));
        assert_eq!(to_app_event(press(KeyCode::BackTab)), Some(AppEvent::BackTab));
        assert_eq!(
            to_app_event(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(AppEvent::BackTab)
        );
        assert_eq!(
            to_app_event(key(KeyCode::Tab, KeyModifiers::SHIFT)),
            Some(AppEvent::BackTab)
        );
    }

    #[rstest]
    #[case(KeyCode::Up, AppEvent::Up)]
    #[case(KeyCode::Down, AppEvent::Down)]
    #[case(KeyCode::Left, AppEvent::Left)]
    #[case(KeyCode::Right, AppEvent::Right)]
    #[case(KeyCode::Home, AppEvent::Home)]
    #[case(KeyCode::End, AppEvent::End)]
    #[case(KeyCode::Backspace, AppEvent::Backspace)]
    #[case(KeyCode::Delete, AppEvent::Delete)]
    #[case(KeyCode::Enter, AppEvent::Enter)]
    #[case(KeyCode::Esc, AppEvent::Escape)]
    fn editing_and_navigation_keys(#[case] code: KeyCode, #[case] expected: AppEvent) {
        assert_eq!(to_app_event(press(code)), Some(expected));
    }

    #[test]
    fn char_forwarding() {
        assert_eq!(to_app_event(press(KeyCode::Char('a'))), Some(AppEvent::Char('a')));
        assert_eq!(
            to_app_event(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(AppEvent::Char('A'))
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(to_app_event(release), None);
    }

    #[test]
    fn mouse_events() {
        assert_eq!(
            to_app_event(mouse(MouseEventKind::Moved, 10, 4)),
            Some(AppEvent::MouseMove(10, 4))
        );
        assert_eq!(
            to_app_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 7)),
            Some(AppEvent::Click(3, 7))
        );
        assert_eq!(to_app_event(mouse(MouseEventKind::ScrollDown, 0, 0)), None);
        assert_eq!(
            to_app_event(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)),
            None
        );
    }

    #[test]
    fn resize_event() {
        assert_eq!(to_app_event(Event::Resize(120, 40)), Some(AppEvent::Resize(120, 40)));
    }

    #[test]
    fn unbound_key_returns_none() {
        assert_eq!(to_app_event(press(KeyCode::F(5))), None);
    }
}
