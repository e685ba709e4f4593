//! Domain-specific assertions for theory-task harnesses.
//!
//! These wrap `pretty_assertions` so a failing popup comparison shows the
//! full row diff.

use theory_core::Autocomplete;

/// Labels of the open popup, or an empty list when it is closed.
pub fn popup_labels(ac: &Autocomplete) -> Vec<String> {
    ac.session()
        .map(|s| s.rows().iter().map(|r| r.label.clone()).collect())
        .unwrap_or_default()
}

/// Assert the popup shows exactly `expected`, in order.
///
/// ```rust
/// assert_rows!(ac, ["RCB00025 - Phlebotomy Waiting Room"]);
/// ```
#[macro_export]
macro_rules! assert_rows {
    ($ac:expr, [$($label:expr),* $(,)?]) => {{
        let expected: Vec<String> = vec![$($label.to_string()),*];
        pretty_assertions::assert_eq!(
            $crate::common::popup_labels(&$ac),
            expected,
            "popup rows differ"
        );
    }};
}

/// Assert the popup is closed.
#[macro_export]
macro_rules! assert_closed {
    ($ac:expr) => {{
        let ac: &theory_core::Autocomplete = &$ac;
        if let Some(session) = ac.session() {
            panic!(
                "assert_closed! failed: popup open for {:?} with {} row(s)",
                session.query(),
                session.rows().len()
            );
        }
    }};
}
