//! theory-task TUI: ratatui application shell around the form controller.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use theory_core::{config::Config, RecordStore};

/// Run the form until the user quits.
///
/// `store` is `None` when the record source failed to load; `status` is then
/// shown in the status line so the user knows why nothing autocompletes.
pub fn run(config: &Config, store: Option<RecordStore>, status: Option<String>) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    App::new(config, store, theme, status).run()
}
