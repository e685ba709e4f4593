//! Ratatui widgets for the theory-task TUI.

pub mod dropdown;
pub mod header;
pub mod help;
pub mod text_field;
