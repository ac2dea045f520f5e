//! UI components for the TUI adapter.

pub mod page_view;
pub mod status_bar;

pub use page_view::{ElementBox, PageView};
pub use status_bar::StatusBar;
