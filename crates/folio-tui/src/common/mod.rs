//! Shared building blocks for the TUI.

mod scrollbar;
pub mod text;
pub mod theme;

pub use scrollbar::Scrollbar;
