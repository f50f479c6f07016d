//! Feature slices for the TUI.

pub mod header;
pub mod page;
