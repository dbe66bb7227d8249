//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! Widgets read the page and the runtime; they never dispatch signals.

pub mod inspector;
pub mod layout;
pub mod page_view;
pub mod popup;
pub mod theme;
