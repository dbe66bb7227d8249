//! Interactive preview: state, input handling and the event reader.

pub mod event;
pub mod handler;
pub mod state;
