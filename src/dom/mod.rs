//! Page model: the capability traits behaviors see, and an in-memory page.
//!
//! Behaviors never reach a real document.  They read through
//! [`env::Environment`] and write through [`env::Effects`]; [`page::Page`]
//! implements both so the whole system runs (and is tested) headless.

pub mod element;
pub mod env;
pub mod page;
pub mod signal;
