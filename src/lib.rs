//! Scroll-linked page behaviors driven by an abstract page environment.
//!
//! The [`core`] module holds the reusable pieces (frame coalescing, the
//! hysteresis sampler, the convergence engine, effect writers).  The [`dom`]
//! module defines the capability traits behaviors read from and write to, plus
//! an in-memory [`dom::page::Page`] that implements them.  Each behavior in
//! [`behaviors`] owns its own state and is installed into a
//! [`behaviors::Runtime`] through an explicit subscription.

pub mod behaviors;
pub mod config;
pub mod core;
pub mod demo;
pub mod dom;
pub mod error;
pub mod replay;

pub use error::MotionError;
