//! Core motion primitives: frame coalescing, sampling, convergence, effects.
//!
//! Nothing in this module touches a page directly except through the
//! [`Effects`](crate::dom::env::Effects) trait in [`effect`].  Everything else
//! is plain arithmetic over owned state, so it is trivially testable.

pub mod convergence;
pub mod effect;
pub mod hysteresis;
pub mod intersection;
pub mod sampler;
pub mod scheduler;
pub mod timer;
