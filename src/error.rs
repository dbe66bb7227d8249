//! Library error type.

use thiserror::Error;

/// Errors surfaced by constructors and parsers in this crate.
///
/// Runtime behavior never fails: missing elements and malformed style numbers
/// degrade to "inert" or to documented fallbacks instead.
#[derive(Debug, Error, PartialEq)]
pub enum MotionError {
    /// Hysteresis dead zone must be strictly positive and finite.
    #[error("invalid hysteresis threshold: top_reveal_px={top_reveal_px}, delta={delta}")]
    InvalidThreshold { top_reveal_px: f64, delta: f64 },

    /// A scroll offset in a replay list could not be parsed.
    #[error("invalid scroll offset {0:?} in replay list")]
    InvalidOffset(String),
}
