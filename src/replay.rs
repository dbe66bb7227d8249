//! Headless replay of a list of scroll offsets.
//!
//! Each offset is applied as one scroll, then frames run (16 ms apart) until
//! every behavior has settled and every timer that became due has fired.

use std::fmt;
use std::time::Duration;

use crate::behaviors::header::HEADER_SELECTOR;
use crate::behaviors::{half_image, hero, Runtime};
use crate::dom::env::Environment;
use crate::dom::page::Page;
use crate::dom::signal::Signal;
use crate::error::MotionError;

pub const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 2_000;

/// Parse `"0, 20,55"` into offsets.  Offsets must be finite.
pub fn parse_offsets(raw: &str) -> Result<Vec<f64>, MotionError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(MotionError::InvalidOffset(s.to_string())),
        })
        .collect()
}

/// Observable page state after one replayed offset.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayStep {
    pub requested: f64,
    pub scroll_y: f64,
    pub links_hidden: bool,
    pub mobile_hidden: bool,
    pub shrink: Option<String>,
    pub half_size: Option<String>,
    pub frames: usize,
}

impl fmt::Display for ReplayStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = |hidden: bool| if hidden { "hidden" } else { "shown" };
        write!(
            f,
            "y={:<7} links={:<6} mobile={:<6} --shrink={:<6} --half-size={:<9} frames={}",
            self.scroll_y,
            state(self.links_hidden),
            state(self.mobile_hidden),
            self.shrink.as_deref().unwrap_or("-"),
            self.half_size.as_deref().unwrap_or("-"),
            self.frames,
        )
    }
}

/// Advance the clock one frame at a time until no frame or timer is pending.
/// Returns frames run.
pub fn settle(page: &mut Page, runtime: &mut Runtime) -> usize {
    let mut frames = 0;
    while frames < MAX_FRAMES {
        if !runtime.wants_frame() && runtime.next_deadline().is_none() {
            break;
        }
        page.advance(FRAME);
        runtime.run_frame(page);
        runtime.fire_timers(page);
        frames += 1;
    }
    if frames == MAX_FRAMES {
        tracing::warn!(frames, "replay did not settle");
    }
    frames
}

pub fn replay(page: &mut Page, runtime: &mut Runtime, offsets: &[f64]) -> Vec<ReplayStep> {
    let header = page.query(HEADER_SELECTOR);
    let hero = page.query(hero::HERO_SELECTOR);
    let circle = page.query(half_image::CIRCLE_SELECTOR);

    offsets
        .iter()
        .map(|&requested| {
            page.set_scroll(requested);
            runtime.dispatch(&Signal::Scroll, page);
            // Only the offset the frame sees counts; settle afterwards so
            // idle timers do not leak into the next offset.
            page.advance(FRAME);
            runtime.run_frame(page);
            let links_hidden = header.is_some_and(|h| page.has_class(h, "is-links-hidden"));
            let mobile_hidden = header.is_some_and(|h| page.has_class(h, "is-mobile-hidden"));
            let frames = 1 + settle(page, runtime);

            ReplayStep {
                requested,
                scroll_y: page.scroll_y(),
                links_hidden,
                mobile_hidden,
                shrink: hero.and_then(|el| page.property(el, "--shrink").map(str::to_string)),
                half_size: circle.and_then(|el| page.property(el, "--half-size").map(str::to_string)),
                frames,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offsets() {
        assert_eq!(parse_offsets("0, 20,55 ,").unwrap(), vec![0.0, 20.0, 55.0]);
        assert_eq!(parse_offsets("").unwrap(), Vec::<f64>::new());
        assert_eq!(
            parse_offsets("10,ten"),
            Err(MotionError::InvalidOffset("ten".into()))
        );
        assert!(parse_offsets("inf").is_err());
    }
}
