//! Per-instance frame coalescing.
//!
//! A behavior may receive dozens of scroll signals between two rendering
//! frames.  [`FrameScheduler`] collapses all of them into a single pending
//! request; the host runs the behavior's frame callback only while a request
//! is pending.

/// At-most-one-frame request flag.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: bool,
    requested: u64,
    ran: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for the next frame.  Returns `true` if this call scheduled one,
    /// `false` if a frame was already pending.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.requested += 1;
        true
    }

    /// Consume the pending request at frame time.
    ///
    /// The flag is cleared *before* the caller runs its computation, so the
    /// computation may call [`request`](Self::request) again to re-arm itself.
    /// Returns `false` when no frame was pending (the callback must not run).
    pub fn begin_frame(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.ran += 1;
        true
    }

    /// Drop a pending request without running it.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of frames actually scheduled (coalesced requests excluded).
    pub fn frames_requested(&self) -> u64 {
        self.requested
    }

    /// Number of frame callbacks that ran.
    pub fn frames_run(&self) -> u64 {
        self.ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_many_requests_coalesce_into_one_frame() {
        let mut s = FrameScheduler::new();
        assert!(s.request());
        for _ in 0..100 {
            assert!(!s.request());
        }
        assert_eq!(s.frames_requested(), 1);
        assert!(s.begin_frame());
        assert!(!s.begin_frame());
        assert_eq!(s.frames_run(), 1);
    }

    #[test]
    fn test_rearm_from_inside_frame() {
        let mut s = FrameScheduler::new();
        s.request();
        assert!(s.begin_frame());
        // Computation not converged yet: re-arm.
        assert!(s.request());
        assert!(s.is_pending());
        assert!(s.begin_frame());
        assert_eq!(s.frames_run(), 2);
    }

    #[test]
    fn test_cancel_drops_pending_frame() {
        let mut s = FrameScheduler::new();
        s.request();
        s.cancel();
        assert!(!s.is_pending());
        assert!(!s.begin_frame());
        assert_eq!(s.frames_run(), 0);
    }
}
