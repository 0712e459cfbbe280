/// Ticket for one requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The host's "call me on the next frame" primitive
pub trait FrameScheduler {
    /// Ask for a callback on the next frame
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request; unknown or already-fired handles are ignored
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// The request whose frame has arrived, if any
    fn take_due(&mut self) -> Option<FrameHandle>;
}

/// Single-slot scheduler driven by whoever owns the frame loop
///
/// Every host frame, the owner calls [`FrameScheduler::take_due`]; the
/// outstanding request (at most one) fires and is consumed.
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    next_id: u64,
    pending: Option<FrameHandle>,
    /// Requests made over the clock's lifetime
    pub requested: u64,
    /// Requests withdrawn before they fired
    pub cancelled: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }

    fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_fires_once() {
        let mut clock = FrameClock::new();
        let h = clock.request_frame();
        assert_eq!(clock.take_due(), Some(h));
        assert_eq!(clock.take_due(), None);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut clock = FrameClock::new();
        let h = clock.request_frame();
        clock.cancel_frame(h);
        clock.cancel_frame(h);
        assert_eq!(clock.cancelled, 1);
        assert_eq!(clock.take_due(), None);
    }

    #[test]
    fn test_stale_cancel_leaves_new_request() {
        let mut clock = FrameClock::new();
        let old = clock.request_frame();
        let new = clock.request_frame();
        assert_ne!(old, new);
        clock.cancel_frame(old);
        assert!(clock.has_pending());
        assert_eq!(clock.take_due(), Some(new));
    }
}
