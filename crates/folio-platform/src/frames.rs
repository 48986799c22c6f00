//! Animation frame scheduling.
//!
//! One call to [`FrameScheduler::take_due`] corresponds to one display
//! refresh: every request pending at that moment is delivered exactly once.
//! Requests made while handling a tick land in the next refresh.

use std::time::Duration;

use crate::listeners::OwnerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// A delivered frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    pub handle: FrameHandle,
    pub owner: OwnerId,
    /// Time since the host started.
    pub timestamp: Duration,
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Vec<(FrameHandle, OwnerId)>,
    next_id: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, owner: OwnerId) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.push((handle, owner));
        handle
    }

    /// Cancel a pending request. Returns whether it was still pending.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(h, _)| *h != handle);
        before != self.pending.len()
    }

    /// Drain every pending request into ticks stamped with `timestamp`.
    pub fn take_due(&mut self, timestamp: Duration) -> Vec<FrameTick> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(handle, owner)| FrameTick {
                handle,
                owner,
                timestamp,
            })
            .collect()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.iter().any(|(h, _)| *h == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_for_owner(&self, owner: OwnerId) -> usize {
        self.pending.iter().filter(|(_, o)| *o == owner).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_then_take_due() {
        let mut frames = FrameScheduler::new();
        let h = frames.request(OwnerId(1));
        assert!(frames.is_pending(h));

        let ticks = frames.take_due(Duration::from_millis(16));
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].handle, h);
        assert_eq!(ticks[0].owner, OwnerId(1));
        assert_eq!(ticks[0].timestamp, Duration::from_millis(16));

        assert!(!frames.is_pending(h));
        assert!(frames.take_due(Duration::from_millis(32)).is_empty());
    }

    #[test]
    fn cancelled_handle_never_fires() {
        let mut frames = FrameScheduler::new();
        let h = frames.request(OwnerId(1));
        assert!(frames.cancel(h));
        assert!(!frames.cancel(h));
        assert!(frames.take_due(Duration::ZERO).is_empty());
    }

    #[test]
    fn handles_are_unique_across_refreshes() {
        let mut frames = FrameScheduler::new();
        let a = frames.request(OwnerId(1));
        frames.take_due(Duration::ZERO);
        let b = frames.request(OwnerId(1));
        assert_ne!(a, b);
    }

    #[test]
    fn counts_by_owner() {
        let mut frames = FrameScheduler::new();
        frames.request(OwnerId(1));
        frames.request(OwnerId(2));
        frames.request(OwnerId(2));
        assert_eq!(frames.pending_count(), 3);
        assert_eq!(frames.pending_for_owner(OwnerId(2)), 2);
    }
}
