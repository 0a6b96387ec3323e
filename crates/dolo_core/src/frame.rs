//! Frame scheduling
//!
//! Effects never poll. A running effect asks its host for exactly one future
//! frame, and re-arms from inside that frame. The [`FrameScheduler`] trait is
//! the host's "schedule next frame" primitive; [`FrameClock`] is the
//! deterministic implementation used by the headless runtime and by tests.

use slotmap::{new_key_type, SlotMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

new_key_type! {
    /// Identifies one outstanding frame request
    pub struct FrameRequestId;
}

/// Host primitive for requesting the next animation frame
pub trait FrameScheduler {
    /// Request a single callback on the next frame
    fn request_frame(&mut self) -> FrameRequestId;

    /// Cancel an outstanding request. Returns `false` if it already fired or
    /// was cancelled.
    fn cancel_frame(&mut self, id: FrameRequestId) -> bool;
}

/// A frame request that came due, with the frame timestamp in milliseconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DueFrame {
    pub id: FrameRequestId,
    pub timestamp_ms: f64,
}

/// Deterministic frame clock.
///
/// Requests made before a call to [`advance`](FrameClock::advance) come due in
/// that call, in request order. Requests made while handling due frames wait
/// for the next advance, the same as a browser's animation frame queue.
pub struct FrameClock {
    requests: SlotMap<FrameRequestId, ()>,
    order: Vec<FrameRequestId>,
    now_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    /// Create a clock whose first timestamp is `now_ms`
    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            requests: SlotMap::with_key(),
            order: Vec::new(),
            now_ms,
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Move time forward and return every request that came due
    pub fn advance(&mut self, ms: f64) -> Vec<DueFrame> {
        self.now_ms += ms.max(0.0);
        let now_ms = self.now_ms;
        std::mem::take(&mut self.order)
            .into_iter()
            .filter(|id| self.requests.remove(*id).is_some())
            .map(|id| DueFrame {
                id,
                timestamp_ms: now_ms,
            })
            .collect()
    }

    /// Number of requests that have not fired or been cancelled
    pub fn pending_count(&self) -> usize {
        self.requests.len()
    }

    pub fn is_pending(&self, id: FrameRequestId) -> bool {
        self.requests.contains_key(id)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) -> FrameRequestId {
        let id = self.requests.insert(());
        self.order.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) -> bool {
        let removed = self.requests.remove(id).is_some();
        if removed {
            self.order.retain(|pending| *pending != id);
        }
        removed
    }
}

/// Shared cancellation flag for a self-scheduling task.
///
/// Clones observe the same flag. Cancelling is a single atomic swap, so
/// exactly one caller sees the transition.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the task. Returns `true` only for the call that flipped the flag.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::AcqRel)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
