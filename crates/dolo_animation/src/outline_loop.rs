//! Self-scheduling outline task
//!
//! [`OutlineLoop`] wraps an [`OutlineAnimator`] in the start/stop lifecycle:
//!
//! ```text
//!            start (surface available)
//!  Stopped ─────────────────────────────▶ Running ──┐
//!     ▲                                      │      │ frame: draw, request next
//!     └──────────── stop / cancel ───────────┘ ◀────┘
//! ```
//!
//! While running exactly one frame request is outstanding. Stopping flips the
//! cancellation token, cancels that request, unsubscribes the pointer
//! listener and drops the simulation, so a later `start` begins from scratch.

use crate::config::OutlineConfig;
use crate::error::Result;
use crate::outline::{FrameStats, OutlineAnimator, PointerTarget};
use dolo_core::events::{event_types, WINDOW};
use dolo_core::fsm::{EventId, StateId, StateMachine};
use dolo_core::{CancelToken, DueFrame, EventDispatcher, FrameRequestId, FrameScheduler, Subscription};
use dolo_paint::{Canvas, Point};
use std::sync::Arc;

const STOPPED: StateId = 0;
const RUNNING: StateId = 1;

const START: EventId = 1;
const FRAME: EventId = 2;
const STOP: EventId = 3;

/// Lifecycle state of an [`OutlineLoop`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// Host services a loop needs to start, re-arm and stop
pub struct HostContext<'a> {
    pub scheduler: &'a mut dyn FrameScheduler,
    pub events: &'a mut EventDispatcher,
}

impl<'a> HostContext<'a> {
    pub fn new(scheduler: &'a mut dyn FrameScheduler, events: &'a mut EventDispatcher) -> Self {
        Self { scheduler, events }
    }
}

/// Everything that exists only while running
struct Run {
    animator: OutlineAnimator,
    target: Arc<PointerTarget>,
    pointer: Subscription,
    pending: Option<FrameRequestId>,
    cancel: CancelToken,
    frames: u64,
    last_stats: Option<FrameStats>,
}

/// The reactive outline as a cancellable, self-rescheduling frame task
pub struct OutlineLoop {
    config: OutlineConfig,
    lifecycle: StateMachine,
    run: Option<Run>,
}

impl OutlineLoop {
    pub fn new(config: OutlineConfig) -> Result<Self> {
        config.validate()?;
        let lifecycle = StateMachine::builder(STOPPED)
            .on(STOPPED, START, RUNNING)
            .on(RUNNING, FRAME, RUNNING)
            .on(RUNNING, STOP, STOPPED)
            .build();
        Ok(Self {
            config,
            lifecycle,
            run: None,
        })
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    pub fn state(&self) -> LoopState {
        if self.lifecycle.is_in(RUNNING) {
            LoopState::Running
        } else {
            LoopState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == LoopState::Running
    }

    /// Start on `surface`, centered on its midpoint.
    ///
    /// Without a surface this is a no-op: nothing is subscribed or scheduled.
    /// Starting an already running loop changes nothing.
    pub fn start(&mut self, surface: Option<&dyn Canvas>, host: &mut HostContext<'_>) -> LoopState {
        let Some(surface) = surface else {
            tracing::debug!("outline surface unavailable; not starting");
            return self.state();
        };
        if self.is_running() {
            return LoopState::Running;
        }

        let midpoint = surface.size().center();
        let animator = match OutlineAnimator::new(self.config.clone(), midpoint) {
            Ok(animator) => animator,
            Err(err) => {
                // Config was validated in `new`; kept for callers that build
                // loops from deserialized state
                tracing::warn!(%err, "outline config rejected; not starting");
                return self.state();
            }
        };

        let target = Arc::new(PointerTarget::new(midpoint));
        let cancel = CancelToken::new();

        let listener_target = target.clone();
        let listener_cancel = cancel.clone();
        let pointer = host
            .events
            .subscribe(WINDOW, event_types::POINTER_MOVE, move |event| {
                if listener_cancel.is_cancelled() {
                    return;
                }
                if let Some((x, y)) = event.pointer_position() {
                    listener_target.set(Point::new(x, y));
                }
            });

        let pending = Some(host.scheduler.request_frame());
        self.run = Some(Run {
            animator,
            target,
            pointer,
            pending,
            cancel,
            frames: 0,
            last_stats: None,
        });
        self.lifecycle.send(START);
        tracing::debug!(x = midpoint.x, y = midpoint.y, "outline loop started");
        LoopState::Running
    }

    /// Handle a due frame. Returns whether the outline was drawn.
    ///
    /// Frames for any request other than the loop's pending one are ignored,
    /// so stale callbacks after a stop or restart never draw.
    pub fn on_frame(
        &mut self,
        due: DueFrame,
        canvas: &mut dyn Canvas,
        host: &mut HostContext<'_>,
    ) -> bool {
        let cancelled = match &self.run {
            Some(run) if run.pending == Some(due.id) => run.cancel.is_cancelled(),
            _ => return false,
        };
        if cancelled {
            // Cancelled through a token clone; finish the teardown here
            self.stop(host);
            return false;
        }

        let Some(run) = self.run.as_mut() else {
            return false;
        };
        run.pending = None;

        let stats = run
            .animator
            .frame(due.timestamp_ms, run.target.get(), canvas);
        run.frames += 1;
        run.last_stats = Some(stats);
        self.lifecycle.send(FRAME);

        run.pending = Some(host.scheduler.request_frame());
        true
    }

    /// Stop the loop. Returns `false` if it was not running.
    pub fn stop(&mut self, host: &mut HostContext<'_>) -> bool {
        let Some(run) = self.run.take() else {
            return false;
        };
        run.cancel.cancel();
        if let Some(id) = run.pending {
            host.scheduler.cancel_frame(id);
        }
        host.events.unsubscribe(run.pointer);
        self.lifecycle.send(STOP);
        tracing::debug!(frames = run.frames, "outline loop stopped");
        true
    }

    /// Token that stops the loop at its next frame when cancelled
    pub fn cancel_token(&self) -> Option<CancelToken> {
        self.run.as_ref().map(|run| run.cancel.clone())
    }

    /// Outstanding frame request, if running
    pub fn pending_request(&self) -> Option<FrameRequestId> {
        self.run.as_ref().and_then(|run| run.pending)
    }

    /// Frames drawn since the last start
    pub fn frames_rendered(&self) -> u64 {
        self.run.as_ref().map_or(0, |run| run.frames)
    }

    pub fn animator(&self) -> Option<&OutlineAnimator> {
        self.run.as_ref().map(|run| &run.animator)
    }

    /// Pointer target the next frame will chase
    pub fn pointer_target(&self) -> Option<Point> {
        self.run.as_ref().map(|run| run.target.get())
    }

    pub fn last_stats(&self) -> Option<FrameStats> {
        self.run.as_ref().and_then(|run| run.last_stats)
    }
}
