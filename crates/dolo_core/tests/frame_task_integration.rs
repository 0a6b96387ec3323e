//! Integration tests for frame scheduling + FSM + event subscriptions
//!
//! A minimal self-scheduling task built only from core primitives: it re-arms
//! one frame at a time, follows pointer events through a subscription, and
//! tears both down on stop.

use dolo_core::events::{event_types, WINDOW};
use dolo_core::fsm::{StateId, StateMachine};
use dolo_core::{
    CancelToken, Event, EventDispatcher, FrameClock, FrameRequestId, FrameScheduler, Subscription,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

const IDLE: StateId = 0;
const ACTIVE: StateId = 1;

const START: u32 = 1;
const STOP: u32 = 2;

struct Task {
    fsm: StateMachine,
    pending: Option<FrameRequestId>,
    listener: Option<Subscription>,
    cancel: CancelToken,
    moves: Arc<AtomicU32>,
    frames: u32,
}

impl Task {
    fn new() -> Self {
        Self {
            fsm: StateMachine::builder(IDLE)
                .on(IDLE, START, ACTIVE)
                .on(ACTIVE, STOP, IDLE)
                .build(),
            pending: None,
            listener: None,
            cancel: CancelToken::new(),
            moves: Arc::new(AtomicU32::new(0)),
            frames: 0,
        }
    }

    fn start(&mut self, clock: &mut FrameClock, events: &mut EventDispatcher) {
        if self.fsm.try_send(START).is_none() {
            return;
        }
        self.cancel = CancelToken::new();
        let moves = self.moves.clone();
        let cancel = self.cancel.clone();
        self.listener = Some(events.subscribe(WINDOW, event_types::POINTER_MOVE, move |_| {
            if !cancel.is_cancelled() {
                moves.fetch_add(1, Ordering::SeqCst);
            }
        }));
        self.pending = Some(clock.request_frame());
    }

    fn tick(&mut self, clock: &mut FrameClock) {
        for due in clock.advance(16.666) {
            if self.pending != Some(due.id) || self.cancel.is_cancelled() {
                continue;
            }
            self.frames += 1;
            self.pending = Some(clock.request_frame());
        }
    }

    fn stop(&mut self, clock: &mut FrameClock, events: &mut EventDispatcher) {
        if self.fsm.try_send(STOP).is_none() {
            return;
        }
        self.cancel.cancel();
        if let Some(id) = self.pending.take() {
            clock.cancel_frame(id);
        }
        if let Some(listener) = self.listener.take() {
            events.unsubscribe(listener);
        }
    }
}

#[test]
fn test_task_rearms_and_tears_down() {
    let mut clock = FrameClock::new();
    let mut events = EventDispatcher::new();
    let mut task = Task::new();

    task.start(&mut clock, &mut events);
    task.start(&mut clock, &mut events);
    assert_eq!(clock.pending_count(), 1);
    assert_eq!(events.listener_count(), 1);

    for _ in 0..30 {
        task.tick(&mut clock);
        assert_eq!(clock.pending_count(), 1);
    }
    assert_eq!(task.frames, 30);

    events.dispatch(&mut Event::pointer_move(1.0, 2.0, 0));
    events.dispatch(&mut Event::resize(10, 10, 0));
    assert_eq!(task.moves.load(Ordering::SeqCst), 1);

    task.stop(&mut clock, &mut events);
    assert!(task.fsm.is_in(IDLE));
    assert_eq!(clock.pending_count(), 0);
    assert_eq!(events.listener_count(), 0);

    task.tick(&mut clock);
    events.dispatch(&mut Event::pointer_move(3.0, 4.0, 0));
    assert_eq!(task.frames, 30);
    assert_eq!(task.moves.load(Ordering::SeqCst), 1);

    // A second stop is a no-op
    task.stop(&mut clock, &mut events);
    assert!(task.fsm.is_in(IDLE));
}

#[test]
fn test_restart_after_stop_schedules_again() {
    let mut clock = FrameClock::new();
    let mut events = EventDispatcher::new();
    let mut task = Task::new();

    task.start(&mut clock, &mut events);
    task.tick(&mut clock);
    task.stop(&mut clock, &mut events);
    task.start(&mut clock, &mut events);

    assert!(task.fsm.is_in(ACTIVE));
    assert_eq!(clock.pending_count(), 1);
    assert_eq!(events.listener_count(), 1);

    task.tick(&mut clock);
    assert_eq!(task.frames, 2);
}

#[test]
fn test_cancelled_token_skips_frames_before_stop() {
    let mut clock = FrameClock::new();
    let mut events = EventDispatcher::new();
    let mut task = Task::new();
    task.start(&mut clock, &mut events);
    task.tick(&mut clock);

    assert!(task.cancel.clone().cancel());
    task.tick(&mut clock);
    assert_eq!(task.frames, 1);

    task.stop(&mut clock, &mut events);
    assert_eq!(events.listener_count(), 0);
}
