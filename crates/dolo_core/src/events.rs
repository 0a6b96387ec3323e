//! Event dispatch system
//!
//! Host events (pointer movement, surface resize, color scheme changes) are
//! routed to listeners registered per target and event type. Every
//! registration returns a [`Subscription`] handle, and the only way to detach a
//! listener is to hand that handle back to [`EventDispatcher::unsubscribe`].

use crate::theme::ColorScheme;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Target id for listeners attached to the whole window rather than a surface.
pub const WINDOW: u64 = 0;

/// Event types the backdrop listens for
pub mod event_types {
    use super::EventType;

    pub const POINTER_MOVE: EventType = 3;
    pub const RESIZE: EventType = 40;

    /// Light/dark scheme switched
    pub const SCHEME_CHANGE: EventType = 90;
}

new_key_type! {
    /// Identifies a registered listener
    pub struct SubscriptionId;
}

/// A host event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: u64,
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Pointer { x: f32, y: f32 },
    Resize { width: u32, height: u32 },
    Scheme(ColorScheme),
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: u64, data: EventData, timestamp: u64) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp,
            propagation_stopped: false,
        }
    }

    /// Pointer moved to `(x, y)` in window coordinates
    pub fn pointer_move(x: f32, y: f32, timestamp: u64) -> Self {
        Self::new(
            event_types::POINTER_MOVE,
            WINDOW,
            EventData::Pointer { x, y },
            timestamp,
        )
    }

    pub fn resize(width: u32, height: u32, timestamp: u64) -> Self {
        Self::new(
            event_types::RESIZE,
            WINDOW,
            EventData::Resize { width, height },
            timestamp,
        )
    }

    pub fn scheme_change(scheme: ColorScheme, timestamp: u64) -> Self {
        Self::new(
            event_types::SCHEME_CHANGE,
            WINDOW,
            EventData::Scheme(scheme),
            timestamp,
        )
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Pointer coordinates, if this is a pointer event
    pub fn pointer_position(&self) -> Option<(f32, f32)> {
        match self.data {
            EventData::Pointer { x, y } => Some((x, y)),
            _ => None,
        }
    }
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event) + Send + Sync>;

/// Handle for a registered listener.
///
/// Dropping the handle does not detach the listener; pass it to
/// [`EventDispatcher::unsubscribe`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a listener can only be removed through its subscription"]
pub struct Subscription {
    id: SubscriptionId,
    target: u64,
    event_type: EventType,
}

/// Dispatches events to registered handlers
pub struct EventDispatcher {
    handlers: SlotMap<SubscriptionId, EventHandler>,
    routes: FxHashMap<(u64, EventType), SmallVec<[SubscriptionId; 4]>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: SlotMap::with_key(),
            routes: FxHashMap::default(),
        }
    }

    /// Register an event handler for a target and event type
    pub fn subscribe<F>(&mut self, target: u64, event_type: EventType, handler: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = self.handlers.insert(Box::new(handler));
        self.routes
            .entry((target, event_type))
            .or_default()
            .push(id);
        tracing::trace!(?id, target, event_type, "listener subscribed");
        Subscription {
            id,
            target,
            event_type,
        }
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let key = (subscription.target, subscription.event_type);
        if let Some(ids) = self.routes.get_mut(&key) {
            ids.retain(|id| *id != subscription.id);
            if ids.is_empty() {
                self.routes.remove(&key);
            }
        }
        let removed = self.handlers.remove(subscription.id).is_some();
        tracing::trace!(id = ?subscription.id, removed, "listener unsubscribed");
        removed
    }

    /// Dispatch an event to all registered handlers in registration order
    pub fn dispatch(&self, event: &mut Event) {
        let Some(ids) = self.routes.get(&(event.target, event.event_type)) else {
            return;
        };
        for id in ids {
            if event.propagation_stopped {
                break;
            }
            if let Some(handler) = self.handlers.get(*id) {
                handler(event);
            }
        }
    }

    /// Number of live listeners across all targets and event types
    pub fn listener_count(&self) -> usize {
        self.handlers.len()
    }

    /// Number of live listeners for one target and event type
    pub fn listeners_for(&self, target: u64, event_type: EventType) -> usize {
        self.routes
            .get(&(target, event_type))
            .map_or(0, |ids| ids.len())
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dispatch_reaches_matching_listener_only() {
        let mut dispatcher = EventDispatcher::new();
        let moves = Arc::new(AtomicUsize::new(0));
        let resizes = Arc::new(AtomicUsize::new(0));

        let moves_clone = moves.clone();
        let _move_sub = dispatcher.subscribe(WINDOW, event_types::POINTER_MOVE, move |_| {
            moves_clone.fetch_add(1, Ordering::SeqCst);
        });
        let resizes_clone = resizes.clone();
        let _resize_sub = dispatcher.subscribe(WINDOW, event_types::RESIZE, move |_| {
            resizes_clone.fetch_add(1, Ordering::SeqCst);
        });

        dispatcher.dispatch(&mut Event::pointer_move(1.0, 2.0, 0));
        dispatcher.dispatch(&mut Event::pointer_move(3.0, 4.0, 1));

        assert_eq!(moves.load(Ordering::SeqCst), 2);
        assert_eq!(resizes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unsubscribe_detaches_listener() {
        let mut dispatcher = EventDispatcher::new();
        let last = Arc::new(Mutex::new(None));

        let last_clone = last.clone();
        let sub = dispatcher.subscribe(WINDOW, event_types::POINTER_MOVE, move |event| {
            *last_clone.lock().unwrap() = event.pointer_position();
        });
        assert_eq!(dispatcher.listener_count(), 1);

        dispatcher.dispatch(&mut Event::pointer_move(5.0, 6.0, 0));
        assert_eq!(*last.lock().unwrap(), Some((5.0, 6.0)));

        assert!(dispatcher.unsubscribe(sub));
        assert_eq!(dispatcher.listener_count(), 0);
        assert_eq!(dispatcher.listeners_for(WINDOW, event_types::POINTER_MOVE), 0);

        dispatcher.dispatch(&mut Event::pointer_move(7.0, 8.0, 1));
        assert_eq!(*last.lock().unwrap(), Some((5.0, 6.0)));
    }

    #[test]
    fn test_stop_propagation_skips_later_listeners() {
        let mut dispatcher = EventDispatcher::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = order.clone();
        let _a = dispatcher.subscribe(WINDOW, event_types::RESIZE, move |_| {
            first.lock().unwrap().push("first");
        });
        let second = order.clone();
        let _b = dispatcher.subscribe(WINDOW, event_types::RESIZE, move |_| {
            second.lock().unwrap().push("second");
        });

        let mut event = Event::resize(100, 100, 0);
        dispatcher.dispatch(&mut event);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);

        order.lock().unwrap().clear();
        let mut stopped = Event::resize(100, 100, 1);
        stopped.stop_propagation();
        dispatcher.dispatch(&mut stopped);
        assert!(order.lock().unwrap().is_empty());
    }

    #[test]
    fn test_targets_are_isolated() {
        let mut dispatcher = EventDispatcher::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        let _sub = dispatcher.subscribe(7, event_types::POINTER_MOVE, move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        // Window-level event does not reach the surface listener
        dispatcher.dispatch(&mut Event::pointer_move(0.0, 0.0, 0));
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let mut targeted = Event::pointer_move(0.0, 0.0, 0);
        targeted.target = 7;
        dispatcher.dispatch(&mut targeted);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
