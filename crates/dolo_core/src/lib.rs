//! DOLO Core Runtime
//!
//! Host-side primitives shared by the decorative backdrop effects:
//!
//! - **Event Dispatch**: pointer, resize and color scheme events with explicit
//!   unsubscribe handles
//! - **State Machines**: flat statecharts for effect lifecycles
//! - **Frame Scheduling**: cancellable per-frame requests and a deterministic
//!   frame clock
//!
//! # Example
//!
//! ```rust
//! use dolo_core::{EventDispatcher, Event, FrameClock, FrameScheduler};
//! use dolo_core::events::{event_types, WINDOW};
//!
//! let mut dispatcher = EventDispatcher::new();
//! let sub = dispatcher.subscribe(WINDOW, event_types::POINTER_MOVE, |event| {
//!     assert!(event.pointer_position().is_some());
//! });
//! dispatcher.dispatch(&mut Event::pointer_move(10.0, 20.0, 0));
//! assert!(dispatcher.unsubscribe(sub));
//!
//! let mut clock = FrameClock::new();
//! let id = clock.request_frame();
//! let due = clock.advance(16.0);
//! assert_eq!(due[0].id, id);
//! ```

pub mod events;
pub mod frame;
pub mod fsm;
pub mod theme;

pub use events::{Event, EventData, EventDispatcher, EventType, Subscription};
pub use frame::{CancelToken, DueFrame, FrameClock, FrameRequestId, FrameScheduler};
pub use fsm::{EventId, StateId, StateMachine};
pub use theme::ColorScheme;
