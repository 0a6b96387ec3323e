//! Lifecycle state machines
//!
//! Flat, table-driven machines for effect lifecycles.
//!
//! Effects keep their own side effects next to the `send` call that drives
//! the transition, so the machine itself only answers "which state now".

use smallvec::SmallVec;

/// Numeric state label
pub type StateId = u32;

/// Numeric input label
pub type EventId = u32;

/// One row of the transition table: `from --event--> to`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Transition {
    from_state: StateId,
    event: EventId,
    to_state: StateId,
}

/// Chained construction of a [`StateMachine`]
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: SmallVec<[Transition; 4]>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: SmallVec::new(),
        }
    }

    /// Add a row to the table
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition {
            from_state: from,
            event,
            to_state: to,
        });
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
        }
    }
}

/// Running machine: current state plus its transition table
pub struct StateMachine {
    current_state: StateId,
    transitions: SmallVec<[Transition; 4]>,
}

impl StateMachine {
    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Send an event, returning the new state if a transition fired
    pub fn try_send(&mut self, event: EventId) -> Option<StateId> {
        let current = self.current_state;
        let to_state = self
            .transitions
            .iter()
            .find(|t| t.from_state == current && t.event == event)?
            .to_state;

        self.current_state = to_state;
        tracing::trace!(from = current, event, to = to_state, "fsm transition");
        Some(to_state)
    }

    /// Like [`try_send`](Self::try_send), returning the state after the event
    pub fn send(&mut self, event: EventId) -> StateId {
        self.try_send(event).unwrap_or(self.current_state)
    }
}
