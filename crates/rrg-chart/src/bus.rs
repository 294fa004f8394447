//! Event bus between the window callbacks and the chart session.
//!
//! Callbacks [`emit`](EventBus::emit) events as they arrive. The event loop
//! later drains them in arrival order, applying each one to completion
//! before the next.

use std::collections::VecDeque;

use crate::events::ChartEvent;

/// FIFO queue of chart events.
#[derive(Debug, Default)]
pub struct EventBus {
    events: VecDeque<ChartEvent>,
}

impl EventBus {
    /// Create a new empty event bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Queue an event behind any already pending.
    pub fn emit(&mut self, event: ChartEvent) {
        self.events.push_back(event);
    }

    /// Remove and return the oldest pending event.
    pub fn next_event(&mut self) -> Option<ChartEvent> {
        self.events.pop_front()
    }
}
