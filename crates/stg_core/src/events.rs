//! Raw hardware events and the hub that fans them out to subscribers.
//!
//! Whoever owns the input store subscribes an ingest handler when a scene
//! starts and unsubscribes it on teardown. The platform layer only ever calls
//! [`InputEventHub::dispatch`], so it never needs to know who is listening.

use crate::input::PhysicalInput;

#[derive(Debug, Clone, PartialEq)]
pub struct RawInputEvent {
    pub input: PhysicalInput,
    pub pressed: bool,
}

impl RawInputEvent {
    pub fn down(input: PhysicalInput) -> Self {
        Self {
            input,
            pressed: true,
        }
    }

    pub fn up(input: PhysicalInput) -> Self {
        Self {
            input,
            pressed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&RawInputEvent)>;

pub struct InputEventHub {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler)>,
}

impl InputEventHub {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&RawInputEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(existing, _)| *existing != id);
        self.handlers.len() != before
    }

    /// Delivers `event` to every handler in subscription order.
    pub fn dispatch(&mut self, event: &RawInputEvent) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for InputEventHub {
    fn default() -> Self {
        Self::new()
    }
}
