//! Scene-side handle on the shared input normalizer.
//!
//! The normalizer itself lives for the whole run; each scene gets a plugin
//! that subscribes an ingest handler on start and drops it on destroy, so
//! input state carries across scene transitions without any global.

use std::cell::RefCell;
use std::rc::Rc;

use stg_core::{
    ClockHandle, InputEventHub, InputNormalizer, InputState, NormalizedInput, SubscriptionId,
};

pub struct NormalizedInputPlugin {
    store: Rc<RefCell<InputNormalizer>>,
    clock: ClockHandle,
    subscription: Option<SubscriptionId>,
}

impl NormalizedInputPlugin {
    pub fn new(store: Rc<RefCell<InputNormalizer>>, clock: ClockHandle) -> Self {
        Self {
            store,
            clock,
            subscription: None,
        }
    }

    pub fn start(&mut self, hub: &mut InputEventHub) {
        if self.subscription.is_some() {
            return;
        }
        let store = self.store.clone();
        let clock = self.clock.clone();
        let id = hub.subscribe(move |event| {
            store
                .borrow_mut()
                .ingest(&event.input, event.pressed, clock.now());
        });
        self.subscription = Some(id);
    }

    pub fn destroy(&mut self, hub: &mut InputEventHub) {
        if let Some(id) = self.subscription.take() {
            hub.unsubscribe(id);
        }
    }

    pub fn is_started(&self) -> bool {
        self.subscription.is_some()
    }

    /// Query at the scene clock's current time.
    pub fn query(&self, input: NormalizedInput, state: InputState, forgiveness: f64) -> bool {
        self.store
            .borrow()
            .query(input, state, forgiveness, self.clock.now())
    }
}
