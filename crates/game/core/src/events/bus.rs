//! Synchronous, single-threaded publish/subscribe bus.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::types::{EventKind, GameEvent};

/// Callback invoked for every event of the kind it subscribed to.
pub type Listener = Rc<dyn Fn(&GameEvent)>;

/// Identity of one registration, unique for the lifetime of a bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Registration {
    id: SubscriptionId,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    by_kind: HashMap<EventKind, Vec<Registration>>,
}

impl Registry {
    fn allocate_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, kind: EventKind, id: SubscriptionId, listener: Listener) {
        self.by_kind
            .entry(kind)
            .or_default()
            .push(Registration { id, listener });
    }

    fn remove(&mut self, kind: EventKind, id: SubscriptionId) -> bool {
        let Some(registrations) = self.by_kind.get_mut(&kind) else {
            return false;
        };

        let before = registrations.len();
        registrations.retain(|registration| registration.id != id);
        let removed = registrations.len() != before;

        if registrations.is_empty() {
            self.by_kind.remove(&kind);
        }
        removed
    }
}

/// Handle returned by [`EventBus::subscribe`].
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
#[derive(Clone, Debug)]
pub struct Subscription {
    kind: EventKind,
    id: SubscriptionId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Removes the registration. Returns false if it was already gone.
    pub fn unsubscribe(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow_mut().remove(self.kind, self.id))
    }
}

/// Event bus shared by every manager of a session.
///
/// Cloning yields another handle to the same listener registry.
///
/// Dispatch is reentrant: [`EventBus::emit`] copies the listener list of the
/// event's kind before invoking anything, so listeners may subscribe,
/// unsubscribe, or emit again while being called. Listeners added during a
/// dispatch are first called on the next emission.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener` to the ordered listener list of `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, listener: F) -> Subscription
    where
        F: Fn(&GameEvent) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.allocate_id();
        registry.insert(kind, id, Rc::new(listener));
        self.handle(kind, id)
    }

    /// Subscribes a listener that fires at most once.
    ///
    /// The wrapper unregisters itself before running `listener`, so an
    /// emission of the same kind from inside `listener` does not reach it.
    /// The callback is moved out on first use, which also covers the case of
    /// an outer dispatch that captured the wrapper before it unregistered.
    pub fn subscribe_once<F>(&self, kind: EventKind, listener: F) -> Subscription
    where
        F: FnOnce(&GameEvent) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.allocate_id();

        let weak = Rc::downgrade(&self.registry);
        let slot = RefCell::new(Some(listener));
        let wrapper = move |event: &GameEvent| {
            if let Some(registry) = weak.upgrade() {
                registry.borrow_mut().remove(kind, id);
            }
            let listener = slot.borrow_mut().take();
            if let Some(listener) = listener {
                listener(event);
            }
        };

        registry.insert(kind, id, Rc::new(wrapper));
        self.handle(kind, id)
    }

    /// Removes a registration by identity. Returns false if it was not registered.
    pub fn unsubscribe(&self, kind: EventKind, id: SubscriptionId) -> bool {
        self.registry.borrow_mut().remove(kind, id)
    }

    /// Invokes every listener registered for the event's kind, in subscription order.
    pub fn emit(&self, event: GameEvent) {
        let kind = event.kind();
        let listeners: Vec<Listener> = {
            let registry = self.registry.borrow();
            match registry.by_kind.get(&kind) {
                Some(registrations) => registrations
                    .iter()
                    .map(|registration| Rc::clone(&registration.listener))
                    .collect(),
                None => {
                    tracing::trace!("No listeners for {}", kind);
                    return;
                }
            }
        };

        for listener in listeners {
            listener(&event);
        }
    }

    /// Removes all listeners of one kind, or of every kind when `kind` is `None`.
    pub fn clear(&self, kind: Option<EventKind>) {
        let mut registry = self.registry.borrow_mut();
        match kind {
            Some(kind) => {
                registry.by_kind.remove(&kind);
            }
            None => registry.by_kind.clear(),
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .by_kind
            .get(&kind)
            .map_or(0, Vec::len)
    }

    pub fn has_listeners(&self, kind: EventKind) -> bool {
        self.listener_count(kind) > 0
    }

    fn handle(&self, kind: EventKind, id: SubscriptionId) -> Subscription {
        Subscription {
            kind,
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("EventBus")
            .field("kinds", &registry.by_kind.len())
            .field("next_id", &registry.next_id)
            .finish()
    }
}
