//! Typed event bus shared by every manager.
//!
//! Managers announce state changes by emitting a [`GameEvent`]; hosts observe
//! them by subscribing to an [`EventKind`]. Dispatch is synchronous and
//! reentrant: a listener may call back into the manager that emitted.

mod bus;
mod types;

pub use bus::{EventBus, Listener, Subscription, SubscriptionId};
pub use types::{EventKind, GameEvent};
