//! Quantity-tracked resources with usage-driven depletion.
//!
//! Depletion measures how exhausted a resource is from cumulative use, not how
//! much is left: a record used ten times is fully depleted even if its stock
//! was topped up in between. Regeneration rolls depletion back by a fixed step.

use std::cell::RefCell;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::events::{EventBus, GameEvent};

// ============================================================================
// Resource Record
// ============================================================================

/// One tracked resource. Destroyed when its quantity reaches zero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceRecord {
    pub id: String,
    /// Optional display name supplied on creation.
    pub name: Option<String>,
    pub quantity: u32,
    /// Cumulative units consumed. Never decreases.
    pub use_count: u32,
    /// Exhaustion percentage in `[0, 100]`.
    pub depletion: u32,
}

impl ResourceRecord {
    fn new(id: String, quantity: u32, name: Option<String>) -> Self {
        Self {
            id,
            name,
            quantity,
            use_count: 0,
            depletion: 0,
        }
    }

    /// `1 - depletion / 100`.
    pub fn efficiency(&self) -> f64 {
        1.0 - f64::from(self.depletion) / f64::from(GameConfig::MAX_DEPLETION)
    }
}

/// Depletion as a pure function of cumulative use.
pub fn depletion_for(use_count: u32) -> u32 {
    (use_count.saturating_mul(GameConfig::MAX_DEPLETION) / GameConfig::USES_FOR_FULL_DEPLETION)
        .min(GameConfig::MAX_DEPLETION)
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("resource '{id}' not found")]
    NotFound { id: String },

    #[error("resource '{id}' has {available} left, {requested} requested")]
    InsufficientStock {
        id: String,
        requested: u32,
        available: u32,
    },

    #[error("resource '{id}': amount must be positive")]
    ZeroAmount { id: String },
}

impl GameError for ResourceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound { .. } | Self::InsufficientStock { .. } => ErrorSeverity::Recoverable,
            Self::ZeroAmount { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "RESOURCE_NOT_FOUND",
            Self::InsufficientStock { .. } => "RESOURCE_INSUFFICIENT_STOCK",
            Self::ZeroAmount { .. } => "RESOURCE_ZERO_AMOUNT",
        }
    }
}

/// Result of a successful [`ResourceStore::use_resource`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Consumption {
    /// Stock remains; carries the remaining quantity.
    Remaining(u32),
    /// The last unit was consumed and the record deleted.
    Depleted,
}

// ============================================================================
// Resource Store
// ============================================================================

/// Insertion-ordered resource records keyed by id.
///
/// Borrow discipline matches the collection managers: the record list is
/// released before any event is emitted.
#[derive(Debug)]
pub struct ResourceStore {
    records: RefCell<Vec<ResourceRecord>>,
    bus: EventBus,
}

impl ResourceStore {
    pub fn new(bus: EventBus) -> Self {
        Self {
            records: RefCell::new(Vec::new()),
            bus,
        }
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Adds stock. An existing record is merged into (quantity only, silently);
    /// otherwise a fresh record is created and `ResourceAdded` is emitted.
    pub fn add_resource(
        &self,
        id: &str,
        quantity: u32,
        name: Option<String>,
    ) -> Result<(), ResourceError> {
        if quantity == 0 {
            return Err(ResourceError::ZeroAmount { id: id.to_owned() });
        }

        let created = {
            let mut records = self.records.borrow_mut();
            match records.iter_mut().find(|record| record.id == id) {
                Some(record) => {
                    record.quantity = record.quantity.saturating_add(quantity);
                    tracing::debug!("Resource {} merged, quantity {}", id, record.quantity);
                    None
                }
                None => {
                    let record = ResourceRecord::new(id.to_owned(), quantity, name);
                    records.push(record.clone());
                    Some(record)
                }
            }
        };

        if let Some(record) = created {
            tracing::debug!("Resource added: {} x{}", record.id, record.quantity);
            self.bus.emit(GameEvent::ResourceAdded(record));
        }
        Ok(())
    }

    /// Consumes `amount` units.
    ///
    /// Emits `ResourceDepleted` with the removed record when the stock hits
    /// zero, `ResourceUsed` otherwise. Never both.
    pub fn use_resource(&self, id: &str, amount: u32) -> Result<Consumption, ResourceError> {
        if amount == 0 {
            return Err(ResourceError::ZeroAmount { id: id.to_owned() });
        }

        let (record, depleted) = {
            let mut records = self.records.borrow_mut();
            let index = records
                .iter()
                .position(|record| record.id == id)
                .ok_or_else(|| ResourceError::NotFound { id: id.to_owned() })?;

            let record = &mut records[index];
            if record.quantity < amount {
                return Err(ResourceError::InsufficientStock {
                    id: id.to_owned(),
                    requested: amount,
                    available: record.quantity,
                });
            }

            record.use_count = record.use_count.saturating_add(amount);
            record.quantity -= amount;
            record.depletion = depletion_for(record.use_count);

            if record.quantity == 0 {
                (records.remove(index), true)
            } else {
                (record.clone(), false)
            }
        };

        if depleted {
            tracing::info!("Resource {} depleted after {} uses", record.id, record.use_count);
            self.bus.emit(GameEvent::ResourceDepleted(record));
            Ok(Consumption::Depleted)
        } else {
            let remaining = record.quantity;
            tracing::debug!(
                "Resource used: {} x{} ({} left, {}% depleted)",
                record.id,
                amount,
                remaining,
                record.depletion
            );
            self.bus.emit(GameEvent::ResourceUsed { record, amount });
            Ok(Consumption::Remaining(remaining))
        }
    }

    /// Restocks a resource and rolls depletion back by a fixed step,
    /// regardless of `amount`. Emits nothing.
    pub fn regenerate_resource(&self, id: &str, amount: u32) -> Result<(), ResourceError> {
        if amount == 0 {
            return Err(ResourceError::ZeroAmount { id: id.to_owned() });
        }

        let mut records = self.records.borrow_mut();
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| ResourceError::NotFound { id: id.to_owned() })?;

        record.quantity = record.quantity.saturating_add(amount);
        record.depletion = record
            .depletion
            .saturating_sub(GameConfig::REGENERATION_RECOVERY);
        tracing::debug!(
            "Resource {} regenerated to {} ({}% depleted)",
            id,
            record.quantity,
            record.depletion
        );
        Ok(())
    }

    /// Efficiency of a resource, 0 if it is not tracked.
    pub fn efficiency(&self, id: &str) -> f64 {
        self.records
            .borrow()
            .iter()
            .find(|record| record.id == id)
            .map_or(0.0, ResourceRecord::efficiency)
    }

    pub fn get(&self, id: &str) -> Option<ResourceRecord> {
        self.records
            .borrow()
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    /// Ordered copy of every record, oldest first.
    pub fn resources(&self) -> Vec<ResourceRecord> {
        self.records.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::rc::Rc;

    fn kinds_of(bus: &EventBus) -> Rc<RefCell<Vec<EventKind>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for kind in [
            EventKind::ResourceAdded,
            EventKind::ResourceUsed,
            EventKind::ResourceDepleted,
        ] {
            let log = Rc::clone(&log);
            bus.subscribe(kind, move |event| log.borrow_mut().push(event.kind()));
        }
        log
    }

    #[test]
    fn depletion_reaches_hundred_on_tenth_use() {
        let store = ResourceStore::new(EventBus::new());
        store.add_resource("wood", 50, None).unwrap();

        for _ in 0..9 {
            store.use_resource("wood", 1).unwrap();
        }
        assert_eq!(store.get("wood").unwrap().depletion, 90);

        assert_eq!(store.use_resource("wood", 1), Ok(Consumption::Remaining(40)));
        assert_eq!(store.get("wood").unwrap().depletion, 100);
        assert_eq!(store.efficiency("wood"), 0.0);

        store.regenerate_resource("wood", 5).unwrap();
        let wood = store.get("wood").unwrap();
        assert_eq!(wood.depletion, 90);
        assert_eq!(wood.quantity, 45);
        assert!((store.efficiency("wood") - 0.1).abs() < 1e-9);
    }

    #[test]
    fn depletion_keeps_saturating() {
        assert_eq!(depletion_for(0), 0);
        assert_eq!(depletion_for(3), 30);
        assert_eq!(depletion_for(25), 100);
        assert_eq!(depletion_for(u32::MAX), 100);
    }

    #[test]
    fn exhausting_stock_deletes_record_with_one_event() {
        let bus = EventBus::new();
        let store = ResourceStore::new(bus.clone());
        store.add_resource("ore", 3, Some("Iron Ore".into())).unwrap();
        let log = kinds_of(&bus);

        let depleted = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&depleted);
        bus.subscribe(EventKind::ResourceDepleted, move |event| {
            if let GameEvent::ResourceDepleted(record) = event {
                *slot.borrow_mut() = Some(record.clone());
            }
        });

        assert_eq!(store.use_resource("ore", 3), Ok(Consumption::Depleted));
        assert!(store.get("ore").is_none());
        assert_eq!(*log.borrow(), vec![EventKind::ResourceDepleted]);

        let record = depleted.borrow().clone().unwrap();
        assert_eq!(record.quantity, 0);
        assert_eq!(record.use_count, 3);
        assert_eq!(record.name.as_deref(), Some("Iron Ore"));
    }

    #[test]
    fn merge_adds_quantity_without_event() {
        let bus = EventBus::new();
        let store = ResourceStore::new(bus.clone());
        let log = kinds_of(&bus);

        store.add_resource("herb", 2, Some("Herb".into())).unwrap();
        store.use_resource("herb", 1).unwrap();
        store.add_resource("herb", 4, Some("Ignored".into())).unwrap();

        let herb = store.get("herb").unwrap();
        assert_eq!(herb.quantity, 5);
        assert_eq!(herb.use_count, 1);
        assert_eq!(herb.name.as_deref(), Some("Herb"));
        assert_eq!(
            *log.borrow(),
            vec![EventKind::ResourceAdded, EventKind::ResourceUsed]
        );
    }

    #[test]
    fn failures_are_no_ops() {
        let bus = EventBus::new();
        let store = ResourceStore::new(bus.clone());
        store.add_resource("gem", 2, None).unwrap();
        let log = kinds_of(&bus);

        assert_eq!(
            store.use_resource("gem", 3),
            Err(ResourceError::InsufficientStock {
                id: "gem".into(),
                requested: 3,
                available: 2,
            })
        );
        assert_eq!(
            store.use_resource("gem", 0).unwrap_err().error_code(),
            "RESOURCE_ZERO_AMOUNT"
        );
        assert!(matches!(
            store.use_resource("dust", 1),
            Err(ResourceError::NotFound { .. })
        ));
        assert!(store.regenerate_resource("dust", 1).is_err());
        assert!(store.add_resource("gem", 0, None).is_err());

        assert_eq!(store.get("gem").unwrap().quantity, 2);
        assert_eq!(store.get("gem").unwrap().use_count, 0);
        assert!(log.borrow().is_empty());
        assert_eq!(store.efficiency("dust"), 0.0);
    }

    #[test]
    fn depleted_listener_may_restock() {
        let bus = EventBus::new();
        let store = Rc::new(ResourceStore::new(bus.clone()));
        store.add_resource("mana", 1, None).unwrap();

        let weak = Rc::downgrade(&store);
        bus.subscribe_once(EventKind::ResourceDepleted, move |event| {
            if let (GameEvent::ResourceDepleted(record), Some(store)) = (event, weak.upgrade()) {
                store.add_resource(&record.id, 10, None).unwrap();
            }
        });

        store.use_resource("mana", 1).unwrap();
        let mana = store.get("mana").unwrap();
        assert_eq!(mana.quantity, 10);
        assert_eq!(mana.use_count, 0);
    }
}
