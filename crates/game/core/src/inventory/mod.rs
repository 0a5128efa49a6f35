//! Player inventory with most-frequently-used eviction.
//!
//! When the bag is full, picking up a new item throws away the item the player
//! has leaned on the most. Ties go to the item picked up first.

mod item;

pub use item::{Item, ItemDefinition, ItemError};

use std::cell::RefCell;

use crate::collection::{CollectionError, Entry, FrequencyBoundedCollection};
use crate::events::{EventBus, GameEvent};

/// Inventory manager.
///
/// Methods take `&self`: state lives behind a `RefCell` whose borrow is
/// released before any event is emitted, so listeners may call back into the
/// same manager.
#[derive(Debug)]
pub struct InventoryManager {
    items: RefCell<FrequencyBoundedCollection<Item>>,
    bus: EventBus,
}

impl InventoryManager {
    pub fn new(capacity: usize, bus: EventBus) -> Result<Self, CollectionError> {
        Ok(Self {
            items: RefCell::new(FrequencyBoundedCollection::new(capacity)?),
            bus,
        })
    }

    pub fn capacity(&self) -> usize {
        self.items.borrow().capacity()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Adds an item, evicting the most used one first when the bag is full.
    ///
    /// Emits `ItemRemoved` for the evicted item (if any), then `ItemAdded`.
    pub fn add_item(&self, item: Item) -> Result<(), CollectionError> {
        let (added, evicted) = {
            let mut items = self.items.borrow_mut();
            let id = item.id().to_owned();
            let admission = items.add(id, item)?;
            (admission.added.clone(), admission.evicted)
        };

        if let Some(evicted) = evicted {
            tracing::info!(
                "Inventory full, evicted MFU item {} ({} uses)",
                evicted.id(),
                evicted.use_count()
            );
            self.bus.emit(GameEvent::ItemRemoved(evicted));
        }

        tracing::debug!("Item added: {}", added.payload().name());
        self.bus.emit(GameEvent::ItemAdded(added));
        Ok(())
    }

    /// Records one use of an item and returns its new use count.
    pub fn use_item(&self, id: &str) -> Result<u32, CollectionError> {
        let used = {
            let mut items = self.items.borrow_mut();
            items.record_use(id)?.clone()
        };

        let count = used.use_count();
        tracing::debug!("Item used: {} ({} uses)", used.payload().name(), count);
        self.bus.emit(GameEvent::ItemUsed(used));
        Ok(count)
    }

    /// Wears a held item down by one use and returns its new wear.
    ///
    /// Wear belongs to the item and leaves the eviction counter alone, so no
    /// event is emitted.
    pub fn wear_item(&self, id: &str) -> Result<u32, ItemError> {
        let mut items = self.items.borrow_mut();
        items.payload_mut(id).ok_or_else(|| not_held(id))?.apply_wear()
    }

    /// Rolls a held item's wear back by `amount` and returns its new wear.
    pub fn repair_item(&self, id: &str, amount: u32) -> Result<u32, ItemError> {
        let mut items = self.items.borrow_mut();
        let item = items.payload_mut(id).ok_or_else(|| not_held(id))?;
        item.repair(amount);
        Ok(item.wear())
    }

    /// Evicts the most used item without adding a replacement.
    pub fn evict_most_frequent(&self) -> Option<Entry<Item>> {
        let evicted = self.items.borrow_mut().evict_most_frequent()?;
        self.bus.emit(GameEvent::ItemRemoved(evicted.clone()));
        Some(evicted)
    }

    /// Discards a specific item.
    pub fn remove_item(&self, id: &str) -> Option<Entry<Item>> {
        let removed = self.items.borrow_mut().remove(id)?;
        self.bus.emit(GameEvent::ItemRemoved(removed.clone()));
        Some(removed)
    }

    /// The item the next eviction would remove.
    pub fn most_frequent(&self) -> Option<Entry<Item>> {
        self.items.borrow().most_frequent().cloned()
    }

    pub fn get_item(&self, id: &str) -> Option<Entry<Item>> {
        self.items.borrow().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.borrow().contains(id)
    }

    /// Ordered copy of the inventory, oldest item first.
    pub fn items(&self) -> Vec<Entry<Item>> {
        self.items.borrow().snapshot()
    }
}

fn not_held(id: &str) -> ItemError {
    ItemError::NotHeld { id: id.to_owned() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::rc::Rc;

    fn item(id: &str) -> Item {
        Item::new(ItemDefinition::new(id, id.to_uppercase())).unwrap()
    }

    fn record(bus: &EventBus, kinds: &[EventKind]) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for kind in kinds {
            let log = Rc::clone(&log);
            bus.subscribe(*kind, move |event| {
                let id = match event {
                    GameEvent::ItemAdded(entry)
                    | GameEvent::ItemRemoved(entry)
                    | GameEvent::ItemUsed(entry) => entry.id().to_owned(),
                    _ => unreachable!(),
                };
                log.borrow_mut().push(format!("{}:{}", event.kind(), id));
            });
        }
        log
    }

    #[test]
    fn eviction_prefers_earliest_of_tied_items() {
        let bus = EventBus::new();
        let inventory = InventoryManager::new(3, bus.clone()).unwrap();
        for id in ["a", "b", "c"] {
            inventory.add_item(item(id)).unwrap();
        }
        for (id, uses) in [("a", 5), ("b", 2), ("c", 5)] {
            for _ in 0..uses {
                inventory.use_item(id).unwrap();
            }
        }

        let log = record(&bus, &[EventKind::ItemAdded, EventKind::ItemRemoved]);
        inventory.add_item(item("d")).unwrap();

        assert_eq!(*log.borrow(), vec!["item_removed:a", "item_added:d"]);
        let ids: Vec<_> = inventory.items().iter().map(|e| e.id().to_owned()).collect();
        assert_eq!(ids, vec!["b", "c", "d"]);
    }

    #[test]
    fn duplicate_add_emits_nothing() {
        let bus = EventBus::new();
        let inventory = InventoryManager::new(2, bus.clone()).unwrap();
        inventory.add_item(item("a")).unwrap();
        inventory.add_item(item("b")).unwrap();

        let log = record(&bus, &[EventKind::ItemAdded, EventKind::ItemRemoved]);
        assert!(matches!(
            inventory.add_item(item("a")),
            Err(CollectionError::Duplicate { .. })
        ));
        assert!(log.borrow().is_empty());
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn unknown_item_use_is_silent() {
        let bus = EventBus::new();
        let inventory = InventoryManager::new(2, bus.clone()).unwrap();
        let log = record(&bus, &[EventKind::ItemUsed]);

        assert!(inventory.use_item("ghost").is_err());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn listener_may_use_the_same_item_again() {
        let bus = EventBus::new();
        let inventory = Rc::new(InventoryManager::new(2, bus.clone()).unwrap());
        inventory.add_item(item("bomb")).unwrap();

        let weak = Rc::downgrade(&inventory);
        bus.subscribe_once(EventKind::ItemUsed, move |_| {
            if let Some(inventory) = weak.upgrade() {
                inventory.use_item("bomb").unwrap();
            }
        });

        assert_eq!(inventory.use_item("bomb").unwrap(), 1);
        assert_eq!(inventory.get_item("bomb").unwrap().use_count(), 2);
    }

    #[test]
    fn listener_adding_during_eviction_cannot_overflow() {
        let bus = EventBus::new();
        let inventory = Rc::new(InventoryManager::new(2, bus.clone()).unwrap());
        inventory.add_item(item("a")).unwrap();
        inventory.add_item(item("b")).unwrap();

        let weak = Rc::downgrade(&inventory);
        bus.subscribe_once(EventKind::ItemRemoved, move |_| {
            if let Some(inventory) = weak.upgrade() {
                inventory.add_item(item("x")).unwrap();
            }
        });

        inventory.add_item(item("c")).unwrap();
        assert_eq!(inventory.len(), 2);
        assert!(inventory.contains("x"));
    }

    #[test]
    fn explicit_eviction_and_removal() {
        let bus = EventBus::new();
        let inventory = InventoryManager::new(3, bus.clone()).unwrap();
        for id in ["a", "b", "c"] {
            inventory.add_item(item(id)).unwrap();
        }
        inventory.use_item("b").unwrap();

        assert_eq!(inventory.most_frequent().unwrap().id(), "b");
        assert_eq!(inventory.evict_most_frequent().unwrap().id(), "b");
        assert_eq!(inventory.remove_item("a").unwrap().id(), "a");
        assert!(inventory.remove_item("a").is_none());
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn wear_and_repair_leave_use_count_alone() {
        let bus = EventBus::new();
        let inventory = InventoryManager::new(2, bus.clone()).unwrap();
        inventory
            .add_item(Item::new(ItemDefinition::new("pick", "Pick").with_durability(2)).unwrap())
            .unwrap();
        let log = record(&bus, &[EventKind::ItemUsed, EventKind::ItemRemoved]);

        assert_eq!(inventory.wear_item("pick"), Ok(1));
        assert_eq!(inventory.wear_item("pick"), Ok(2));
        assert!(matches!(
            inventory.wear_item("pick"),
            Err(ItemError::Broken { durability: 2, .. })
        ));
        assert_eq!(inventory.repair_item("pick", 1), Ok(1));

        let pick = inventory.get_item("pick").unwrap();
        assert_eq!(pick.use_count(), 0);
        assert_eq!(pick.payload().wear_percentage(), 50.0);
        assert!(log.borrow().is_empty());
        assert_eq!(
            inventory.wear_item("ghost"),
            Err(ItemError::NotHeld { id: "ghost".into() })
        );
    }
}
