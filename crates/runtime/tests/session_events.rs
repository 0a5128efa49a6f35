use std::cell::RefCell;
use std::rc::Rc;

use hunter_core::{
    EventKind, GameConfig, GameEvent, Item, ItemDefinition, Skill, SkillContext, SkillDefinition,
};
use hunter_runtime::Session;

fn item(id: &str) -> Item {
    Item::new(ItemDefinition::new(id, id)).unwrap()
}

#[test]
fn listeners_run_in_subscription_order() {
    let session = Session::new(GameConfig::default()).unwrap();
    session.add_item(item("rope")).unwrap();

    let order = Rc::new(RefCell::new(Vec::new()));
    for name in ["x", "y"] {
        let order = Rc::clone(&order);
        session.subscribe(EventKind::ItemUsed, move |_| {
            order.borrow_mut().push(format!("{name}:start"));
            order.borrow_mut().push(format!("{name}:end"));
        });
    }

    session.use_item("rope").unwrap();
    assert_eq!(*order.borrow(), vec!["x:start", "x:end", "y:start", "y:end"]);
}

#[test]
fn once_listener_that_retriggers_fires_once() {
    let session = Rc::new(Session::new(GameConfig::default()).unwrap());
    session.add_item(item("bell")).unwrap();

    let fired = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&fired);
    let weak = Rc::downgrade(&session);
    session.subscribe_once(EventKind::ItemUsed, move |_| {
        *counter.borrow_mut() += 1;
        if let Some(session) = weak.upgrade() {
            session.use_item("bell").unwrap();
        }
    });

    session.use_item("bell").unwrap();
    session.use_item("bell").unwrap();

    assert_eq!(*fired.borrow(), 1);
    assert_eq!(session.inventory_snapshot()[0].use_count(), 3);
}

#[test]
fn used_handler_reenters_same_manager() {
    let session = Rc::new(Session::new(GameConfig::default()).unwrap());
    session.add_item(item("echo_stone")).unwrap();

    let weak = Rc::downgrade(&session);
    session.subscribe(EventKind::ItemUsed, move |event| {
        if let (GameEvent::ItemUsed(entry), Some(session)) = (event, weak.upgrade())
            && entry.use_count() < 4
        {
            session.use_item(entry.id()).unwrap();
        }
    });

    assert_eq!(session.use_item("echo_stone").unwrap(), 1);
    assert_eq!(session.inventory_snapshot()[0].use_count(), 4);
}

#[test]
fn capacity_holds_after_every_add() {
    let session = Rc::new(Session::new(GameConfig::with_capacities(3, 2)).unwrap());
    let capacity = session.config().inventory_capacity;

    let weak = Rc::downgrade(&session);
    session.subscribe(EventKind::ItemAdded, move |_| {
        if let Some(session) = weak.upgrade() {
            assert!(session.inventory_snapshot().len() <= capacity);
        }
    });

    for round in 0..20 {
        session.add_item(item(&format!("item_{round}"))).unwrap();
        for _ in 0..(round % 4) {
            session.use_item(&format!("item_{round}")).unwrap();
        }
        assert!(session.inventory_snapshot().len() <= capacity);
    }
}

#[test]
fn skill_effect_sees_effectiveness() {
    let session = Session::new(GameConfig::default()).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let skill = Skill::new(SkillDefinition::new("nova", "Nova"))
        .unwrap()
        .with_effect(move |context, effectiveness| {
            sink.borrow_mut().push((context.now_ms, effectiveness));
        });
    session.learn_skill(skill).unwrap();

    for now in 0..25 {
        session.use_skill("nova", &SkillContext::at(now)).unwrap();
    }

    let seen = seen.borrow();
    assert_eq!(seen.len(), 25);
    // mastery 50, penalty 12.5
    assert_eq!(seen[24], (24, 37.5));
}
