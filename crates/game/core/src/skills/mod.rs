//! Skill memory with most-frequently-used forgetting.
//!
//! Learning a skill while memory is full forgets the skill used the most.
//! Every use raises mastery but also the usage penalty, so spamming one skill
//! makes it weaker over time.

mod skill;

pub use skill::{Skill, SkillContext, SkillDefinition, SkillEffect, effectiveness};

use std::cell::RefCell;

use crate::collection::{CollectionError, Entry, FrequencyBoundedCollection};
use crate::events::{EventBus, GameEvent};

/// Skill manager. Same borrow discipline as [`crate::inventory::InventoryManager`].
#[derive(Debug)]
pub struct SkillManager {
    skills: RefCell<FrequencyBoundedCollection<Skill>>,
    bus: EventBus,
}

impl SkillManager {
    pub fn new(capacity: usize, bus: EventBus) -> Result<Self, CollectionError> {
        Ok(Self {
            skills: RefCell::new(FrequencyBoundedCollection::new(capacity)?),
            bus,
        })
    }

    pub fn capacity(&self) -> usize {
        self.skills.borrow().capacity()
    }

    pub fn len(&self) -> usize {
        self.skills.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.borrow().is_empty()
    }

    /// Learns a skill, forgetting the most used one first when memory is full.
    ///
    /// Emits `SkillForgotten` (if any) then `SkillLearned`.
    pub fn learn_skill(&self, skill: Skill) -> Result<(), CollectionError> {
        let (learned, forgotten) = {
            let mut skills = self.skills.borrow_mut();
            let id = skill.id().to_owned();
            let admission = skills.add(id, skill)?;
            (admission.added.clone(), admission.evicted)
        };

        if let Some(forgotten) = forgotten {
            tracing::info!(
                "Skill memory full, forgot MFU skill {} ({} uses)",
                forgotten.id(),
                forgotten.use_count()
            );
            self.bus.emit(GameEvent::SkillForgotten(forgotten));
        }

        tracing::debug!("Skill learned: {}", learned.payload().name());
        self.bus.emit(GameEvent::SkillLearned(learned));
        Ok(())
    }

    /// Uses a skill and returns the effectiveness handed to its effect.
    ///
    /// Order: use count, mastery, effectiveness, effect callback, `SkillUsed`.
    pub fn use_skill(&self, id: &str, context: &SkillContext) -> Result<f64, CollectionError> {
        let (used, effectiveness) = {
            let mut skills = self.skills.borrow_mut();
            let entry = skills.record_use(id)?;
            let use_count = entry.use_count();
            let skill = entry.payload_mut();
            skill.practice(context.now_ms);
            let effectiveness = effectiveness(skill.mastery(), use_count);
            (entry.clone(), effectiveness)
        };

        if let Some(effect) = used.payload().effect() {
            effect(context, effectiveness);
        }

        tracing::debug!(
            "Skill used: {} ({} uses, {:.2}% effectiveness)",
            used.payload().name(),
            used.use_count(),
            effectiveness
        );
        self.bus.emit(GameEvent::SkillUsed {
            skill: used,
            effectiveness,
        });
        Ok(effectiveness)
    }

    /// Forgets the most used skill without learning a replacement.
    pub fn forget_most_frequent(&self) -> Option<Entry<Skill>> {
        let forgotten = self.skills.borrow_mut().evict_most_frequent()?;
        self.bus.emit(GameEvent::SkillForgotten(forgotten.clone()));
        Some(forgotten)
    }

    /// Current effectiveness of a skill without using it.
    pub fn current_effectiveness(&self, id: &str) -> Option<f64> {
        self.skills
            .borrow()
            .get(id)
            .map(|entry| effectiveness(entry.payload().mastery(), entry.use_count()))
    }

    pub fn get_skill(&self, id: &str) -> Option<Entry<Skill>> {
        self.skills.borrow().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.skills.borrow().contains(id)
    }

    /// Ordered copy of the skill memory, oldest first.
    pub fn skills(&self) -> Vec<Entry<Skill>> {
        self.skills.borrow().snapshot()
    }
}
