//! Host-facing facade over one engine instance.

use hunter_content::ContentCatalog;
use hunter_core::{
    AttackStat, AttackType, CombatManager, Consumption, Enemy, EnemyId, EnemyTemplate, Entry,
    EventBus, EventKind, GameConfig, GameEvent, InventoryManager, Item, ResistanceReport,
    ResourceRecord, ResourceStore, Skill, SkillContext, SkillManager, Subscription,
};

use crate::error::{Result, RuntimeError};

/// Composition root: one shared bus and every manager wired to it.
///
/// Mutating calls return `Ok` on success and an error that leaves the session
/// untouched otherwise. Observers learn about changes only through
/// [`Session::subscribe`].
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    bus: EventBus,
    inventory: InventoryManager,
    skills: SkillManager,
    resources: ResourceStore,
    combat: CombatManager,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate().map_err(RuntimeError::Config)?;

        let bus = EventBus::new();
        let session = Self {
            inventory: InventoryManager::new(config.inventory_capacity, bus.clone())?,
            skills: SkillManager::new(config.skill_capacity, bus.clone())?,
            resources: ResourceStore::new(bus.clone()),
            combat: CombatManager::new(&config, bus.clone())
                .map_err(RuntimeError::Config)?,
            bus,
            config,
        };

        tracing::info!(
            "Session ready (inventory {}, skills {}, adaptation {} up to {})",
            session.config.inventory_capacity,
            session.config.skill_capacity,
            session.config.adaptation_rate,
            session.config.max_resistance
        );
        Ok(session)
    }

    /// Builds a session tuned by the catalog's configuration.
    pub fn from_catalog(catalog: &ContentCatalog) -> Result<Self> {
        Self::new(catalog.config.clone())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    pub fn subscribe<F>(&self, kind: EventKind, listener: F) -> Subscription
    where
        F: Fn(&GameEvent) + 'static,
    {
        self.bus.subscribe(kind, listener)
    }

    pub fn subscribe_once<F>(&self, kind: EventKind, listener: F) -> Subscription
    where
        F: FnOnce(&GameEvent) + 'static,
    {
        self.bus.subscribe_once(kind, listener)
    }

    // ========================================================================
    // Inventory
    // ========================================================================

    pub fn add_item(&self, item: Item) -> Result<()> {
        Ok(self.inventory.add_item(item)?)
    }

    /// Returns the item's new use count.
    pub fn use_item(&self, id: &str) -> Result<u32> {
        Ok(self.inventory.use_item(id)?)
    }

    /// Returns the item's new wear.
    pub fn wear_item(&self, id: &str) -> Result<u32> {
        Ok(self.inventory.wear_item(id)?)
    }

    pub fn repair_item(&self, id: &str, amount: u32) -> Result<u32> {
        Ok(self.inventory.repair_item(id, amount)?)
    }

    pub fn inventory_snapshot(&self) -> Vec<Entry<Item>> {
        self.inventory.items()
    }

    pub fn inventory(&self) -> &InventoryManager {
        &self.inventory
    }

    // ========================================================================
    // Skills
    // ========================================================================

    pub fn learn_skill(&self, skill: Skill) -> Result<()> {
        Ok(self.skills.learn_skill(skill)?)
    }

    /// Returns the effectiveness of this use.
    pub fn use_skill(&self, id: &str, context: &SkillContext) -> Result<f64> {
        Ok(self.skills.use_skill(id, context)?)
    }

    pub fn skill_snapshot(&self) -> Vec<Entry<Skill>> {
        self.skills.skills()
    }

    pub fn skills(&self) -> &SkillManager {
        &self.skills
    }

    // ========================================================================
    // Resources
    // ========================================================================

    pub fn add_resource(&self, id: &str, quantity: u32, name: Option<String>) -> Result<()> {
        Ok(self.resources.add_resource(id, quantity, name)?)
    }

    pub fn use_resource(&self, id: &str, amount: u32) -> Result<Consumption> {
        Ok(self.resources.use_resource(id, amount)?)
    }

    pub fn regenerate_resource(&self, id: &str, amount: u32) -> Result<()> {
        Ok(self.resources.regenerate_resource(id, amount)?)
    }

    pub fn resource_efficiency(&self, id: &str) -> f64 {
        self.resources.efficiency(id)
    }

    pub fn resource_snapshot(&self) -> Vec<ResourceRecord> {
        self.resources.resources()
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    // ========================================================================
    // Combat
    // ========================================================================

    pub fn spawn_enemy(&self, template: &EnemyTemplate) -> Result<EnemyId> {
        Ok(self.combat.spawn_enemy(template)?)
    }

    /// Returns the attack type enemies are now adapting against.
    pub fn register_attack(&self, attack: &AttackType, damage: f64) -> Result<Option<AttackType>> {
        Ok(self.combat.register_attack(attack, damage)?)
    }

    /// Returns the damage actually dealt after resistance.
    pub fn resolve_damage(
        &self,
        enemy: EnemyId,
        attack: &AttackType,
        base_damage: f64,
    ) -> Result<f64> {
        Ok(self.combat.resolve_damage(enemy, attack, base_damage)?)
    }

    pub fn enemies(&self) -> Vec<Enemy> {
        self.combat.enemies()
    }

    pub fn enemy_resistances(&self, enemy: EnemyId) -> Option<Vec<ResistanceReport>> {
        self.combat.resistance_stats(enemy)
    }

    pub fn attack_stats(&self) -> Vec<(AttackType, AttackStat)> {
        self.combat.attack_stats()
    }

    pub fn combat(&self) -> &CombatManager {
        &self.combat
    }
}
