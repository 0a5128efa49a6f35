//! Enemy records, templates and the registry that owns them.

use std::fmt;

use crate::config::GameConfig;
use crate::error::{DefinitionError, validate_identity};

// ============================================================================
// Identifiers
// ============================================================================

/// Registry-assigned enemy identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EnemyId(pub u32);

impl EnemyId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

/// Open-ended attack category chosen by the host (`sword`, `fire`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AttackType(String);

impl AttackType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttackType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// ============================================================================
// Templates
// ============================================================================

/// Spawnable enemy archetype (`slime`, `skeleton`, ...).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub kind: String,
    pub name: String,
    /// Sprite frame used by the presentation layer.
    #[cfg_attr(feature = "serde", serde(default))]
    pub frame: u32,
    #[cfg_attr(
        feature = "serde",
        serde(default = "EnemyTemplate::default_max_health")
    )]
    pub max_health: f64,
    #[cfg_attr(feature = "serde", serde(default = "EnemyTemplate::default_damage"))]
    pub damage: f64,
    #[cfg_attr(feature = "serde", serde(default = "EnemyTemplate::default_speed"))]
    pub speed: f64,
}

impl EnemyTemplate {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            frame: 0,
            max_health: Self::default_max_health(),
            damage: Self::default_damage(),
            speed: Self::default_speed(),
        }
    }

    pub fn with_max_health(mut self, max_health: f64) -> Self {
        self.max_health = max_health;
        self
    }

    pub fn validate(&self) -> Result<(), DefinitionError> {
        validate_identity("enemy", &self.kind, &self.name)?;
        if !self.max_health.is_finite() || self.max_health <= 0.0 {
            return Err(DefinitionError::InvalidHealth {
                id: self.kind.clone(),
                max_health: self.max_health,
            });
        }
        Ok(())
    }

    fn default_max_health() -> f64 {
        GameConfig::DEFAULT_ENEMY_HEALTH
    }

    fn default_damage() -> f64 {
        GameConfig::DEFAULT_ENEMY_DAMAGE
    }

    fn default_speed() -> f64 {
        GameConfig::DEFAULT_ENEMY_SPEED
    }
}

// ============================================================================
// Enemy
// ============================================================================

/// A live enemy.
///
/// Resistances start absent (treated as 0), only ever increase, and are kept
/// in the order they were first acquired.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: String,
    pub name: String,
    pub frame: u32,
    pub health: f64,
    pub max_health: f64,
    pub damage: f64,
    pub speed: f64,
    resistances: Vec<(AttackType, f64)>,
}

/// One row of [`Enemy::resistance_stats`].
#[derive(Clone, Debug, PartialEq)]
pub struct ResistanceReport {
    pub attack: AttackType,
    pub resistance: f64,
}

impl ResistanceReport {
    pub fn percentage(&self) -> f64 {
        self.resistance * 100.0
    }
}

impl Enemy {
    fn from_template(id: EnemyId, template: &EnemyTemplate) -> Self {
        Self {
            id,
            kind: template.kind.clone(),
            name: template.name.clone(),
            frame: template.frame,
            health: template.max_health,
            max_health: template.max_health,
            damage: template.damage,
            speed: template.speed,
            resistances: Vec::new(),
        }
    }

    /// Resistance to `attack`, 0 when never adapted.
    pub fn resistance(&self, attack: &AttackType) -> f64 {
        self.resistances
            .iter()
            .find(|(known, _)| known == attack)
            .map_or(0.0, |(_, value)| *value)
    }

    pub fn resistance_stats(&self) -> Vec<ResistanceReport> {
        self.resistances
            .iter()
            .map(|(attack, resistance)| ResistanceReport {
                attack: attack.clone(),
                resistance: *resistance,
            })
            .collect()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Raises the resistance to `attack` by `step`, clamped to `[0, ceiling]`.
    /// A negative step never lowers it.
    pub(crate) fn adapt(&mut self, attack: &AttackType, step: f64, ceiling: f64) -> f64 {
        let index = match self.resistances.iter().position(|(known, _)| known == attack) {
            Some(index) => index,
            None => {
                self.resistances.push((attack.clone(), 0.0));
                self.resistances.len() - 1
            }
        };
        let slot = &mut self.resistances[index].1;
        *slot = (*slot + step.max(0.0)).clamp(0.0, ceiling.max(0.0));
        *slot
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Owns every live enemy, in spawn order.
#[derive(Clone, Debug, Default)]
pub struct EnemyRegistry {
    next_id: u32,
    enemies: Vec<Enemy>,
}

impl EnemyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a fresh enemy from a validated template.
    pub fn spawn(&mut self, template: &EnemyTemplate) -> Result<&Enemy, DefinitionError> {
        template.validate()?;
        self.next_id += 1;
        let id = EnemyId(self.next_id);
        self.enemies.push(Enemy::from_template(id, template));
        Ok(&self.enemies[self.enemies.len() - 1])
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    pub fn remove(&mut self, id: EnemyId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|enemy| enemy.id == id)?;
        Some(self.enemies.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}
