//! Skill definitions, mastery and the effectiveness formula.

use std::fmt;
use std::rc::Rc;

use crate::combat::EnemyId;
use crate::config::GameConfig;
use crate::error::{DefinitionError, validate_identity};

/// Host-supplied context for a skill use.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillContext {
    /// Host clock in milliseconds. Only stamped on the skill, never read from a wall clock.
    pub now_ms: u64,
    /// Enemy the skill is aimed at, if any.
    pub target: Option<EnemyId>,
}

impl SkillContext {
    pub fn at(now_ms: u64) -> Self {
        Self {
            now_ms,
            target: None,
        }
    }

    pub fn with_target(mut self, target: EnemyId) -> Self {
        self.target = Some(target);
        self
    }
}

/// Presentation-side effect run on every use with the computed effectiveness.
pub type SkillEffect = Rc<dyn Fn(&SkillContext, f64)>;

/// Static description of a skill as it appears in content catalogs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub frame: u32,
    #[cfg_attr(
        feature = "serde",
        serde(default = "SkillDefinition::default_cooldown_ms")
    )]
    pub cooldown_ms: u64,
    #[cfg_attr(
        feature = "serde",
        serde(default = "SkillDefinition::default_energy_cost")
    )]
    pub energy_cost: u32,
}

impl SkillDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            frame: 0,
            cooldown_ms: Self::default_cooldown_ms(),
            energy_cost: Self::default_energy_cost(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cooldown_ms(mut self, cooldown_ms: u64) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    pub fn with_energy_cost(mut self, energy_cost: u32) -> Self {
        self.energy_cost = energy_cost;
        self
    }

    fn default_cooldown_ms() -> u64 {
        GameConfig::DEFAULT_SKILL_COOLDOWN_MS
    }

    fn default_energy_cost() -> u32 {
        GameConfig::DEFAULT_SKILL_ENERGY_COST
    }
}

/// Effectiveness of a skill use.
///
/// `max(10, mastery - min(50, use_count / 2))`: mastery raises the ceiling,
/// repeated use drags it down, and the result never drops below 10.
pub fn effectiveness(mastery: u8, use_count: u32) -> f64 {
    let penalty = (f64::from(use_count) / 2.0).min(GameConfig::MAX_USAGE_PENALTY);
    (f64::from(mastery) - penalty).max(GameConfig::MIN_EFFECTIVENESS)
}

/// A validated, learnable skill.
#[derive(Clone)]
pub struct Skill {
    definition: SkillDefinition,
    mastery: u8,
    last_used_ms: Option<u64>,
    effect: Option<SkillEffect>,
}

impl Skill {
    pub fn new(definition: SkillDefinition) -> Result<Self, DefinitionError> {
        validate_identity("skill", &definition.id, &definition.name)?;
        Ok(Self {
            definition,
            mastery: 0,
            last_used_ms: None,
            effect: None,
        })
    }

    pub fn with_effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(&SkillContext, f64) + 'static,
    {
        self.effect = Some(Rc::new(effect));
        self
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &SkillDefinition {
        &self.definition
    }

    /// Mastery in `[0, 100]`.
    pub fn mastery(&self) -> u8 {
        self.mastery
    }

    pub fn last_used_ms(&self) -> Option<u64> {
        self.last_used_ms
    }

    pub fn is_on_cooldown(&self, now_ms: u64) -> bool {
        self.remaining_cooldown(now_ms) > 0
    }

    /// Milliseconds left before the cooldown expires; 0 if never used.
    pub fn remaining_cooldown(&self, now_ms: u64) -> u64 {
        match self.last_used_ms {
            Some(last_used) => {
                let elapsed = now_ms.saturating_sub(last_used);
                self.definition.cooldown_ms.saturating_sub(elapsed)
            }
            None => 0,
        }
    }

    pub(crate) fn effect(&self) -> Option<SkillEffect> {
        self.effect.clone()
    }

    /// Bumps mastery (clamped at 100) and stamps the use time.
    pub(crate) fn practice(&mut self, now_ms: u64) {
        self.mastery = self
            .mastery
            .saturating_add(GameConfig::MASTERY_PER_USE)
            .min(GameConfig::MAX_MASTERY);
        self.last_used_ms = Some(now_ms);
    }
}

impl fmt::Debug for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skill")
            .field("definition", &self.definition)
            .field("mastery", &self.mastery)
            .field("last_used_ms", &self.last_used_ms)
            .field("has_effect", &self.effect.is_some())
            .finish()
    }
}

impl PartialEq for Skill {
    fn eq(&self, other: &Self) -> bool {
        self.definition == other.definition
            && self.mastery == other.mastery
            && self.last_used_ms == other.last_used_ms
    }
}
