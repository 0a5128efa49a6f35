//! Frequency histogram over the player's attacks and the resistance feedback
//! it drives into every tracked enemy.

use crate::collection::most_frequent_index;
use crate::config::{ConfigError, GameConfig};

use super::enemy::{AttackType, EnemyId, EnemyRegistry};

/// Cumulative usage of one attack type.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackStat {
    pub uses: u32,
    pub total_damage: f64,
}

impl AttackStat {
    /// Mean damage per use, 0 before the first use.
    pub fn average_damage(&self) -> f64 {
        if self.uses == 0 {
            0.0
        } else {
            self.total_damage / f64::from(self.uses)
        }
    }
}

/// Outcome of [`AdaptiveResistanceTracker::register_attack`].
#[derive(Clone, Debug, PartialEq)]
pub struct Adaptation {
    /// Updated stat for the registered attack.
    pub stat: AttackStat,
    pub most_frequent: Option<AttackType>,
    /// New resistance of every enemy that adapted, in registry order.
    pub adapted: Vec<(EnemyId, f64)>,
}

/// Tracks the player's attack mix and hardens enemies against its most
/// frequent entry.
///
/// Stats are kept in first-use order; the most frequent attack is picked with
/// the same strict-greater, earliest-wins scan as collection eviction.
#[derive(Clone, Debug)]
pub struct AdaptiveResistanceTracker {
    adaptation_rate: f64,
    max_resistance: f64,
    stats: Vec<(AttackType, AttackStat)>,
}

impl Default for AdaptiveResistanceTracker {
    fn default() -> Self {
        Self {
            adaptation_rate: GameConfig::DEFAULT_ADAPTATION_RATE,
            max_resistance: GameConfig::DEFAULT_MAX_RESISTANCE,
            stats: Vec::new(),
        }
    }
}

impl AdaptiveResistanceTracker {
    /// Fails unless both values lie in `[0, 1]`.
    pub fn new(adaptation_rate: f64, max_resistance: f64) -> Result<Self, ConfigError> {
        GameConfig::validate_adaptation(adaptation_rate, max_resistance)?;
        Ok(Self {
            adaptation_rate,
            max_resistance,
            stats: Vec::new(),
        })
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::new(config.adaptation_rate, config.max_resistance)
    }

    pub fn adaptation_rate(&self) -> f64 {
        self.adaptation_rate
    }

    pub fn max_resistance(&self) -> f64 {
        self.max_resistance
    }

    /// Records one attack, then raises every enemy's resistance to the most
    /// frequent attack type.
    ///
    /// `damage` is trusted here; callers validate it.
    pub fn register_attack(
        &mut self,
        attack: &AttackType,
        damage: f64,
        enemies: &mut EnemyRegistry,
    ) -> Adaptation {
        let index = match self.stats.iter().position(|(known, _)| known == attack) {
            Some(index) => index,
            None => {
                self.stats.push((attack.clone(), AttackStat::default()));
                self.stats.len() - 1
            }
        };
        let stat = &mut self.stats[index].1;
        stat.uses = stat.uses.saturating_add(1);
        stat.total_damage += damage;
        let stat = *stat;

        let most_frequent = self.most_frequent_attack().cloned();
        let adapted = match &most_frequent {
            Some(target) => enemies
                .iter_mut()
                .map(|enemy| {
                    let resistance = enemy.adapt(target, self.adaptation_rate, self.max_resistance);
                    (enemy.id, resistance)
                })
                .collect(),
            None => Vec::new(),
        };

        Adaptation {
            stat,
            most_frequent,
            adapted,
        }
    }

    pub fn most_frequent_attack(&self) -> Option<&AttackType> {
        most_frequent_index(self.stats.iter().map(|(_, stat)| stat.uses))
            .map(|index| &self.stats[index].0)
    }

    pub fn stat(&self, attack: &AttackType) -> Option<AttackStat> {
        self.stats
            .iter()
            .find(|(known, _)| known == attack)
            .map(|(_, stat)| *stat)
    }

    /// Every attack stat in first-use order.
    pub fn attack_stats(&self) -> &[(AttackType, AttackStat)] {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::EnemyTemplate;

    #[test]
    fn twenty_attacks_clamp_resistance_at_ceiling() {
        let mut registry = EnemyRegistry::new();
        registry.spawn(&EnemyTemplate::new("slime", "Slime")).unwrap();
        registry.spawn(&EnemyTemplate::new("orc", "Orc")).unwrap();
        let mut tracker = AdaptiveResistanceTracker::default();
        let sword = AttackType::new("sword");

        for _ in 0..20 {
            tracker.register_attack(&sword, 12.0, &mut registry);
        }

        for enemy in registry.iter() {
            assert_eq!(enemy.resistance(&sword), 0.8);
        }
        let stat = tracker.stat(&sword).unwrap();
        assert_eq!(stat.uses, 20);
        assert_eq!(stat.average_damage(), 12.0);
    }

    #[test]
    fn ties_adapt_to_first_seen_attack() {
        let mut registry = EnemyRegistry::new();
        let id = registry.spawn(&EnemyTemplate::new("goblin", "Goblin")).unwrap().id;
        let mut tracker = AdaptiveResistanceTracker::default();
        let (bow, axe) = (AttackType::new("bow"), AttackType::new("axe"));

        tracker.register_attack(&bow, 5.0, &mut registry);
        let adaptation = tracker.register_attack(&axe, 5.0, &mut registry);

        assert_eq!(adaptation.most_frequent, Some(bow.clone()));
        assert_eq!(adaptation.adapted, vec![(id, 0.1)]);
        assert_eq!(registry.get(id).unwrap().resistance(&axe), 0.0);

        let adaptation = tracker.register_attack(&axe, 5.0, &mut registry);
        assert_eq!(adaptation.most_frequent, Some(axe.clone()));
        assert_eq!(adaptation.stat.uses, 2);
    }

    #[test]
    fn no_enemies_still_records_stats() {
        let mut registry = EnemyRegistry::new();
        let mut tracker = AdaptiveResistanceTracker::new(0.1, 0.5).unwrap();
        let adaptation = tracker.register_attack(&"fire".into(), 8.0, &mut registry);

        assert!(adaptation.adapted.is_empty());
        assert_eq!(tracker.attack_stats().len(), 1);
        assert_eq!(AttackStat::default().average_damage(), 0.0);
    }

    #[test]
    fn out_of_range_knobs_are_rejected() {
        assert!(matches!(
            AdaptiveResistanceTracker::new(-0.05, 0.8),
            Err(ConfigError::RatioOutOfRange {
                field: "adaptation_rate",
                ..
            })
        ));
        assert!(matches!(
            AdaptiveResistanceTracker::new(0.05, 1.5),
            Err(ConfigError::RatioOutOfRange {
                field: "max_resistance",
                ..
            })
        ));
    }
}
