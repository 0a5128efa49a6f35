use std::cell::RefCell;

use crate::config::{ConfigError, GameConfig};
use crate::events::{EventBus, GameEvent};

use super::adaptation::{AdaptiveResistanceTracker, AttackStat};
use super::damage::{resolve_damage, validate_damage};
use super::enemy::{AttackType, Enemy, EnemyId, EnemyRegistry, EnemyTemplate, ResistanceReport};
use super::CombatError;

#[derive(Debug)]
struct CombatState {
    enemies: EnemyRegistry,
    tracker: AdaptiveResistanceTracker,
}

/// Binds the enemy registry and the resistance tracker to the event bus.
///
/// Borrow discipline matches the collection managers: all state changes for a
/// call complete before the first event is emitted.
#[derive(Debug)]
pub struct CombatManager {
    state: RefCell<CombatState>,
    bus: EventBus,
}

impl CombatManager {
    /// Fails when the config's adaptation rate or resistance ceiling is out of range.
    pub fn new(config: &GameConfig, bus: EventBus) -> Result<Self, ConfigError> {
        Ok(Self {
            state: RefCell::new(CombatState {
                enemies: EnemyRegistry::new(),
                tracker: AdaptiveResistanceTracker::from_config(config)?,
            }),
            bus,
        })
    }

    /// Spawns an enemy and emits `EnemySpawned`.
    pub fn spawn_enemy(&self, template: &EnemyTemplate) -> Result<EnemyId, CombatError> {
        let enemy = self.state.borrow_mut().enemies.spawn(template)?.clone();
        let id = enemy.id;
        tracing::debug!("Enemy spawned: {} {}", id, enemy.kind);
        self.bus.emit(GameEvent::EnemySpawned(enemy));
        Ok(id)
    }

    /// Records a player attack and adapts every enemy to the most frequent one.
    ///
    /// Emits `AttackRegistered`, then one `ResistanceAdapted` per enemy.
    pub fn register_attack(
        &self,
        attack: &AttackType,
        damage: f64,
    ) -> Result<Option<AttackType>, CombatError> {
        validate_damage(damage)?;

        let adaptation = {
            let mut state = self.state.borrow_mut();
            let CombatState { enemies, tracker } = &mut *state;
            tracker.register_attack(attack, damage, enemies)
        };

        tracing::debug!("Attack registered: {} ({} uses)", attack, adaptation.stat.uses);
        self.bus.emit(GameEvent::AttackRegistered {
            attack: attack.clone(),
            stat: adaptation.stat,
            most_frequent: adaptation.most_frequent.clone(),
        });

        if let Some(target) = &adaptation.most_frequent {
            if !adaptation.adapted.is_empty() {
                tracing::info!(
                    "{} enemies adapted against {}",
                    adaptation.adapted.len(),
                    target
                );
            }
            for (enemy, resistance) in &adaptation.adapted {
                self.bus.emit(GameEvent::ResistanceAdapted {
                    enemy: *enemy,
                    attack: target.clone(),
                    resistance: *resistance,
                });
            }
        }

        Ok(adaptation.most_frequent)
    }

    /// Applies resisted damage and returns the amount actually dealt.
    ///
    /// Emits `EnemyDamaged`, then `EnemyDefeated` when the hit was lethal.
    pub fn resolve_damage(
        &self,
        enemy: EnemyId,
        attack: &AttackType,
        base_damage: f64,
    ) -> Result<f64, CombatError> {
        let outcome = resolve_damage(
            &mut self.state.borrow_mut().enemies,
            enemy,
            attack,
            base_damage,
        )?;

        tracing::debug!(
            "Damage to {}: {:.1} ({} health left)",
            enemy,
            outcome.damage,
            outcome.health
        );
        self.bus.emit(GameEvent::EnemyDamaged {
            enemy,
            attack: attack.clone(),
            damage: outcome.damage,
            health: outcome.health,
        });

        if let Some(defeated) = outcome.defeated {
            tracing::info!("Enemy {} {} defeated", defeated.id, defeated.kind);
            self.bus.emit(GameEvent::EnemyDefeated(defeated));
        }

        Ok(outcome.damage)
    }

    pub fn enemy(&self, id: EnemyId) -> Option<Enemy> {
        self.state.borrow().enemies.get(id).cloned()
    }

    /// Every live enemy, in spawn order.
    pub fn enemies(&self) -> Vec<Enemy> {
        self.state.borrow().enemies.iter().cloned().collect()
    }

    pub fn resistance_stats(&self, id: EnemyId) -> Option<Vec<ResistanceReport>> {
        self.state
            .borrow()
            .enemies
            .get(id)
            .map(Enemy::resistance_stats)
    }

    pub fn attack_stats(&self) -> Vec<(AttackType, AttackStat)> {
        self.state.borrow().tracker.attack_stats().to_vec()
    }

    pub fn most_frequent_attack(&self) -> Option<AttackType> {
        self.state.borrow().tracker.most_frequent_attack().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::rc::Rc;

    fn manager() -> (CombatManager, EventBus) {
        let bus = EventBus::new();
        (CombatManager::new(&GameConfig::default(), bus.clone()).unwrap(), bus)
    }

    fn record_all(bus: &EventBus) -> Rc<RefCell<Vec<EventKind>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for kind in [
            EventKind::EnemySpawned,
            EventKind::AttackRegistered,
            EventKind::ResistanceAdapted,
            EventKind::EnemyDamaged,
            EventKind::EnemyDefeated,
        ] {
            let log = Rc::clone(&log);
            bus.subscribe(kind, move |event| log.borrow_mut().push(event.kind()));
        }
        log
    }

    #[test]
    fn attack_events_follow_registration() {
        let (combat, bus) = manager();
        let log = record_all(&bus);
        combat.spawn_enemy(&EnemyTemplate::new("slime", "Slime")).unwrap();
        combat.spawn_enemy(&EnemyTemplate::new("orc", "Orc")).unwrap();

        let sword = AttackType::new("sword");
        assert_eq!(combat.register_attack(&sword, 10.0), Ok(Some(sword.clone())));
        assert_eq!(
            *log.borrow(),
            vec![
                EventKind::EnemySpawned,
                EventKind::EnemySpawned,
                EventKind::AttackRegistered,
                EventKind::ResistanceAdapted,
                EventKind::ResistanceAdapted,
            ]
        );
    }

    #[test]
    fn adapted_enemy_takes_less_damage_until_defeated() {
        let (combat, bus) = manager();
        let id = combat.spawn_enemy(&EnemyTemplate::new("slime", "Slime")).unwrap();
        let sword = AttackType::new("sword");
        for _ in 0..20 {
            combat.register_attack(&sword, 10.0).unwrap();
        }

        let log = record_all(&bus);
        let dealt = combat.resolve_damage(id, &sword, 100.0).unwrap();
        assert!((dealt - 20.0).abs() < 1e-9);
        assert!(combat.enemy(id).is_some());

        combat.resolve_damage(id, &"fire".into(), 100.0).unwrap();
        assert!(combat.enemy(id).is_none());
        assert_eq!(
            *log.borrow(),
            vec![
                EventKind::EnemyDamaged,
                EventKind::EnemyDamaged,
                EventKind::EnemyDefeated,
            ]
        );
    }

    #[test]
    fn invalid_damage_records_nothing() {
        let (combat, bus) = manager();
        let log = record_all(&bus);

        assert!(matches!(
            combat.register_attack(&"sword".into(), f64::NAN),
            Err(CombatError::InvalidDamage { .. })
        ));
        assert!(combat.attack_stats().is_empty());
        assert!(combat.most_frequent_attack().is_none());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn defeated_listener_may_spawn_replacement() {
        let (combat, bus) = manager();
        let combat = Rc::new(combat);
        let id = combat
            .spawn_enemy(&EnemyTemplate::new("goblin", "Goblin").with_max_health(1.0))
            .unwrap();

        let weak = Rc::downgrade(&combat);
        bus.subscribe_once(EventKind::EnemyDefeated, move |_| {
            if let Some(combat) = weak.upgrade() {
                combat
                    .spawn_enemy(&EnemyTemplate::new("demon", "Demon"))
                    .unwrap();
            }
        });

        combat.resolve_damage(id, &"bow".into(), 5.0).unwrap();
        let enemies = combat.enemies();
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].kind, "demon");
        assert!(combat.resistance_stats(enemies[0].id).unwrap().is_empty());
    }

    #[test]
    fn out_of_range_adaptation_config_is_rejected() {
        let healing = GameConfig {
            adaptation_rate: -0.05,
            max_resistance: 1.5,
            ..GameConfig::default()
        };
        assert!(matches!(
            CombatManager::new(&healing, EventBus::new()),
            Err(ConfigError::RatioOutOfRange { .. })
        ));

        let amplifying = GameConfig {
            max_resistance: 1.5,
            ..GameConfig::default()
        };
        assert!(CombatManager::new(&amplifying, EventBus::new()).is_err());
    }

    #[test]
    fn adapted_damage_stays_within_base() {
        let config = GameConfig {
            adaptation_rate: 1.0,
            max_resistance: 1.0,
            ..GameConfig::default()
        };
        let combat = CombatManager::new(&config, EventBus::new()).unwrap();
        let id = combat.spawn_enemy(&EnemyTemplate::new("slime", "Slime")).unwrap();
        let sword = AttackType::new("sword");
        for _ in 0..3 {
            combat.register_attack(&sword, 10.0).unwrap();
        }

        assert_eq!(combat.resolve_damage(id, &sword, 10.0), Ok(0.0));
        assert_eq!(combat.enemy(id).unwrap().health, 100.0);
    }
}
