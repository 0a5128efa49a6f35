//! Logs engine events and the end-of-run state.

use hunter_core::{EventKind, GameEvent};
use hunter_runtime::{ReplayReport, Session};
use strum::IntoEnumIterator;

/// Subscribes a logger to every event kind.
pub fn log_all_events(session: &Session) {
    for kind in EventKind::iter() {
        session.subscribe(kind, |event| {
            tracing::info!(target: "hunter::events", "{:<18} {}", event.kind(), describe(event));
        });
    }
}

/// One-line, human-readable rendering of an event payload.
pub fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::ItemAdded(entry) | GameEvent::ItemRemoved(entry) | GameEvent::ItemUsed(entry) => {
            format!("{} (uses {})", entry.id(), entry.use_count())
        }
        GameEvent::SkillLearned(entry) | GameEvent::SkillForgotten(entry) => format!(
            "{} (uses {}, mastery {})",
            entry.id(),
            entry.use_count(),
            entry.payload().mastery()
        ),
        GameEvent::SkillUsed {
            skill,
            effectiveness,
        } => format!(
            "{} (uses {}, mastery {}, effectiveness {:.1})",
            skill.id(),
            skill.use_count(),
            skill.payload().mastery(),
            effectiveness
        ),
        GameEvent::ResourceAdded(record) | GameEvent::ResourceDepleted(record) => {
            format!("{} (quantity {})", record.id, record.quantity)
        }
        GameEvent::ResourceUsed { record, amount } => format!(
            "{} -{} (quantity {}, depletion {}%)",
            record.id, amount, record.quantity, record.depletion
        ),
        GameEvent::AttackRegistered {
            attack,
            stat,
            most_frequent,
        } => format!(
            "{} (uses {}, avg {:.1}, favourite {})",
            attack,
            stat.uses,
            stat.average_damage(),
            most_frequent.as_ref().map_or("none", |attack| attack.as_str())
        ),
        GameEvent::ResistanceAdapted {
            enemy,
            attack,
            resistance,
        } => format!("{} resists {} {:.0}%", enemy, attack, resistance * 100.0),
        GameEvent::EnemySpawned(enemy) | GameEvent::EnemyDefeated(enemy) => {
            format!("{} {} (health {:.1})", enemy.id, enemy.kind, enemy.health)
        }
        GameEvent::EnemyDamaged {
            enemy,
            attack,
            damage,
            health,
        } => format!("{} took {:.1} {} (health {:.1})", enemy, damage, attack, health),
    }
}

pub fn log_summary(session: &Session, report: &ReplayReport) {
    tracing::info!(
        "Replay done: {} commands applied, {} rejected",
        report.applied,
        report.rejected
    );

    for entry in session.inventory_snapshot() {
        let item = entry.payload();
        tracing::info!(
            "  item  {:<16} uses {:>3}  wear {:>5.1}%",
            entry.id(),
            entry.use_count(),
            item.wear_percentage()
        );
    }
    for entry in session.skill_snapshot() {
        tracing::info!(
            "  skill {:<16} uses {:>3}  mastery {:>3}",
            entry.id(),
            entry.use_count(),
            entry.payload().mastery()
        );
    }
    for record in session.resource_snapshot() {
        tracing::info!(
            "  resource {:<13} qty {:>3}  efficiency {:.2}",
            record.id,
            record.quantity,
            record.efficiency()
        );
    }
    for enemy in session.enemies() {
        let resistances: Vec<String> = enemy
            .resistance_stats()
            .iter()
            .map(|report| format!("{} {:.1}%", report.attack, report.percentage()))
            .collect();
        tracing::info!(
            "  enemy {} {:<10} health {:>5.1}/{:<5.1} resists [{}]",
            enemy.id,
            enemy.kind,
            enemy.health,
            enemy.max_health,
            resistances.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunter_core::{AttackStat, AttackType, EnemyId};

    #[test]
    fn describes_combat_events() {
        let event = GameEvent::AttackRegistered {
            attack: AttackType::new("sword"),
            stat: AttackStat {
                uses: 2,
                total_damage: 30.0,
            },
            most_frequent: None,
        };
        assert_eq!(describe(&event), "sword (uses 2, avg 15.0, favourite none)");

        let event = GameEvent::ResistanceAdapted {
            enemy: EnemyId::new(3),
            attack: AttackType::new("fire"),
            resistance: 0.25,
        };
        assert_eq!(describe(&event), "enemy#3 resists fire 25%");
    }
}
