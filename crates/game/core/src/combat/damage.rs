//! Resistance-aware damage resolution.

use super::enemy::{AttackType, Enemy, EnemyId, EnemyRegistry};
use super::CombatError;

/// Result of [`resolve_damage`].
#[derive(Clone, Debug, PartialEq)]
pub struct DamageOutcome {
    /// Damage actually applied after resistance.
    pub damage: f64,
    /// Remaining health. May be negative on the killing blow.
    pub health: f64,
    /// The removed enemy when this hit killed it.
    pub defeated: Option<Enemy>,
}

/// Applies `base_damage` reduced by the enemy's resistance to `attack`.
///
/// ```text
/// actual = base_damage * (1 - resistance)
/// ```
///
/// An enemy whose health drops to 0 or below is removed from the registry.
pub fn resolve_damage(
    enemies: &mut EnemyRegistry,
    enemy: EnemyId,
    attack: &AttackType,
    base_damage: f64,
) -> Result<DamageOutcome, CombatError> {
    validate_damage(base_damage)?;

    let target = enemies
        .get_mut(enemy)
        .ok_or(CombatError::EnemyNotFound { id: enemy })?;
    let damage = base_damage * (1.0 - target.resistance(attack));
    target.health -= damage;
    let health = target.health;

    let defeated = if health <= 0.0 {
        enemies.remove(enemy)
    } else {
        None
    };

    Ok(DamageOutcome {
        damage,
        health,
        defeated,
    })
}

pub(crate) fn validate_damage(damage: f64) -> Result<(), CombatError> {
    if damage.is_finite() && damage >= 0.0 {
        Ok(())
    } else {
        Err(CombatError::InvalidDamage { damage })
    }
}
