//! Scripted host input.
//!
//! A scenario is an ordered list of host commands, the same calls a game loop
//! would make in response to pickups, button presses and hits. Replaying one
//! against a [`Session`] drives the engine headlessly; expectation steps turn a
//! scenario into an end-to-end check.
//!
//! ```ron
//! (
//!     name: "pickup",
//!     steps: [
//!         AddItem(id: "torch"),
//!         Repeat(times: 3, step: UseItem(id: "torch")),
//!         ExpectInventory(ids: ["torch"]),
//!     ],
//! )
//! ```

use std::path::Path;

use hunter_content::ContentCatalog;
use hunter_core::{AttackType, EnemyId, SkillContext};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};
use crate::session::Session;

/// One host call, with content referenced by catalog id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HostCommand {
    AddItem {
        id: String,
    },
    UseItem {
        id: String,
    },
    WearItem {
        id: String,
    },
    RepairItem {
        id: String,
        amount: u32,
    },
    LearnSkill {
        id: String,
    },
    UseSkill {
        id: String,
        #[serde(default)]
        now_ms: u64,
        #[serde(default)]
        target: Option<u32>,
    },
    AddResource {
        id: String,
        quantity: u32,
        #[serde(default)]
        name: Option<String>,
    },
    UseResource {
        id: String,
        #[serde(default = "HostCommand::single")]
        amount: u32,
    },
    RegenerateResource {
        id: String,
        amount: u32,
    },
    SpawnEnemy {
        kind: String,
    },
    RegisterAttack {
        attack: String,
        damage: f64,
    },
    /// Targets an enemy by its spawn-order id (first spawn is 1).
    ResolveDamage {
        enemy: u32,
        attack: String,
        damage: f64,
    },
    Repeat {
        times: u32,
        step: Box<HostCommand>,
    },
    /// Fails the replay unless the inventory holds exactly these ids, in order.
    ExpectInventory {
        ids: Vec<String>,
    },
    /// Fails the replay unless skill memory holds exactly these ids, in order.
    ExpectSkills {
        ids: Vec<String>,
    },
}

impl HostCommand {
    fn single() -> u32 {
        1
    }

    /// Performs a single host call against `session`, resolving content
    /// through `catalog`. Repeat and expectation steps never reach here; the
    /// replay loop expands and checks them.
    fn apply(&self, session: &Session, catalog: &ContentCatalog) -> Result<()> {
        match self {
            Self::AddItem { id } => {
                let item = catalog
                    .item(id)
                    .ok_or_else(|| unknown("item", id))??;
                session.add_item(item)
            }
            Self::UseItem { id } => session.use_item(id).map(drop),
            Self::WearItem { id } => session.wear_item(id).map(drop),
            Self::RepairItem { id, amount } => session.repair_item(id, *amount).map(drop),
            Self::LearnSkill { id } => {
                let skill = catalog
                    .skill(id)
                    .ok_or_else(|| unknown("skill", id))??;
                session.learn_skill(skill)
            }
            Self::UseSkill { id, now_ms, target } => {
                let mut context = SkillContext::at(*now_ms);
                if let Some(target) = target {
                    context = context.with_target(EnemyId::new(*target));
                }
                session.use_skill(id, &context).map(drop)
            }
            Self::AddResource { id, quantity, name } => {
                session.add_resource(id, *quantity, name.clone())
            }
            Self::UseResource { id, amount } => session.use_resource(id, *amount).map(drop),
            Self::RegenerateResource { id, amount } => session.regenerate_resource(id, *amount),
            Self::SpawnEnemy { kind } => {
                let template = catalog
                    .enemy_template(kind)
                    .ok_or_else(|| unknown("enemy", kind))?;
                session.spawn_enemy(template).map(drop)
            }
            Self::RegisterAttack { attack, damage } => session
                .register_attack(&AttackType::new(attack.as_str()), *damage)
                .map(drop),
            Self::ResolveDamage {
                enemy,
                attack,
                damage,
            } => session
                .resolve_damage(EnemyId::new(*enemy), &AttackType::new(attack.as_str()), *damage)
                .map(drop),
            Self::Repeat { .. } | Self::ExpectInventory { .. } | Self::ExpectSkills { .. } => {
                Ok(())
            }
        }
    }
}

fn unknown(kind: &'static str, id: &str) -> RuntimeError {
    RuntimeError::UnknownContent {
        kind,
        id: id.to_string(),
    }
}

/// Counts from a completed replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Commands the engine accepted.
    pub applied: usize,
    /// Commands the engine refused; each left the session untouched.
    pub rejected: usize,
}

/// Named list of host commands loaded from RON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<HostCommand>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, steps: Vec<HostCommand>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            steps,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RuntimeError::ScenarioLoad {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Self::parse(&content).map_err(|e| RuntimeError::ScenarioLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }

    /// Runs every step in order.
    ///
    /// Engine rejections are logged and counted, and replay continues. Unknown
    /// content and failed expectations abort the replay.
    pub fn replay(&self, session: &Session, catalog: &ContentCatalog) -> Result<ReplayReport> {
        tracing::info!("Replaying scenario '{}' ({} steps)", self.name, self.steps.len());

        let mut report = ReplayReport::default();
        for (index, step) in self.steps.iter().enumerate() {
            self.run_step(index + 1, step, session, catalog, &mut report)?;
        }

        tracing::info!(
            "Scenario '{}' finished: {} applied, {} rejected",
            self.name,
            report.applied,
            report.rejected
        );
        Ok(report)
    }

    fn run_step(
        &self,
        number: usize,
        step: &HostCommand,
        session: &Session,
        catalog: &ContentCatalog,
        report: &mut ReplayReport,
    ) -> Result<()> {
        match step {
            HostCommand::Repeat { times, step } => {
                for _ in 0..*times {
                    self.run_step(number, step, session, catalog, report)?;
                }
                Ok(())
            }
            HostCommand::ExpectInventory { ids } => self.expect(
                number,
                ids,
                session.inventory_snapshot().iter().map(|entry| entry.id()),
            ),
            HostCommand::ExpectSkills { ids } => self.expect(
                number,
                ids,
                session.skill_snapshot().iter().map(|entry| entry.id()),
            ),
            command => match command.apply(session, catalog) {
                Ok(()) => {
                    report.applied += 1;
                    Ok(())
                }
                Err(err) if err.is_rejection() => {
                    tracing::warn!("Step {} rejected ({:?}): {}", number, command, err);
                    report.rejected += 1;
                    Ok(())
                }
                Err(err) => Err(err),
            },
        }
    }

    fn expect<'a>(
        &self,
        number: usize,
        expected: &[String],
        actual: impl Iterator<Item = &'a str>,
    ) -> Result<()> {
        let actual: Vec<String> = actual.map(str::to_string).collect();
        if actual == expected {
            return Ok(());
        }
        Err(RuntimeError::ExpectationFailed {
            scenario: self.name.clone(),
            step: number,
            expected: expected.to_vec(),
            actual,
        })
    }
}
