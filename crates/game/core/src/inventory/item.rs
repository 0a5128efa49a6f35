//! Item definitions and the item's own wear model.

use crate::error::{DefinitionError, ErrorSeverity, GameError, validate_identity};

/// Static description of an item as it appears in content catalogs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Sprite frame used by the presentation layer.
    #[cfg_attr(feature = "serde", serde(default))]
    pub frame: u32,
    /// Uses before the item breaks. `None` means unbreakable.
    #[cfg_attr(feature = "serde", serde(default))]
    pub durability: Option<u32>,
}

impl ItemDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            frame: 0,
            durability: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_frame(mut self, frame: u32) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_durability(mut self, durability: u32) -> Self {
        self.durability = Some(durability);
        self
    }
}

/// Errors from the item's own wear model.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("item '{id}' is broken after {durability} uses")]
    Broken { id: String, durability: u32 },

    #[error("item '{id}' is not in the inventory")]
    NotHeld { id: String },
}

impl GameError for ItemError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Broken { .. } => "ITEM_BROKEN",
            Self::NotHeld { .. } => "ITEM_NOT_HELD",
        }
    }
}

/// A validated item.
///
/// The item keeps its own wear counter, separate from the inventory's MFU
/// counter. Wear is the only counter in the engine that may go down, and only
/// through [`Item::repair`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    definition: ItemDefinition,
    wear: u32,
}

impl Item {
    pub fn new(definition: ItemDefinition) -> Result<Self, DefinitionError> {
        validate_identity("item", &definition.id, &definition.name)?;
        if definition.durability == Some(0) {
            return Err(DefinitionError::ZeroDurability { id: definition.id });
        }

        Ok(Self {
            definition,
            wear: 0,
        })
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn description(&self) -> &str {
        &self.definition.description
    }

    pub fn frame(&self) -> u32 {
        self.definition.frame
    }

    pub fn durability(&self) -> Option<u32> {
        self.definition.durability
    }

    pub fn definition(&self) -> &ItemDefinition {
        &self.definition
    }

    /// Uses consumed from the item's durability.
    pub fn wear(&self) -> u32 {
        self.wear
    }

    pub fn is_broken(&self) -> bool {
        self.definition
            .durability
            .is_some_and(|durability| self.wear >= durability)
    }

    /// Wear as a percentage of durability, 0 for unbreakable items.
    pub fn wear_percentage(&self) -> f64 {
        match self.definition.durability {
            Some(durability) => (f64::from(self.wear) / f64::from(durability) * 100.0).min(100.0),
            None => 0.0,
        }
    }

    /// Consumes one use of durability. Fails without change once broken.
    pub fn apply_wear(&mut self) -> Result<u32, ItemError> {
        if let Some(durability) = self.definition.durability
            && self.wear >= durability
        {
            return Err(ItemError::Broken {
                id: self.definition.id.clone(),
                durability,
            });
        }

        self.wear += 1;
        tracing::debug!(
            "Item {} worn ({}/{:?})",
            self.definition.id,
            self.wear,
            self.definition.durability
        );
        Ok(self.wear)
    }

    /// Rolls wear back by `amount`, saturating at zero.
    pub fn repair(&mut self, amount: u32) {
        self.wear = self.wear.saturating_sub(amount);
        tracing::debug!("Item {} repaired, wear now {}", self.definition.id, self.wear);
    }
}
