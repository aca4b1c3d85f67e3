use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{EventId, WarningBehavior};
use crate::error::Result;
use crate::options::WarningsConfigurationBuilder;

/// Warning dispositions loaded from JSON.
///
/// ```json
/// {
///   "default": "log",
///   "throw": ["TransactionIgnoredWarning"],
///   "ignore": [30001]
/// }
/// ```
///
/// Event ids are given by name or number. Lists are applied in the order
/// `throw`, `log`, `ignore`, so an id in several lists ends up with the
/// last one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WarningsSettings {
    pub default: Option<WarningBehavior>,
    pub throw: Vec<EventId>,
    pub log: Vec<EventId>,
    pub ignore: Vec<EventId>,
}

impl WarningsSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Apply these settings through the regular builder calls.
    pub fn apply(&self, builder: &mut WarningsConfigurationBuilder<'_>) -> Result<()> {
        if let Some(behavior) = self.default {
            builder.default_behavior(behavior);
        }
        if !self.throw.is_empty() {
            builder.throw_on(self.throw.iter().copied())?;
        }
        if !self.log.is_empty() {
            builder.log_on(self.log.iter().copied())?;
        }
        if !self.ignore.is_empty() {
            builder.ignore(self.ignore.iter().copied())?;
        }
        Ok(())
    }
}
