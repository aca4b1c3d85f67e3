//! Resolve warning dispositions from a settings file and flags

use serde::Serialize;

use super::CliError;
use crate::diagnostics::{EventId, WarningBehavior};
use crate::in_memory::InMemoryDbContextOptionsBuilderExt;
use crate::options::{DbContextOptionsBuilder, WarningsSettings};

/// Options for the warnings command
#[derive(Debug, Clone, Default)]
pub struct WarningsOptions {
    /// Settings JSON, applied before the flags
    pub settings: Option<String>,
    pub throw_on: Vec<String>,
    pub log_on: Vec<String>,
    pub ignore: Vec<String>,
    /// Register the in-memory provider with this store name
    pub in_memory: Option<String>,
}

/// Resolved behavior of one event id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventBehavior {
    pub id: i32,
    pub name: &'static str,
    pub behavior: WarningBehavior,
    /// Whether the behavior comes from an explicit mapping
    pub explicit: bool,
}

fn resolve(names: &[String]) -> Result<Vec<EventId>, CliError> {
    names
        .iter()
        .map(|name| EventId::lookup(name).map_err(CliError::Config))
        .collect()
}

/// Execute a warnings operation
pub fn execute_warnings(options: &WarningsOptions) -> Result<Vec<EventBehavior>, CliError> {
    let settings = match &options.settings {
        Some(json) => Some(WarningsSettings::from_json(json)?),
        None => None,
    };
    let throw_on = resolve(&options.throw_on)?;
    let log_on = resolve(&options.log_on)?;
    let ignore = resolve(&options.ignore)?;

    let mut builder = DbContextOptionsBuilder::new();
    if let Some(store_name) = &options.in_memory {
        builder.use_in_memory_database(store_name);
    }
    builder.configure_warnings(|w| {
        if let Some(settings) = &settings {
            settings.apply(w)?;
        }
        if !throw_on.is_empty() {
            w.throw_on(throw_on.iter().copied())?;
        }
        if !log_on.is_empty() {
            w.log_on(log_on.iter().copied())?;
        }
        if !ignore.is_empty() {
            w.ignore(ignore.iter().copied())?;
        }
        Ok(())
    })?;

    let core = builder.core_extension();
    let warnings = core.warnings_configuration();
    Ok(EventId::known()
        .iter()
        .map(|id| EventBehavior {
            id: id.id(),
            name: id.name(),
            behavior: warnings.behavior_for(*id),
            explicit: warnings.explicit_behavior(*id).is_some(),
        })
        .collect())
}

/// All built-in event ids
pub fn list_events() -> Vec<(i32, &'static str)> {
    EventId::known().iter().map(|id| (id.id(), id.name())).collect()
}

