use crate::diagnostics::{DiagnosticsLogger, InMemoryEventId};
use crate::error::{ConfigError, Result};
use crate::in_memory::InMemoryOptionsExtension;
use crate::options::{DbContextOptions, OptionsExtension};

/// A named in-memory store. Only bookkeeping of saved changes is kept.
#[derive(Debug)]
pub struct InMemoryStore {
    name: String,
    saved: usize,
    logger: DiagnosticsLogger,
}

impl InMemoryStore {
    /// Open the store selected by the options' in-memory extension.
    pub fn from_options(options: &DbContextOptions) -> Result<Self> {
        let extension = options
            .find_extension::<InMemoryOptionsExtension>()
            .ok_or_else(|| ConfigError::InvalidExtension {
                extension: "InMemory",
                reason: "no in-memory database configured; call use_in_memory_database".to_string(),
            })?;
        extension.validate(options)?;

        Ok(InMemoryStore {
            name: extension.store_name().to_string(),
            saved: 0,
            logger: DiagnosticsLogger::from_options(options),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total entities saved so far
    pub fn saved(&self) -> usize {
        self.saved
    }

    /// Record `entries` saved entities and report
    /// [`InMemoryEventId::CHANGES_SAVED`].
    pub fn save_changes(&mut self, entries: usize) -> Result<usize> {
        self.logger.information(
            InMemoryEventId::CHANGES_SAVED,
            format_args!("Saved {} entities to in-memory store '{}'.", entries, self.name),
        )?;
        self.saved += entries;
        Ok(entries)
    }
}
