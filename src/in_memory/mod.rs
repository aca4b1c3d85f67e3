//! In-memory provider: options, transaction handling and the store.
//!
//! The in-memory store has no transactions. Transaction calls succeed as
//! no-ops but report [`InMemoryEventId::TRANSACTION_IGNORED_WARNING`], which
//! [`use_in_memory_database`](InMemoryDbContextOptionsBuilderExt::use_in_memory_database)
//! maps to [`WarningBehavior::Throw`] unless the caller chose otherwise.

mod store;
mod transaction;

pub use store::InMemoryStore;
pub use transaction::{InMemoryTransaction, InMemoryTransactionManager};

use crate::diagnostics::{InMemoryEventId, WarningBehavior};
use crate::error::{ConfigError, Result};
use crate::options::{DbContextOptions, DbContextOptionsBuilder, OptionsExtension};

/// Selects the in-memory provider and names the store to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryOptionsExtension {
    store_name: String,
}

impl InMemoryOptionsExtension {
    pub fn new(store_name: impl Into<String>) -> Self {
        InMemoryOptionsExtension {
            store_name: store_name.into(),
        }
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn with_store_name(&self, store_name: impl Into<String>) -> Self {
        InMemoryOptionsExtension {
            store_name: store_name.into(),
        }
    }
}

impl OptionsExtension for InMemoryOptionsExtension {
    fn name(&self) -> &'static str {
        "InMemory"
    }

    fn log_fragment(&self) -> String {
        format!("StoreName={}", self.store_name)
    }

    fn validate(&self, _options: &DbContextOptions) -> Result<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::InvalidExtension {
                extension: self.name(),
                reason: "store name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Provider registration on [`DbContextOptionsBuilder`].
pub trait InMemoryDbContextOptionsBuilderExt {
    /// Use the named in-memory store.
    fn use_in_memory_database(&mut self, store_name: &str) -> &mut Self;
}

impl InMemoryDbContextOptionsBuilderExt for DbContextOptionsBuilder {
    fn use_in_memory_database(&mut self, store_name: &str) -> &mut Self {
        let extension = match self.options().find_extension::<InMemoryOptionsExtension>() {
            Some(existing) => existing.with_store_name(store_name),
            None => InMemoryOptionsExtension::new(store_name),
        };
        self.add_or_update_extension(extension);

        let core = self.core_extension();
        let warnings = core.warnings_configuration().try_with_explicit(
            InMemoryEventId::TRANSACTION_IGNORED_WARNING,
            WarningBehavior::Throw,
        );
        self.add_or_update_extension(core.with_warnings_configuration(warnings))
    }
}
