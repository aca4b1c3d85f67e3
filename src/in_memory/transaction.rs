use crate::diagnostics::{DiagnosticsLogger, InMemoryEventId};
use crate::error::WarningError;
use crate::options::DbContextOptions;

const TRANSACTIONS_NOT_SUPPORTED: &str =
    "Transactions are not supported by the in-memory store.";

/// Accepts transaction calls and reports that they were ignored.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionManager {
    logger: DiagnosticsLogger,
}

impl InMemoryTransactionManager {
    pub fn new(logger: DiagnosticsLogger) -> Self {
        InMemoryTransactionManager { logger }
    }

    pub fn from_options(options: &DbContextOptions) -> Self {
        Self::new(DiagnosticsLogger::from_options(options))
    }

    pub fn begin_transaction(&self) -> Result<InMemoryTransaction<'_>, WarningError> {
        self.transaction_ignored()?;
        Ok(InMemoryTransaction { manager: self })
    }

    pub fn commit_transaction(&self) -> Result<(), WarningError> {
        self.transaction_ignored()
    }

    pub fn rollback_transaction(&self) -> Result<(), WarningError> {
        self.transaction_ignored()
    }

    fn transaction_ignored(&self) -> Result<(), WarningError> {
        self.logger.warning(
            InMemoryEventId::TRANSACTION_IGNORED_WARNING,
            TRANSACTIONS_NOT_SUPPORTED,
        )
    }
}

/// Handle returned by [`InMemoryTransactionManager::begin_transaction`].
#[derive(Debug)]
pub struct InMemoryTransaction<'a> {
    manager: &'a InMemoryTransactionManager,
}

impl InMemoryTransaction<'_> {
    pub fn commit(self) -> Result<(), WarningError> {
        self.manager.commit_transaction()
    }

    pub fn rollback(self) -> Result<(), WarningError> {
        self.manager.rollback_transaction()
    }
}
