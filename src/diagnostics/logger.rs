use std::fmt::Display;

use crate::diagnostics::{EventId, WarningBehavior, WarningsConfiguration};
use crate::error::WarningError;
use crate::options::{CoreOptionsExtension, DbContextOptions};

/// Reports diagnostic events according to a [`WarningsConfiguration`].
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsLogger {
    warnings: WarningsConfiguration,
    sensitive_data_logging: bool,
}

impl DiagnosticsLogger {
    pub fn new(warnings: WarningsConfiguration) -> Self {
        DiagnosticsLogger {
            warnings,
            sensitive_data_logging: false,
        }
    }

    /// Logger for built options; defaults apply when no core extension is
    /// registered.
    pub fn from_options(options: &DbContextOptions) -> Self {
        match options.find_extension::<CoreOptionsExtension>() {
            Some(core) => DiagnosticsLogger {
                warnings: core.warnings_configuration().clone(),
                sensitive_data_logging: core.is_sensitive_data_logging_enabled(),
            },
            None => Self::default(),
        }
    }

    pub fn warnings(&self) -> &WarningsConfiguration {
        &self.warnings
    }

    pub fn sensitive_data_logging(&self) -> bool {
        self.sensitive_data_logging
    }

    /// Report a warning-level event.
    pub fn warning(&self, event_id: EventId, message: impl Display) -> Result<(), WarningError> {
        match self.warnings.behavior_for(event_id) {
            WarningBehavior::Throw => Err(self.as_error(event_id, message)),
            WarningBehavior::Log => {
                tracing::warn!(event_id = event_id.id(), event = event_id.name(), "{}", message);
                Ok(())
            }
            WarningBehavior::Ignore => Ok(()),
        }
    }

    /// Report an information-level event. Throw and Ignore mappings apply
    /// the same way as for warnings.
    pub fn information(
        &self,
        event_id: EventId,
        message: impl Display,
    ) -> Result<(), WarningError> {
        match self.warnings.behavior_for(event_id) {
            WarningBehavior::Throw => Err(self.as_error(event_id, message)),
            WarningBehavior::Log => {
                tracing::info!(event_id = event_id.id(), event = event_id.name(), "{}", message);
                Ok(())
            }
            WarningBehavior::Ignore => Ok(()),
        }
    }

    fn as_error(&self, event_id: EventId, message: impl Display) -> WarningError {
        WarningError::WarningAsError {
            event_id,
            message: message.to_string(),
        }
    }
}
