use crate::diagnostics::{WarningBehavior, WarningsConfiguration};
use crate::options::OptionsExtension;

/// Framework-wide options: warning dispositions and sensitive data logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreOptionsExtension {
    warnings: WarningsConfiguration,
    sensitive_data_logging: bool,
}

impl CoreOptionsExtension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings_configuration(&self) -> &WarningsConfiguration {
        &self.warnings
    }

    pub fn is_sensitive_data_logging_enabled(&self) -> bool {
        self.sensitive_data_logging
    }

    pub fn with_warnings_configuration(&self, warnings: WarningsConfiguration) -> Self {
        CoreOptionsExtension {
            warnings,
            ..self.clone()
        }
    }

    pub fn with_sensitive_data_logging(&self, enabled: bool) -> Self {
        CoreOptionsExtension {
            sensitive_data_logging: enabled,
            ..self.clone()
        }
    }
}

impl OptionsExtension for CoreOptionsExtension {
    fn name(&self) -> &'static str {
        "Core"
    }

    fn log_fragment(&self) -> String {
        let mut parts = Vec::new();
        if self.sensitive_data_logging {
            parts.push("SensitiveDataLoggingEnabled".to_string());
        }
        if self.warnings.default_behavior() != WarningBehavior::Log {
            parts.push(format!("DefaultWarningBehavior={:?}", self.warnings.default_behavior()));
        }
        let explicit: Vec<String> = self
            .warnings
            .explicit()
            .map(|(id, behavior)| format!("{}={:?}", id, behavior))
            .collect();
        if !explicit.is_empty() {
            parts.push(format!("ConfigureWarnings({})", explicit.join(", ")));
        }
        parts.join(" ")
    }
}
