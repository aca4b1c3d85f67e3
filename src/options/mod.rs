//! Options container and builder.
//!
//! [`DbContextOptions`] holds at most one [`OptionsExtension`] per concrete
//! extension type. Extensions are immutable; changing one means building a
//! new value and swapping it in with
//! [`DbContextOptionsBuilder::add_or_update_extension`].
//!
//! ```
//! use querytree::diagnostics::{InMemoryEventId, WarningBehavior};
//! use querytree::options::{CoreOptionsExtension, DbContextOptionsBuilder};
//!
//! let mut builder = DbContextOptionsBuilder::new();
//! builder
//!     .configure_warnings(|w| {
//!         w.log_on([InMemoryEventId::TRANSACTION_IGNORED_WARNING])?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let options = builder.build().unwrap();
//! let core = options.find_extension::<CoreOptionsExtension>().unwrap();
//! assert_eq!(
//!     core.warnings_configuration()
//!         .behavior_for(InMemoryEventId::TRANSACTION_IGNORED_WARNING),
//!     WarningBehavior::Log
//! );
//! ```

mod core_options;
mod settings;
mod warnings_builder;

pub use core_options::CoreOptionsExtension;
pub use settings::WarningsSettings;
pub use warnings_builder::WarningsConfigurationBuilder;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::diagnostics::{CoreEventId, DiagnosticsLogger};
use crate::error::Result;

/// One logical category of configuration, stored by type in
/// [`DbContextOptions`].
pub trait OptionsExtension: Any + fmt::Debug + Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Human-readable summary of the non-default settings
    fn log_fragment(&self) -> String;

    /// Check this extension against the fully assembled options.
    fn validate(&self, _options: &DbContextOptions) -> Result<()> {
        Ok(())
    }
}

/// Immutable, type-keyed set of options extensions.
#[derive(Debug, Clone, Default)]
pub struct DbContextOptions {
    extensions: HashMap<TypeId, Arc<dyn OptionsExtension>>,
}

impl DbContextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registered extension of type `T`, if any.
    pub fn find_extension<T: OptionsExtension>(&self) -> Option<&T> {
        let extension: &dyn OptionsExtension = self.extensions.get(&TypeId::of::<T>())?.as_ref();
        let any: &dyn Any = extension;
        any.downcast_ref::<T>()
    }

    /// A copy of these options with `extension` added, replacing any
    /// extension of the same type.
    pub fn with_extension<T: OptionsExtension>(&self, extension: T) -> Self {
        let mut extensions = self.extensions.clone();
        extensions.insert(TypeId::of::<T>(), Arc::new(extension));
        DbContextOptions { extensions }
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// All extensions, ordered by name.
    pub fn extensions(&self) -> Vec<&dyn OptionsExtension> {
        let mut extensions: Vec<&dyn OptionsExtension> =
            self.extensions.values().map(|e| e.as_ref()).collect();
        extensions.sort_by_key(|e| e.name());
        extensions
    }

    pub fn log_fragment(&self) -> String {
        self.extensions()
            .iter()
            .map(|e| e.log_fragment())
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Mutable front end over [`DbContextOptions`] used during configuration.
#[derive(Debug, Default)]
pub struct DbContextOptionsBuilder {
    options: DbContextOptions,
}

impl DbContextOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue configuring existing options.
    pub fn from_options(options: DbContextOptions) -> Self {
        DbContextOptionsBuilder { options }
    }

    pub fn options(&self) -> &DbContextOptions {
        &self.options
    }

    /// Add `extension`, or replace the registered extension of its type.
    pub fn add_or_update_extension<T: OptionsExtension>(&mut self, extension: T) -> &mut Self {
        tracing::debug!(extension = extension.name(), "updating options extension");
        self.options = self.options.with_extension(extension);
        self
    }

    /// Configure warning dispositions.
    ///
    /// Each builder call inside `configure` is applied on its own; an error
    /// from a later call leaves earlier calls in effect.
    pub fn configure_warnings<F>(&mut self, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut WarningsConfigurationBuilder<'_>) -> Result<()>,
    {
        let mut warnings = WarningsConfigurationBuilder::new(self);
        configure(&mut warnings)?;
        Ok(self)
    }

    /// Include parameter values in logs and error messages.
    pub fn enable_sensitive_data_logging(&mut self, enabled: bool) -> &mut Self {
        let core = self.core_extension();
        self.add_or_update_extension(core.with_sensitive_data_logging(enabled))
    }

    /// Validate every extension and return the finished options.
    pub fn build(&self) -> Result<DbContextOptions> {
        for extension in self.options.extensions() {
            extension.validate(&self.options)?;
        }

        let logger = DiagnosticsLogger::from_options(&self.options);
        if logger.sensitive_data_logging() {
            logger.warning(
                CoreEventId::SENSITIVE_DATA_LOGGING_ENABLED_WARNING,
                "Sensitive data logging is enabled. Log entries and exception messages may include sensitive application data; this mode should only be enabled during development.",
            )?;
        }

        tracing::debug!(options = %self.options.log_fragment(), "options built");
        Ok(self.options.clone())
    }

    pub(crate) fn core_extension(&self) -> CoreOptionsExtension {
        self.options
            .find_extension::<CoreOptionsExtension>()
            .cloned()
            .unwrap_or_default()
    }
}
