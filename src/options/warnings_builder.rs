use crate::diagnostics::{EventId, WarningBehavior, WarningsConfiguration};
use crate::error::{ConfigError, Result};
use crate::options::DbContextOptionsBuilder;

/// Fluent surface for choosing what happens when a diagnostic event fires.
///
/// Calls chain and later calls win:
///
/// ```
/// use querytree::diagnostics::{CoreEventId, WarningBehavior};
/// use querytree::options::{CoreOptionsExtension, DbContextOptionsBuilder};
///
/// let a = CoreEventId::QUERY_EXECUTION_PLANNED;
/// let b = CoreEventId::FIRST_WITHOUT_ORDER_BY_AND_FILTER_WARNING;
///
/// let mut builder = DbContextOptionsBuilder::new();
/// builder
///     .configure_warnings(|w| {
///         w.throw_on([a, b])?.log_on([a])?;
///         Ok(())
///     })
///     .unwrap();
///
/// let core = builder.options().find_extension::<CoreOptionsExtension>().unwrap();
/// assert_eq!(core.warnings_configuration().behavior_for(a), WarningBehavior::Log);
/// assert_eq!(core.warnings_configuration().behavior_for(b), WarningBehavior::Throw);
/// ```
pub struct WarningsConfigurationBuilder<'a> {
    options_builder: &'a mut DbContextOptionsBuilder,
}

impl<'a> WarningsConfigurationBuilder<'a> {
    pub fn new(options_builder: &'a mut DbContextOptionsBuilder) -> Self {
        WarningsConfigurationBuilder { options_builder }
    }

    pub fn options_builder(&mut self) -> &mut DbContextOptionsBuilder {
        &mut *self.options_builder
    }

    /// Behavior for every event without an explicit mapping.
    pub fn default_behavior(&mut self, behavior: WarningBehavior) -> &mut Self {
        self.apply_option(|warnings| warnings.with_default_behavior(behavior));
        self
    }

    /// Raise an error when any of `event_ids` occurs.
    pub fn throw_on<I>(&mut self, event_ids: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = EventId>,
    {
        self.set_behavior("throw_on", event_ids, WarningBehavior::Throw)
    }

    /// Log when any of `event_ids` occurs.
    pub fn log_on<I>(&mut self, event_ids: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = EventId>,
    {
        self.set_behavior("log_on", event_ids, WarningBehavior::Log)
    }

    /// Do nothing when any of `event_ids` occurs.
    pub fn ignore<I>(&mut self, event_ids: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = EventId>,
    {
        self.set_behavior("ignore", event_ids, WarningBehavior::Ignore)
    }

    /// Collects and checks the whole batch first, so a rejected call leaves
    /// the options untouched and an accepted one lands as a single update.
    fn set_behavior<I>(
        &mut self,
        method: &'static str,
        event_ids: I,
        behavior: WarningBehavior,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = EventId>,
    {
        let event_ids: Vec<EventId> = event_ids.into_iter().collect();
        if event_ids.is_empty() {
            return Err(ConfigError::EmptyEventIds { method });
        }

        tracing::debug!(
            ?behavior,
            events = ?event_ids.iter().map(|e| e.name()).collect::<Vec<_>>(),
            "configuring warnings"
        );
        self.apply_option(|warnings| warnings.with_explicit(&event_ids, behavior));
        Ok(self)
    }

    fn apply_option<F>(&mut self, update: F)
    where
        F: FnOnce(&WarningsConfiguration) -> WarningsConfiguration,
    {
        let core = self.options_builder.core_extension();
        let warnings = update(core.warnings_configuration());
        self.options_builder
            .add_or_update_extension(core.with_warnings_configuration(warnings));
    }
}
