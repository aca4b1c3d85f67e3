use pretty_assertions::assert_eq;
use querytree::diagnostics::{CoreEventId, EventId, InMemoryEventId, WarningBehavior};
use querytree::error::ConfigError;
use querytree::in_memory::{
    InMemoryDbContextOptionsBuilderExt, InMemoryOptionsExtension, InMemoryStore,
    InMemoryTransactionManager,
};
use querytree::options::{CoreOptionsExtension, DbContextOptionsBuilder, WarningsSettings};

const A: EventId = CoreEventId::QUERY_EXECUTION_PLANNED;
const B: EventId = CoreEventId::FIRST_WITHOUT_ORDER_BY_AND_FILTER_WARNING;
const C: EventId = CoreEventId::ROW_LIMITING_OPERATION_WITHOUT_ORDER_BY_WARNING;

fn behavior(builder: &DbContextOptionsBuilder, id: EventId) -> WarningBehavior {
    builder
        .options()
        .find_extension::<CoreOptionsExtension>()
        .map(|core| core.warnings_configuration().behavior_for(id))
        .unwrap_or_default()
}

// ========================================================================
// Builder semantics
// ========================================================================

#[test]
fn test_last_write_wins_per_event() {
    let mut builder = DbContextOptionsBuilder::new();
    builder
        .configure_warnings(|w| {
            w.throw_on([A, B])?.log_on([A])?;
            Ok(())
        })
        .unwrap();

    assert_eq!(behavior(&builder, A), WarningBehavior::Log);
    assert_eq!(behavior(&builder, B), WarningBehavior::Throw);
    assert_eq!(behavior(&builder, C), WarningBehavior::Log);

    let core = builder.options().find_extension::<CoreOptionsExtension>().unwrap();
    assert_eq!(core.warnings_configuration().explicit_behavior(C), None);
}

#[test]
fn test_empty_ids_rejected_without_changes() {
    let mut builder = DbContextOptionsBuilder::new();
    builder
        .configure_warnings(|w| {
            w.throw_on([A])?;
            Ok(())
        })
        .unwrap();
    let before = builder
        .options()
        .find_extension::<CoreOptionsExtension>()
        .cloned();

    let result = builder.configure_warnings(|w| {
        w.ignore(Vec::<EventId>::new())?;
        Ok(())
    });

    match result {
        Err(ConfigError::EmptyEventIds { method }) => assert_eq!(method, "ignore"),
        other => panic!("expected EmptyEventIds, got {:?}", other.map(|_| ())),
    }
    let after = builder
        .options()
        .find_extension::<CoreOptionsExtension>()
        .cloned();
    assert_eq!(before, after);
}

#[test]
fn test_first_call_creates_single_core_extension() {
    let mut builder = DbContextOptionsBuilder::new();
    assert!(builder.options().is_empty());

    builder
        .configure_warnings(|w| {
            w.log_on([InMemoryEventId::CHANGES_SAVED])?;
            Ok(())
        })
        .unwrap();

    assert_eq!(builder.options().len(), 1);
    let core = builder.options().find_extension::<CoreOptionsExtension>().unwrap();
    assert_eq!(
        core.warnings_configuration()
            .explicit_behavior(InMemoryEventId::CHANGES_SAVED),
        Some(WarningBehavior::Log)
    );
}

#[test]
fn test_repeated_throw_on_is_idempotent() {
    let mut once = DbContextOptionsBuilder::new();
    once.configure_warnings(|w| {
        w.throw_on([A])?;
        Ok(())
    })
    .unwrap();

    let mut twice = DbContextOptionsBuilder::new();
    twice
        .configure_warnings(|w| {
            w.throw_on([A])?.throw_on([A])?;
            Ok(())
        })
        .unwrap();

    assert_eq!(
        once.options().find_extension::<CoreOptionsExtension>(),
        twice.options().find_extension::<CoreOptionsExtension>()
    );
}

#[test]
fn test_built_options_are_not_affected_by_later_changes() {
    let mut builder = DbContextOptionsBuilder::new();
    builder
        .configure_warnings(|w| {
            w.ignore([A])?;
            Ok(())
        })
        .unwrap();
    let built = builder.build().unwrap();

    builder
        .configure_warnings(|w| {
            w.throw_on([A])?;
            Ok(())
        })
        .unwrap();

    let core = built.find_extension::<CoreOptionsExtension>().unwrap();
    assert_eq!(core.warnings_configuration().behavior_for(A), WarningBehavior::Ignore);
    assert_eq!(behavior(&builder, A), WarningBehavior::Throw);
}

#[test]
fn test_default_behavior_applies_to_unmapped_events() {
    let mut builder = DbContextOptionsBuilder::new();
    builder
        .configure_warnings(|w| {
            w.default_behavior(WarningBehavior::Throw).ignore([B])?;
            Ok(())
        })
        .unwrap();

    assert_eq!(behavior(&builder, A), WarningBehavior::Throw);
    assert_eq!(behavior(&builder, B), WarningBehavior::Ignore);
}

#[test]
fn test_sensitive_data_logging_warning_can_throw() {
    let mut builder = DbContextOptionsBuilder::new();
    builder.enable_sensitive_data_logging(true);
    assert!(builder.build().is_ok());

    builder
        .configure_warnings(|w| {
            w.throw_on([CoreEventId::SENSITIVE_DATA_LOGGING_ENABLED_WARNING])?;
            Ok(())
        })
        .unwrap();
    let err = builder.build().unwrap_err();
    assert!(matches!(err, ConfigError::Warning(_)));

    // the flag survives the warnings update
    let core = builder.options().find_extension::<CoreOptionsExtension>().unwrap();
    assert!(core.is_sensitive_data_logging_enabled());
}

// ========================================================================
// Settings
// ========================================================================

#[test]
fn test_settings_from_json() {
    let settings = WarningsSettings::from_json(
        r#"{
            "default": "ignore",
            "throw": ["QueryExecutionPlanned", 10105],
            "log": ["InMemoryEventId.TransactionIgnoredWarning"]
        }"#,
    )
    .unwrap();

    let mut builder = DbContextOptionsBuilder::new();
    builder.configure_warnings(|w| settings.apply(w)).unwrap();

    assert_eq!(behavior(&builder, A), WarningBehavior::Throw);
    assert_eq!(behavior(&builder, B), WarningBehavior::Throw);
    assert_eq!(
        behavior(&builder, InMemoryEventId::TRANSACTION_IGNORED_WARNING),
        WarningBehavior::Log
    );
    assert_eq!(behavior(&builder, C), WarningBehavior::Ignore);
}

#[test]
fn test_settings_reject_unknown_event() {
    let err = WarningsSettings::from_json(r#"{ "throw": ["NotAnEvent"] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().contains("NotAnEvent"));
}

// ========================================================================
// In-memory provider
// ========================================================================

#[test]
fn test_in_memory_transactions_throw_by_default() {
    let mut builder = DbContextOptionsBuilder::new();
    builder.use_in_memory_database("orders");
    let options = builder.build().unwrap();

    let manager = InMemoryTransactionManager::from_options(&options);
    let err = manager.begin_transaction().unwrap_err();
    assert_eq!(err.event_id(), InMemoryEventId::TRANSACTION_IGNORED_WARNING);
}

#[test]
fn test_explicit_choice_beats_provider_default() {
    let mut before = DbContextOptionsBuilder::new();
    before
        .configure_warnings(|w| {
            w.ignore([InMemoryEventId::TRANSACTION_IGNORED_WARNING])?;
            Ok(())
        })
        .unwrap();
    before.use_in_memory_database("orders");

    let manager = InMemoryTransactionManager::from_options(&before.build().unwrap());
    let transaction = manager.begin_transaction().unwrap();
    assert!(transaction.commit().is_ok());

    let mut after = DbContextOptionsBuilder::new();
    after.use_in_memory_database("orders");
    after
        .configure_warnings(|w| {
            w.log_on([InMemoryEventId::TRANSACTION_IGNORED_WARNING])?;
            Ok(())
        })
        .unwrap();

    let manager = InMemoryTransactionManager::from_options(&after.build().unwrap());
    assert!(manager.rollback_transaction().is_ok());
}

#[test]
fn test_in_memory_store_requires_provider() {
    let options = DbContextOptionsBuilder::new().build().unwrap();
    assert!(matches!(
        InMemoryStore::from_options(&options),
        Err(ConfigError::InvalidExtension { extension: "InMemory", .. })
    ));
}

#[test]
fn test_in_memory_store_saves_changes() {
    let mut builder = DbContextOptionsBuilder::new();
    builder.use_in_memory_database("first").use_in_memory_database("second");
    let options = builder.build().unwrap();

    assert_eq!(options.len(), 2);
    assert_eq!(
        options
            .find_extension::<InMemoryOptionsExtension>()
            .map(|e| e.store_name()),
        Some("second")
    );

    let mut store = InMemoryStore::from_options(&options).unwrap();
    assert_eq!(store.save_changes(3).unwrap(), 3);
    assert_eq!(store.save_changes(2).unwrap(), 2);
    assert_eq!(store.saved(), 5);
    assert_eq!(store.name(), "second");
}

#[test]
fn test_empty_store_name_fails_validation() {
    let mut builder = DbContextOptionsBuilder::new();
    builder.use_in_memory_database("  ");
    assert!(matches!(
        builder.build(),
        Err(ConfigError::InvalidExtension { .. })
    ));
}
