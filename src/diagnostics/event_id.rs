use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// Opaque identifier of a diagnostic event category.
///
/// Identity is the numeric id; the name is carried for display and lookup.
/// Providers declare their ids as constants in their own id range.
#[derive(Debug, Clone, Copy)]
pub struct EventId {
    id: i32,
    name: &'static str,
}

impl EventId {
    pub const fn new(id: i32, name: &'static str) -> Self {
        EventId { id, name }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resolve a built-in event id from its name (`TransactionIgnoredWarning`),
    /// qualified name (`InMemoryEventId.TransactionIgnoredWarning`) or number.
    pub fn lookup(key: &str) -> Result<EventId, ConfigError> {
        let key = key.trim();
        let found = match key.parse::<i32>() {
            Ok(number) => KNOWN_EVENT_IDS.iter().find(|e| e.id == number),
            Err(_) => {
                let name = key.rsplit('.').next().unwrap_or(key);
                KNOWN_EVENT_IDS
                    .iter()
                    .find(|e| e.name.eq_ignore_ascii_case(name))
            }
        };
        found
            .copied()
            .ok_or_else(|| ConfigError::UnknownEventId(key.to_string()))
    }

    /// All built-in event ids, ordered by number.
    pub fn known() -> &'static [EventId] {
        KNOWN_EVENT_IDS
    }
}

impl PartialEq for EventId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventId {}

impl Hash for EventId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for EventId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Key {
            Number(i32),
            Name(String),
        }

        let key = match Key::deserialize(deserializer)? {
            Key::Number(n) => n.to_string(),
            Key::Name(s) => s,
        };
        EventId::lookup(&key).map_err(serde::de::Error::custom)
    }
}

/// Event ids raised by the core framework.
pub struct CoreEventId;

impl CoreEventId {
    pub const CORE_BASE_ID: i32 = 10000;

    pub const SENSITIVE_DATA_LOGGING_ENABLED_WARNING: EventId =
        EventId::new(Self::CORE_BASE_ID + 1, "SensitiveDataLoggingEnabledWarning");
    pub const QUERY_EXECUTION_PLANNED: EventId =
        EventId::new(Self::CORE_BASE_ID + 101, "QueryExecutionPlanned");
    pub const POSSIBLE_UNINTENDED_COLLECTION_NAVIGATION_NULL_COMPARISON_WARNING: EventId =
        EventId::new(
            Self::CORE_BASE_ID + 102,
            "PossibleUnintendedCollectionNavigationNullComparisonWarning",
        );
    pub const ROW_LIMITING_OPERATION_WITHOUT_ORDER_BY_WARNING: EventId = EventId::new(
        Self::CORE_BASE_ID + 104,
        "RowLimitingOperationWithoutOrderByWarning",
    );
    pub const FIRST_WITHOUT_ORDER_BY_AND_FILTER_WARNING: EventId =
        EventId::new(Self::CORE_BASE_ID + 105, "FirstWithoutOrderByAndFilterWarning");
}

/// Event ids raised by the in-memory provider.
pub struct InMemoryEventId;

impl InMemoryEventId {
    pub const PROVIDER_BASE_ID: i32 = 30000;

    /// A transaction operation was requested, but ignored because the
    /// in-memory store does not support transactions.
    pub const TRANSACTION_IGNORED_WARNING: EventId =
        EventId::new(Self::PROVIDER_BASE_ID, "TransactionIgnoredWarning");

    /// Changes were saved to the in-memory store.
    pub const CHANGES_SAVED: EventId = EventId::new(Self::PROVIDER_BASE_ID + 1, "ChangesSaved");
}

static KNOWN_EVENT_IDS: &[EventId] = &[
    CoreEventId::SENSITIVE_DATA_LOGGING_ENABLED_WARNING,
    CoreEventId::QUERY_EXECUTION_PLANNED,
    CoreEventId::POSSIBLE_UNINTENDED_COLLECTION_NAVIGATION_NULL_COMPARISON_WARNING,
    CoreEventId::ROW_LIMITING_OPERATION_WITHOUT_ORDER_BY_WARNING,
    CoreEventId::FIRST_WITHOUT_ORDER_BY_AND_FILTER_WARNING,
    InMemoryEventId::TRANSACTION_IGNORED_WARNING,
    InMemoryEventId::CHANGES_SAVED,
];
