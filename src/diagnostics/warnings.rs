use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diagnostics::EventId;

/// What happens when a diagnostic event occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningBehavior {
    /// Raise a [`WarningError`](crate::error::WarningError)
    Throw,
    /// Emit a log event
    #[default]
    Log,
    /// Do nothing
    Ignore,
}

/// Immutable mapping from event ids to [`WarningBehavior`].
///
/// Every `with_*` method returns a new configuration; the receiver is left
/// unchanged. Ids without an explicit mapping fall back to the default
/// behavior.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WarningsConfiguration {
    default_behavior: WarningBehavior,
    explicit: BTreeMap<EventId, WarningBehavior>,
}

impl WarningsConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_behavior(&self) -> WarningBehavior {
        self.default_behavior
    }

    pub fn with_default_behavior(&self, behavior: WarningBehavior) -> Self {
        WarningsConfiguration {
            default_behavior: behavior,
            explicit: self.explicit.clone(),
        }
    }

    /// Map every id in `event_ids` to `behavior`, replacing earlier mappings.
    pub fn with_explicit(&self, event_ids: &[EventId], behavior: WarningBehavior) -> Self {
        let mut explicit = self.explicit.clone();
        for event_id in event_ids {
            explicit.insert(*event_id, behavior);
        }
        WarningsConfiguration {
            default_behavior: self.default_behavior,
            explicit,
        }
    }

    /// Map `event_id` to `behavior` only when it has no explicit mapping yet.
    pub fn try_with_explicit(&self, event_id: EventId, behavior: WarningBehavior) -> Self {
        if self.explicit.contains_key(&event_id) {
            return self.clone();
        }
        self.with_explicit(&[event_id], behavior)
    }

    pub fn explicit_behavior(&self, event_id: EventId) -> Option<WarningBehavior> {
        self.explicit.get(&event_id).copied()
    }

    /// The behavior that applies to `event_id`.
    pub fn behavior_for(&self, event_id: EventId) -> WarningBehavior {
        self.explicit_behavior(event_id)
            .unwrap_or(self.default_behavior)
    }

    pub fn explicit(&self) -> impl Iterator<Item = (EventId, WarningBehavior)> + '_ {
        self.explicit.iter().map(|(id, behavior)| (*id, *behavior))
    }
}
