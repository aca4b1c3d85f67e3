//! Diagnostic event ids, warning dispositions and the logger that applies
//! them.

mod event_id;
mod logger;
mod warnings;

pub use event_id::{CoreEventId, EventId, InMemoryEventId};
pub use logger::DiagnosticsLogger;
pub use warnings::{WarningBehavior, WarningsConfiguration};
