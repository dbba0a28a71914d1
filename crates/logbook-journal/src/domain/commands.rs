//! Commands for the Journal context.

use logbook_core::command::Command;
use uuid::Uuid;

/// Command to create (or idempotently fetch) an event source by name.
#[derive(Debug, Clone)]
pub struct CreateEventSource {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The source name to register.
    pub name: String,
}

impl Command for CreateEventSource {
    fn command_type(&self) -> &'static str {
        "journal.create_event_source"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to append a log entry, creating its source on first use.
#[derive(Debug, Clone)]
pub struct AppendEventLog {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Name of the source the log belongs to.
    pub event_source_name: String,
    /// Log message body.
    pub content: String,
}

impl Command for AppendEventLog {
    fn command_type(&self) -> &'static str {
        "journal.append_event_log"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete the oldest `count` logs of a named source.
#[derive(Debug, Clone)]
pub struct PruneEventLogs {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Name of the source to prune. Must already exist.
    pub event_source_name: String,
    /// How many of the oldest logs to delete.
    pub count: i64,
}

impl Command for PruneEventLogs {
    fn command_type(&self) -> &'static str {
        "journal.prune_event_logs"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete an event source and all of its logs.
#[derive(Debug, Clone)]
pub struct DeleteEventSource {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Id of the source to delete.
    pub event_source_id: i64,
}

impl Command for DeleteEventSource {
    fn command_type(&self) -> &'static str {
        "journal.delete_event_source"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
