use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider failure recorded against a transaction
///
/// Immutable once created. The text is the provider's top-level message plus
/// any granular field errors, newline-joined, for audit and debugging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureLogEntry {
    pub id: String,
    pub log: String,
    pub is_system_generated: bool,
    pub created_at: DateTime<Utc>,
}

impl FailureLogEntry {
    /// Entry written by the lifecycle itself, as opposed to an operator note
    pub fn system(log: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            log: log.into(),
            is_system_generated: true,
            created_at: Utc::now(),
        }
    }
}
