use super::domain::{AuthoritativeEntity, EntityId, ExistingRecord, RecordScope};

/// Read-only query over persisted certificates, narrowed by ownership scope.
pub trait RecordRepository: Send + Sync {
    fn find_existing(&self, scope: &RecordScope) -> Result<Vec<ExistingRecord>, RepositoryError>;
}

/// User-defined abbreviation overrides keyed by the uppercased, trimmed name.
///
/// `record_usage` must increment atomically on the store side; callers issue it once per hit.
pub trait AbbreviationStore: Send + Sync {
    fn lookup(&self, name: &str) -> Result<Option<String>, RepositoryError>;
    fn record_usage(&self, name: &str) -> Result<(), RepositoryError>;
}

/// Source of truth for crew and ship identity.
pub trait EntityDirectory: Send + Sync {
    fn authoritative(&self, id: &EntityId) -> Result<Option<AuthoritativeEntity>, RepositoryError>;
}

/// Error enumeration for collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
