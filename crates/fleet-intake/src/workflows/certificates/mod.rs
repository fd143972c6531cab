//! Certificate classification and validation pipeline.
//!
//! An upload flows through normalization, classification, valid-date derivation, status
//! computation, duplicate detection and the identity guard. The result is an
//! [`IntakeDecision`] that the caller persists, rejects or retries with a bypass.

pub mod classifier;
pub mod dates;
pub mod domain;
pub mod duplicate;
pub mod identity;
pub mod normalizer;
pub mod repository;
pub mod router;
pub mod service;
pub mod valid_date;
pub mod validity;

#[cfg(test)]
mod tests;

pub use classifier::{
    catalog, CertificateClassifier, ClassificationInput, ClassificationResult, KeywordCatalog,
    PriorityTier,
};
pub use domain::{
    AuthoritativeEntity, CertificateDraft, EntityId, ExistingRecord, ExtractedRecord,
    RecordScope, ShipAnniversary,
};
pub use duplicate::{
    similarity, ComparableCertificate, DuplicateDetector, DuplicateField, DuplicateMatch,
    DuplicatePolicy,
};
pub use identity::{
    names_match, BilingualMessage, IdentityGuard, MismatchDetails, MismatchReason,
    MismatchVerdict,
};
pub use normalizer::{AbbreviationKind, AbbreviationRules, FieldNormalizer, IssuerTable};
pub use repository::{AbbreviationStore, EntityDirectory, RecordRepository, RepositoryError};
pub use router::certificate_router;
pub use service::{
    BypassFlags, CertificateIntakeService, IntakeDecision, IntakeOutcome, IntakeRequest,
    IntakeServiceError, SubjectKind,
};
pub use valid_date::{
    MaintenanceIntervals, ValidDateCalculator, ValidDateHints, ValidDateResolution,
    ValidDateSource,
};
pub use validity::{GracePolicy, Locale, StatusCalculator, ValidityStatus};
