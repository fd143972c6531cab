use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::classifier::{CertificateClassifier, ClassificationInput, ClassificationResult};
use super::dates::parse_calendar_date;
use super::domain::{CertificateDraft, EntityId, ExtractedRecord, RecordScope};
use super::duplicate::{similarity, DuplicateDetector, DuplicateMatch, DuplicatePolicy};
use super::identity::{IdentityGuard, MismatchVerdict};
use super::normalizer::{AbbreviationKind, FieldNormalizer};
use super::repository::{AbbreviationStore, EntityDirectory, RecordRepository, RepositoryError};
use super::valid_date::{ValidDateCalculator, ValidDateHints, ValidDateSource};
use super::validity::{Locale, StatusCalculator, ValidityStatus};
use crate::config::IntakeConfig;

/// Whether the upload belongs to a crew member or to a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Crew,
    Ship,
}

/// Operator overrides for false identity blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BypassFlags {
    pub holder_check: bool,
    pub ship_check: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeRequest {
    pub scope: RecordScope,
    pub entity_id: EntityId,
    pub subject: SubjectKind,
    pub extracted: ExtractedRecord,
    /// Term type used for grace-period lookup, e.g. "Full Term" or "Interim".
    #[serde(default)]
    pub cert_type: Option<String>,
    #[serde(default)]
    pub bypass: BypassFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeOutcome {
    Accepted,
    Duplicate,
    Blocked,
}

/// Everything the caller needs to persist, reject or escalate an upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeDecision {
    pub outcome: IntakeOutcome,
    pub draft: CertificateDraft,
    pub classification: ClassificationResult,
    pub status: ValidityStatus,
    pub status_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_date_source: Option<ValidDateSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<DuplicateMatch>,
    pub verdicts: Vec<MismatchVerdict>,
    pub warnings: Vec<String>,
}

impl IntakeDecision {
    pub fn blocking_verdict(&self) -> Option<&MismatchVerdict> {
        self.verdicts.iter().find(|verdict| verdict.blocked)
    }
}

/// Runs normalization, classification, validity and the duplicate and identity gates.
pub struct CertificateIntakeService<R, S, E> {
    classifier: Arc<CertificateClassifier>,
    normalizer: Arc<FieldNormalizer>,
    status: Arc<StatusCalculator>,
    duplicates: Arc<DuplicateDetector>,
    valid_dates: Arc<ValidDateCalculator>,
    guard: IdentityGuard,
    records: Arc<R>,
    abbreviations: Arc<S>,
    directory: Arc<E>,
}

impl<R, S, E> CertificateIntakeService<R, S, E>
where
    R: RecordRepository + 'static,
    S: AbbreviationStore + 'static,
    E: EntityDirectory + 'static,
{
    pub fn new(records: Arc<R>, abbreviations: Arc<S>, directory: Arc<E>, config: &IntakeConfig) -> Self {
        Self {
            classifier: Arc::new(CertificateClassifier::default()),
            normalizer: Arc::new(FieldNormalizer::default()),
            status: Arc::new(StatusCalculator::from(config)),
            duplicates: Arc::new(DuplicateDetector::new(DuplicatePolicy::enhanced(
                config.duplicate_min_fields,
            ))),
            valid_dates: Arc::new(ValidDateCalculator::default()),
            guard: IdentityGuard::new(),
            records,
            abbreviations,
            directory,
        }
    }

    /// Swap the classifier, e.g. for a catalog loaded from elsewhere.
    pub fn with_classifier(mut self, classifier: CertificateClassifier) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    pub fn classify(&self, input: &ClassificationInput) -> ClassificationResult {
        self.classifier.classify(input)
    }

    pub fn status_of(&self, expiry: Option<&str>, cert_type: Option<&str>) -> ValidityStatus {
        self.status.compute_status(expiry, cert_type, Utc::now())
    }

    pub fn assess(&self, request: IntakeRequest) -> Result<IntakeDecision, IntakeServiceError> {
        self.assess_at(request, Utc::now())
    }

    pub fn assess_at(
        &self,
        request: IntakeRequest,
        now: DateTime<Utc>,
    ) -> Result<IntakeDecision, IntakeServiceError> {
        let entity = self
            .directory
            .authoritative(&request.entity_id)?
            .ok_or_else(|| IntakeServiceError::EntityNotFound(request.entity_id.0.clone()))?;
        let existing = self.records.find_existing(&request.scope)?;
        let extracted = &request.extracted;

        let classification = self.classifier.classify(&ClassificationInput::from(extracted));
        let cert_name = classification.canonical_type.clone();
        let cert_abbreviation =
            self.normalizer
                .abbreviate(self.abbreviations.as_ref(), &cert_name, AbbreviationKind::Certificate);

        let issued_by = non_blank(extracted.issued_by.as_deref())
            .map(|raw| self.normalizer.normalize_issuer(raw));
        let issued_by_abbreviation = issued_by.as_deref().map(|issuer| {
            self.normalizer
                .abbreviate(self.abbreviations.as_ref(), issuer, AbbreviationKind::Organization)
        });

        let mut valid_date = non_blank(extracted.expiry_date.as_deref()).map(canonical_date);
        let mut valid_date_source = None;
        if valid_date.is_none() {
            let hints = ValidDateHints {
                issued_date: extracted.issued_date.as_deref(),
                note: &extracted.note,
                equipment_name: &extracted.raw_name,
                anniversary: entity.anniversary,
            };
            if let Some(resolution) = self
                .valid_dates
                .calculate(&hints, &existing, now.date_naive())
            {
                valid_date = Some(resolution.date.format("%Y-%m-%d").to_string());
                valid_date_source = Some(resolution.source);
            }
        }

        let status =
            self.status
                .compute_status(valid_date.as_deref(), request.cert_type.as_deref(), now);

        let mut draft = CertificateDraft {
            cert_name,
            cert_abbreviation,
            cert_no: non_blank(extracted.cert_no.as_deref()).map(str::to_string),
            issued_by,
            issued_by_abbreviation,
            issue_date: non_blank(extracted.issued_date.as_deref()).map(canonical_date),
            valid_date,
            last_endorse: non_blank(extracted.last_endorse.as_deref()).map(canonical_date),
            holder_name: non_blank(extracted.holder_name.as_deref()).map(str::to_string),
            notes: Vec::new(),
        };

        let mut warnings = Vec::new();
        let duplicate = self.duplicates.find_duplicate(&draft, &existing);
        if duplicate.is_none() {
            for record in existing.iter().filter(|record| similarity(&draft, *record) == 100) {
                warnings.push(format!(
                    "possible renewal of existing certificate {}",
                    record.id
                ));
            }
        }

        let verdict = match request.subject {
            SubjectKind::Crew => self.guard.check_holder(
                &request.entity_id,
                extracted.holder_name.as_deref(),
                extracted.date_of_birth.as_deref(),
                &entity,
                request.bypass.holder_check,
            ),
            SubjectKind::Ship => self.guard.check_ship(
                &request.entity_id,
                extracted.ship_name.as_deref(),
                extracted.imo_number.as_deref(),
                &entity,
                request.bypass.ship_check,
            ),
        };
        if let Some(note) = &verdict.note {
            draft.notes.push(note.en.clone());
            draft.notes.push(note.vi.clone());
        }

        let outcome = if verdict.blocked {
            IntakeOutcome::Blocked
        } else if duplicate.is_some() {
            IntakeOutcome::Duplicate
        } else {
            IntakeOutcome::Accepted
        };

        info!(
            entity_id = %request.entity_id.0,
            cert_name = %draft.cert_name,
            outcome = ?outcome,
            status = ?status,
            "certificate intake assessed"
        );

        Ok(IntakeDecision {
            outcome,
            draft,
            classification,
            status,
            status_label: status.display(Locale::English).to_string(),
            valid_date_source,
            duplicate,
            verdicts: vec![verdict],
            warnings,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// `YYYY-MM-DD` when the value parses as a date, otherwise the trimmed original.
fn canonical_date(value: &str) -> String {
    parse_calendar_date(value)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| value.trim().to_string())
}

/// Error raised by the intake service. Decision outcomes are never errors.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("entity {0} not found")]
    EntityNotFound(String),
}
