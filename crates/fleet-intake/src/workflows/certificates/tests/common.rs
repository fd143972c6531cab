use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::config::IntakeConfig;
use crate::workflows::certificates::domain::{
    AuthoritativeEntity, EntityId, ExistingRecord, ExtractedRecord, RecordScope, ShipAnniversary,
};
use crate::workflows::certificates::repository::{
    AbbreviationStore, EntityDirectory, RecordRepository, RepositoryError,
};
use crate::workflows::certificates::service::{
    BypassFlags, CertificateIntakeService, IntakeRequest, SubjectKind,
};

pub(super) const COMPANY: &str = "pacific-line";
pub(super) const CREW_ID: &str = "crew-0042";
pub(super) const SHIP_ID: &str = "ship-0007";

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn today() -> NaiveDate {
    now().date_naive()
}

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn crew_entity() -> AuthoritativeEntity {
    AuthoritativeEntity {
        name: "NGUYEN VAN AN".to_string(),
        name_alt: Some("AN NGUYEN".to_string()),
        date_of_birth: Some("1988-04-12".to_string()),
        imo: None,
        anniversary: None,
    }
}

pub(super) fn ship_entity() -> AuthoritativeEntity {
    AuthoritativeEntity {
        name: "PACIFIC STAR".to_string(),
        name_alt: None,
        date_of_birth: None,
        imo: Some("IMO 9234567".to_string()),
        anniversary: Some(ShipAnniversary { day: 15, month: 3 }),
    }
}

pub(super) fn crew_scope() -> RecordScope {
    RecordScope {
        company_id: COMPANY.to_string(),
        ship_id: None,
        crew_id: Some(CREW_ID.to_string()),
    }
}

pub(super) fn ship_scope() -> RecordScope {
    RecordScope {
        company_id: COMPANY.to_string(),
        ship_id: Some(SHIP_ID.to_string()),
        crew_id: None,
    }
}

pub(super) fn gmdss_upload() -> ExtractedRecord {
    ExtractedRecord {
        raw_name: "GMDSS General Operator".to_string(),
        note: "Issued under regulation IV/2".to_string(),
        holder_name: Some("Nguyen Van An".to_string()),
        date_of_birth: Some("12/04/1988".to_string()),
        cert_no: Some("GOC-2231".to_string()),
        issued_by: Some("Panama Maritime Authority".to_string()),
        issued_date: Some("2024-02-01".to_string()),
        expiry_date: Some("2029-02-01".to_string()),
        ..ExtractedRecord::default()
    }
}

pub(super) fn crew_request(extracted: ExtractedRecord) -> IntakeRequest {
    IntakeRequest {
        scope: crew_scope(),
        entity_id: EntityId(CREW_ID.to_string()),
        subject: SubjectKind::Crew,
        extracted,
        cert_type: Some("Full Term".to_string()),
        bypass: BypassFlags::default(),
    }
}

pub(super) fn ship_request(extracted: ExtractedRecord) -> IntakeRequest {
    IntakeRequest {
        scope: ship_scope(),
        entity_id: EntityId(SHIP_ID.to_string()),
        subject: SubjectKind::Ship,
        extracted,
        cert_type: None,
        bypass: BypassFlags::default(),
    }
}

pub(super) fn existing_gmdss() -> ExistingRecord {
    ExistingRecord {
        id: "cert-001".to_string(),
        cert_name: Some("GMDSS Certificate".to_string()),
        cert_abbreviation: Some("GC".to_string()),
        cert_no: Some("goc-2231 ".to_string()),
        issue_date: Some("01/02/2024".to_string()),
        valid_date: Some("2029-02-01".to_string()),
        last_endorse: None,
        next_survey: None,
        company_id: COMPANY.to_string(),
        ship_id: None,
        crew_id: Some(CREW_ID.to_string()),
    }
}

#[derive(Default)]
pub(super) struct MemoryRecords {
    records: Mutex<Vec<ExistingRecord>>,
}

impl MemoryRecords {
    pub(super) fn with(records: Vec<ExistingRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl RecordRepository for MemoryRecords {
    fn find_existing(&self, scope: &RecordScope) -> Result<Vec<ExistingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("records mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| scope.contains(record))
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRecords;

impl RecordRepository for UnavailableRecords {
    fn find_existing(&self, _scope: &RecordScope) -> Result<Vec<ExistingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("records offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryAbbreviations {
    overrides: HashMap<String, String>,
    usage: Mutex<HashMap<String, u32>>,
}

impl MemoryAbbreviations {
    pub(super) fn with_override(mut self, name: &str, abbreviation: &str) -> Self {
        self.overrides
            .insert(name.trim().to_uppercase(), abbreviation.to_string());
        self
    }

    pub(super) fn usage(&self, name: &str) -> u32 {
        self.usage
            .lock()
            .expect("usage mutex poisoned")
            .get(name)
            .copied()
            .unwrap_or_default()
    }
}

impl AbbreviationStore for MemoryAbbreviations {
    fn lookup(&self, name: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.overrides.get(name).cloned())
    }

    fn record_usage(&self, name: &str) -> Result<(), RepositoryError> {
        *self
            .usage
            .lock()
            .expect("usage mutex poisoned")
            .entry(name.to_string())
            .or_default() += 1;
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryDirectory {
    entities: HashMap<EntityId, AuthoritativeEntity>,
}

impl MemoryDirectory {
    pub(super) fn standard() -> Self {
        let mut entities = HashMap::new();
        entities.insert(EntityId(CREW_ID.to_string()), crew_entity());
        entities.insert(EntityId(SHIP_ID.to_string()), ship_entity());
        Self { entities }
    }
}

impl EntityDirectory for MemoryDirectory {
    fn authoritative(&self, id: &EntityId) -> Result<Option<AuthoritativeEntity>, RepositoryError> {
        Ok(self.entities.get(id).cloned())
    }
}

pub(super) type MemoryService =
    CertificateIntakeService<MemoryRecords, MemoryAbbreviations, MemoryDirectory>;

pub(super) fn build_service(
    records: Vec<ExistingRecord>,
) -> (Arc<MemoryService>, Arc<MemoryAbbreviations>) {
    let abbreviations = Arc::new(MemoryAbbreviations::default());
    let service = CertificateIntakeService::new(
        Arc::new(MemoryRecords::with(records)),
        abbreviations.clone(),
        Arc::new(MemoryDirectory::standard()),
        &IntakeConfig::default(),
    );
    (Arc::new(service), abbreviations)
}

pub(super) async fn response_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
