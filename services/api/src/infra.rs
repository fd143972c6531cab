use chrono::NaiveDate;
use fleet_intake::workflows::certificates::{
    AbbreviationStore, AuthoritativeEntity, CertificateIntakeService, EntityDirectory, EntityId,
    ExistingRecord, RecordRepository, RecordScope, RepositoryError, ShipAnniversary,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, RwLock};

pub(crate) type IntakeService = CertificateIntakeService<
    InMemoryRecordRepository,
    InMemoryAbbreviationStore,
    InMemoryEntityDirectory,
>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRecordRepository {
    records: Arc<RwLock<Vec<ExistingRecord>>>,
}

impl InMemoryRecordRepository {
    pub(crate) fn from_records(records: Vec<ExistingRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.read().expect("records lock poisoned").len()
    }
}

impl RecordRepository for InMemoryRecordRepository {
    fn find_existing(&self, scope: &RecordScope) -> Result<Vec<ExistingRecord>, RepositoryError> {
        let guard = self
            .records
            .read()
            .map_err(|_| RepositoryError::Unavailable("records lock poisoned".to_string()))?;
        Ok(guard
            .iter()
            .filter(|record| scope.contains(record))
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAbbreviationStore {
    overrides: Arc<Mutex<HashMap<String, String>>>,
    usage: Arc<Mutex<HashMap<String, u64>>>,
}

impl InMemoryAbbreviationStore {
    pub(crate) fn set_override(&self, name: &str, abbreviation: &str) {
        self.overrides
            .lock()
            .expect("override mutex poisoned")
            .insert(name.trim().to_uppercase(), abbreviation.to_string());
    }

    pub(crate) fn usage(&self, name: &str) -> u64 {
        self.usage
            .lock()
            .expect("usage mutex poisoned")
            .get(&name.trim().to_uppercase())
            .copied()
            .unwrap_or_default()
    }
}

impl AbbreviationStore for InMemoryAbbreviationStore {
    fn lookup(&self, name: &str) -> Result<Option<String>, RepositoryError> {
        let guard = self
            .overrides
            .lock()
            .map_err(|_| RepositoryError::Unavailable("override mutex poisoned".to_string()))?;
        Ok(guard.get(name).cloned())
    }

    fn record_usage(&self, name: &str) -> Result<(), RepositoryError> {
        let mut guard = self
            .usage
            .lock()
            .map_err(|_| RepositoryError::Unavailable("usage mutex poisoned".to_string()))?;
        *guard.entry(name.to_string()).or_default() += 1;
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEntityDirectory {
    entities: Arc<RwLock<HashMap<EntityId, AuthoritativeEntity>>>,
}

impl InMemoryEntityDirectory {
    pub(crate) fn from_entities(entities: HashMap<EntityId, AuthoritativeEntity>) -> Self {
        Self {
            entities: Arc::new(RwLock::new(entities)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entities.read().expect("directory lock poisoned").len()
    }
}

impl EntityDirectory for InMemoryEntityDirectory {
    fn authoritative(&self, id: &EntityId) -> Result<Option<AuthoritativeEntity>, RepositoryError> {
        let guard = self
            .entities
            .read()
            .map_err(|_| RepositoryError::Unavailable("directory lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}

/// Crew member and ship used by the demo and by `serve` when no directory file is given.
pub(crate) fn sample_entities() -> HashMap<EntityId, AuthoritativeEntity> {
    let mut entities = HashMap::new();
    entities.insert(
        EntityId("crew-0042".to_string()),
        AuthoritativeEntity {
            name: "NGUYEN VAN AN".to_string(),
            name_alt: Some("AN NGUYEN".to_string()),
            date_of_birth: Some("1988-04-12".to_string()),
            imo: None,
            anniversary: None,
        },
    );
    entities.insert(
        EntityId("ship-0007".to_string()),
        AuthoritativeEntity {
            name: "PACIFIC STAR".to_string(),
            name_alt: None,
            date_of_birth: None,
            imo: Some("9234567".to_string()),
            anniversary: Some(ShipAnniversary { day: 15, month: 3 }),
        },
    );
    entities
}

/// Reads a JSON object of `entity_id -> authoritative entity`.
pub(crate) fn load_entities(
    path: &Path,
) -> Result<HashMap<EntityId, AuthoritativeEntity>, std::io::Error> {
    let raw = std::fs::read_to_string(path)?;
    let parsed: HashMap<String, AuthoritativeEntity> = serde_json::from_str(&raw)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    Ok(parsed
        .into_iter()
        .map(|(id, entity)| (EntityId(id), entity))
        .collect())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
