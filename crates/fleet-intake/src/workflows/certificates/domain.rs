use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifier of the crew member, ship or company an upload claims to belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub String);

/// Fields produced by the OCR/LLM extractor for a single uploaded document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedRecord {
    pub raw_name: String,
    pub note: String,
    pub rank: String,
    pub document_summary: String,
    pub holder_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub cert_no: Option<String>,
    pub issued_by: Option<String>,
    pub issued_date: Option<String>,
    pub expiry_date: Option<String>,
    pub last_endorse: Option<String>,
    pub ship_name: Option<String>,
    pub imo_number: Option<String>,
}

/// Ownership keys used to narrow the existing-record lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordScope {
    pub company_id: String,
    #[serde(default)]
    pub ship_id: Option<String>,
    #[serde(default)]
    pub crew_id: Option<String>,
}

impl RecordScope {
    /// True when `record` sits under this scope. Unset ship/crew keys match any value.
    pub fn contains(&self, record: &ExistingRecord) -> bool {
        if record.company_id != self.company_id {
            return false;
        }
        let ship_ok = match &self.ship_id {
            Some(ship_id) => record.ship_id.as_deref() == Some(ship_id.as_str()),
            None => true,
        };
        let crew_ok = match &self.crew_id {
            Some(crew_id) => record.crew_id.as_deref() == Some(crew_id.as_str()),
            None => true,
        };
        ship_ok && crew_ok
    }
}

/// Previously persisted certificate, read-only from the pipeline's perspective.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExistingRecord {
    pub id: String,
    pub cert_name: Option<String>,
    pub cert_abbreviation: Option<String>,
    pub cert_no: Option<String>,
    pub issue_date: Option<String>,
    pub valid_date: Option<String>,
    pub last_endorse: Option<String>,
    pub next_survey: Option<String>,
    pub company_id: String,
    pub ship_id: Option<String>,
    pub crew_id: Option<String>,
}

/// Ship registry anniversary; only day and month are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipAnniversary {
    pub day: u32,
    pub month: u32,
}

impl ShipAnniversary {
    /// Occurrence in `year`, clamping 29 February to the 28th on common years.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day).or_else(|| {
            if self.month == 2 && self.day == 29 {
                NaiveDate::from_ymd_opt(year, 2, 28)
            } else {
                None
            }
        })
    }

    /// First occurrence on or after `today`.
    pub fn next_on_or_after(&self, today: NaiveDate) -> Option<NaiveDate> {
        let this_year = self.in_year(today.year())?;
        if this_year >= today {
            Some(this_year)
        } else {
            self.in_year(today.year() + 1)
        }
    }

    pub fn one_year_after_next(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.next_on_or_after(today)?
            .checked_add_months(Months::new(12))
    }
}

/// Identity record the mismatch guard compares extracted fields against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthoritativeEntity {
    pub name: String,
    pub name_alt: Option<String>,
    pub date_of_birth: Option<String>,
    pub imo: Option<String>,
    pub anniversary: Option<ShipAnniversary>,
}

/// Normalized certificate assembled by the pipeline, ready for the caller to persist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateDraft {
    pub cert_name: String,
    pub cert_abbreviation: String,
    pub cert_no: Option<String>,
    pub issued_by: Option<String>,
    pub issued_by_abbreviation: Option<String>,
    pub issue_date: Option<String>,
    pub valid_date: Option<String>,
    pub last_endorse: Option<String>,
    pub holder_name: Option<String>,
    pub notes: Vec<String>,
}
