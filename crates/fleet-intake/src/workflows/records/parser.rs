use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::certificates::domain::ExistingRecord;

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CertificateRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();

    for row in csv_reader.deserialize::<CertificateRow>() {
        rows.push(row?);
    }

    Ok(rows)
}

/// One exported certificate row. Blank cells deserialize as absent.
#[derive(Debug, Deserialize)]
pub(crate) struct CertificateRow {
    #[serde(default)]
    pub(crate) id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cert_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cert_abbreviation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cert_no: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    issue_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    valid_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_endorse: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    next_survey: Option<String>,
    #[serde(default)]
    pub(crate) company_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    ship_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    crew_id: Option<String>,
}

impl CertificateRow {
    pub(crate) fn into_record(self) -> ExistingRecord {
        ExistingRecord {
            id: self.id,
            cert_name: self.cert_name,
            cert_abbreviation: self.cert_abbreviation,
            cert_no: self.cert_no,
            issue_date: self.issue_date,
            valid_date: self.valid_date,
            last_endorse: self.last_endorse,
            next_survey: self.next_survey,
            company_id: self.company_id,
            ship_id: self.ship_id,
            crew_id: self.crew_id,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
