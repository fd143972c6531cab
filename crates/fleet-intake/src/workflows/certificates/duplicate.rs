//! Exact-match duplicate detection.
//!
//! A field counts only when it is present on both sides. The verdict is "duplicate" when
//! every counted field is equal after trimming and case folding and at least
//! `minimum_compared` fields were counted. Date fields compare as calendar dates when
//! they parse.

use serde::{Deserialize, Serialize};

use super::dates::parse_calendar_date;
use super::domain::{CertificateDraft, ExistingRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateField {
    CertName,
    CertNo,
    IssueDate,
    ValidDate,
    LastEndorse,
}

impl DuplicateField {
    fn is_date(&self) -> bool {
        matches!(
            self,
            DuplicateField::IssueDate | DuplicateField::ValidDate | DuplicateField::LastEndorse
        )
    }
}

/// Read access to the fields duplicate detection looks at.
pub trait ComparableCertificate {
    fn field_value(&self, field: DuplicateField) -> Option<&str>;
}

impl ComparableCertificate for CertificateDraft {
    fn field_value(&self, field: DuplicateField) -> Option<&str> {
        match field {
            DuplicateField::CertName => Some(self.cert_name.as_str()),
            DuplicateField::CertNo => self.cert_no.as_deref(),
            DuplicateField::IssueDate => self.issue_date.as_deref(),
            DuplicateField::ValidDate => self.valid_date.as_deref(),
            DuplicateField::LastEndorse => self.last_endorse.as_deref(),
        }
    }
}

impl ComparableCertificate for ExistingRecord {
    fn field_value(&self, field: DuplicateField) -> Option<&str> {
        match field {
            DuplicateField::CertName => self.cert_name.as_deref(),
            DuplicateField::CertNo => self.cert_no.as_deref(),
            DuplicateField::IssueDate => self.issue_date.as_deref(),
            DuplicateField::ValidDate => self.valid_date.as_deref(),
            DuplicateField::LastEndorse => self.last_endorse.as_deref(),
        }
    }
}

/// Field set plus the evidence threshold for a duplicate verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePolicy {
    fields: Vec<DuplicateField>,
    minimum_compared: usize,
}

impl DuplicatePolicy {
    pub fn new(fields: Vec<DuplicateField>, minimum_compared: usize) -> Self {
        Self {
            fields,
            minimum_compared: minimum_compared.max(1),
        }
    }

    /// Five-field check used on the primary intake path.
    pub fn enhanced(minimum_compared: usize) -> Self {
        Self::new(
            vec![
                DuplicateField::CertName,
                DuplicateField::CertNo,
                DuplicateField::IssueDate,
                DuplicateField::ValidDate,
                DuplicateField::LastEndorse,
            ],
            minimum_compared,
        )
    }

    /// Certificate number and name only.
    pub fn legacy() -> Self {
        Self::new(vec![DuplicateField::CertNo, DuplicateField::CertName], 2)
    }

    /// `Some(compared fields)` when `a` and `b` are duplicates under this policy.
    pub fn compare<A, B>(&self, a: &A, b: &B) -> Option<Vec<DuplicateField>>
    where
        A: ComparableCertificate + ?Sized,
        B: ComparableCertificate + ?Sized,
    {
        let mut compared = Vec::new();

        for field in &self.fields {
            let left = comparable_value(*field, a.field_value(*field));
            let right = comparable_value(*field, b.field_value(*field));
            if let (Some(left), Some(right)) = (left, right) {
                if left != right {
                    return None;
                }
                compared.push(*field);
            }
        }

        if compared.len() >= self.minimum_compared {
            Some(compared)
        } else {
            None
        }
    }
}

fn comparable_value(field: DuplicateField, value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if field.is_date() {
        if let Some(date) = parse_calendar_date(trimmed) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }
    Some(trimmed.to_uppercase())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    pub existing_id: String,
    pub compared_fields: Vec<DuplicateField>,
}

#[derive(Debug, Clone)]
pub struct DuplicateDetector {
    policy: DuplicatePolicy,
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self::new(DuplicatePolicy::enhanced(2))
    }
}

impl DuplicateDetector {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self { policy }
    }

    /// First existing record the candidate duplicates, in the order supplied.
    pub fn find_duplicate<C>(&self, candidate: &C, existing: &[ExistingRecord]) -> Option<DuplicateMatch>
    where
        C: ComparableCertificate + ?Sized,
    {
        existing.iter().find_map(|record| {
            self.policy
                .compare(candidate, record)
                .map(|compared_fields| DuplicateMatch {
                    existing_id: record.id.clone(),
                    compared_fields,
                })
        })
    }

    pub fn is_duplicate<C>(&self, candidate: &C, existing: &[ExistingRecord]) -> bool
    where
        C: ComparableCertificate + ?Sized,
    {
        self.find_duplicate(candidate, existing).is_some()
    }
}

/// Legacy all-or-nothing score over certificate number and name: 100 or 0.
pub fn similarity<A, B>(a: &A, b: &B) -> u8
where
    A: ComparableCertificate + ?Sized,
    B: ComparableCertificate + ?Sized,
{
    if DuplicatePolicy::legacy().compare(a, b).is_some() {
        100
    } else {
        0
    }
}
