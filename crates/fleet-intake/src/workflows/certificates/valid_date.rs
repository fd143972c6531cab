//! Fallback derivation of a valid-until date when extraction produced none.
//!
//! Tiers run in order and stop at the first hit: a cross-referenced certificate named in the
//! note, a regulatory maintenance interval keyed on the equipment name, then the ship's
//! anniversary projected forward one year.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dates::parse_calendar_date;
use super::domain::{ExistingRecord, ShipAnniversary};
use super::normalizer::{AbbreviationKind, AbbreviationRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidDateSource {
    CrossReference,
    MaintenanceInterval,
    Anniversary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidDateResolution {
    pub date: NaiveDate,
    pub source: ValidDateSource,
}

/// Equipment-name fragment → service interval in months. First fragment contained wins.
#[derive(Debug, Clone)]
pub struct MaintenanceIntervals {
    entries: Vec<(String, u32)>,
}

impl MaintenanceIntervals {
    pub fn new(entries: Vec<(String, u32)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(fragment, months)| (fragment.to_lowercase(), months))
            .collect();
        Self { entries }
    }

    pub fn standard() -> Self {
        Self::new(
            [
                ("chemical suit", 12),
                ("chemical protective", 12),
                ("life raft", 12),
                ("liferaft", 12),
                ("eebd", 12),
                ("breathing apparatus", 12),
                ("fire extinguisher", 12),
                ("epirb", 12),
                ("hydrostatic release", 24),
                ("immersion suit", 36),
            ]
            .into_iter()
            .map(|(fragment, months)| (fragment.to_string(), months))
            .collect(),
        )
    }

    pub fn months_for(&self, equipment_name: &str) -> Option<u32> {
        let needle = equipment_name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(fragment, _)| needle.contains(fragment.as_str()))
            .map(|(_, months)| *months)
    }
}

impl Default for MaintenanceIntervals {
    fn default() -> Self {
        Self::standard()
    }
}

/// Inputs the calculator reads from the upload itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidDateHints<'a> {
    pub issued_date: Option<&'a str>,
    pub note: &'a str,
    pub equipment_name: &'a str,
    pub anniversary: Option<ShipAnniversary>,
}

#[derive(Debug, Clone)]
pub struct ValidDateCalculator {
    intervals: MaintenanceIntervals,
    rules: AbbreviationRules,
}

impl Default for ValidDateCalculator {
    fn default() -> Self {
        Self::new(MaintenanceIntervals::standard(), AbbreviationRules::standard())
    }
}

impl ValidDateCalculator {
    pub fn new(intervals: MaintenanceIntervals, rules: AbbreviationRules) -> Self {
        Self { intervals, rules }
    }

    pub fn calculate(
        &self,
        hints: &ValidDateHints<'_>,
        existing: &[ExistingRecord],
        today: NaiveDate,
    ) -> Option<ValidDateResolution> {
        let resolution = self
            .from_cross_reference(hints.note, existing)
            .map(|date| (date, ValidDateSource::CrossReference))
            .or_else(|| {
                self.from_interval(hints.issued_date, hints.equipment_name)
                    .map(|date| (date, ValidDateSource::MaintenanceInterval))
            })
            .or_else(|| {
                hints
                    .anniversary
                    .and_then(|anniversary| anniversary.one_year_after_next(today))
                    .map(|date| (date, ValidDateSource::Anniversary))
            })
            .map(|(date, source)| ValidDateResolution { date, source });

        if let Some(resolution) = &resolution {
            debug!(source = ?resolution.source, date = %resolution.date, "valid date derived");
        }
        resolution
    }

    fn from_cross_reference(&self, note: &str, existing: &[ExistingRecord]) -> Option<NaiveDate> {
        let note_upper = note.to_uppercase();
        if note_upper.trim().is_empty() {
            return None;
        }
        let note_words: Vec<String> = note_upper
            .split(|ch: char| !ch.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect();

        existing
            .iter()
            .filter(|record| self.is_referenced(record, &note_upper, &note_words))
            .find_map(|record| {
                record
                    .next_survey
                    .as_deref()
                    .and_then(parse_calendar_date)
                    .or_else(|| record.valid_date.as_deref().and_then(parse_calendar_date))
            })
    }

    fn is_referenced(&self, record: &ExistingRecord, note_upper: &str, note_words: &[String]) -> bool {
        let Some(name) = record
            .cert_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        else {
            return false;
        };

        if note_upper.contains(&name.to_uppercase()) {
            return true;
        }

        let abbreviation = record
            .cert_abbreviation
            .as_deref()
            .map(|value| value.trim().to_uppercase())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.rules.algorithmic(name, AbbreviationKind::Certificate));

        abbreviation.chars().count() >= 2 && note_words.iter().any(|word| *word == abbreviation)
    }

    fn from_interval(&self, issued_date: Option<&str>, equipment_name: &str) -> Option<NaiveDate> {
        let months = self.intervals.months_for(equipment_name)?;
        parse_calendar_date(issued_date?)?.checked_add_months(Months::new(months))
    }
}
