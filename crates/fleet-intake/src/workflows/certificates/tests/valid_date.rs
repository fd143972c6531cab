use pretty_assertions::assert_eq;

use super::common::*;
use crate::workflows::certificates::domain::{ExistingRecord, ShipAnniversary};
use crate::workflows::certificates::normalizer::AbbreviationRules;
use crate::workflows::certificates::valid_date::{
    MaintenanceIntervals, ValidDateCalculator, ValidDateHints, ValidDateResolution, ValidDateSource,
};

fn radio_record() -> ExistingRecord {
    ExistingRecord {
        id: "cert-300".to_string(),
        cert_name: Some("Cargo Ship Safety Radio Certificate".to_string()),
        next_survey: Some("2027-05-20".to_string()),
        valid_date: Some("2030-05-20".to_string()),
        company_id: COMPANY.to_string(),
        ship_id: Some(SHIP_ID.to_string()),
        ..ExistingRecord::default()
    }
}

#[test]
fn note_naming_a_certificate_uses_its_next_survey() {
    let hints = ValidDateHints {
        note: "Due per cargo ship safety radio certificate survey",
        ..ValidDateHints::default()
    };
    let resolved = ValidDateCalculator::default().calculate(&hints, &[radio_record()], today());
    assert_eq!(
        resolved,
        Some(ValidDateResolution {
            date: date(2027, 5, 20),
            source: ValidDateSource::CrossReference,
        })
    );
}

#[test]
fn note_with_abbreviation_matches_generated_abbreviation() {
    let record = ExistingRecord {
        next_survey: None,
        ..radio_record()
    };
    let hints = ValidDateHints {
        note: "Aligned with CSSR expiry",
        ..ValidDateHints::default()
    };
    let resolved = ValidDateCalculator::default()
        .calculate(&hints, &[record], today())
        .expect("resolved");
    assert_eq!(resolved.date, date(2030, 5, 20));
    assert_eq!(resolved.source, ValidDateSource::CrossReference);
}

#[test]
fn stored_abbreviation_takes_precedence_over_generated() {
    let record = ExistingRecord {
        cert_abbreviation: Some("SRC".to_string()),
        ..radio_record()
    };
    let calculator = ValidDateCalculator::default();

    let by_stored = ValidDateHints {
        note: "see SRC",
        ..ValidDateHints::default()
    };
    assert!(calculator
        .calculate(&by_stored, std::slice::from_ref(&record), today())
        .is_some());

    let by_generated = ValidDateHints {
        note: "see CSSR",
        ..ValidDateHints::default()
    };
    assert_eq!(calculator.calculate(&by_generated, &[record], today()), None);
}

#[test]
fn equipment_interval_applies_when_no_cross_reference() {
    let hints = ValidDateHints {
        issued_date: Some("15/06/2026"),
        note: "annual service",
        equipment_name: "Inflatable Liferaft Service Certificate",
        anniversary: Some(ShipAnniversary { day: 1, month: 1 }),
    };
    let resolved = ValidDateCalculator::default()
        .calculate(&hints, &[radio_record()], today())
        .expect("resolved");
    assert_eq!(resolved.date, date(2027, 6, 15));
    assert_eq!(resolved.source, ValidDateSource::MaintenanceInterval);
}

#[test]
fn interval_without_issue_date_falls_through_to_anniversary() {
    let hints = ValidDateHints {
        issued_date: None,
        equipment_name: "Chemical Suit",
        anniversary: Some(ShipAnniversary { day: 15, month: 3 }),
        ..ValidDateHints::default()
    };
    let resolved = ValidDateCalculator::default()
        .calculate(&hints, &[], today())
        .expect("resolved");
    // Next 15 March after 16 Oct 2026 is 2027-03-15, plus one year.
    assert_eq!(resolved.date, date(2028, 3, 15));
    assert_eq!(resolved.source, ValidDateSource::Anniversary);
}

#[test]
fn custom_interval_table_is_honoured() {
    let calculator = ValidDateCalculator::new(
        MaintenanceIntervals::new(vec![("gas detector".to_string(), 6)]),
        AbbreviationRules::standard(),
    );
    let hints = ValidDateHints {
        issued_date: Some("2026-01-31"),
        equipment_name: "Portable Gas Detector calibration",
        ..ValidDateHints::default()
    };
    let resolved = calculator.calculate(&hints, &[], today()).expect("resolved");
    assert_eq!(resolved.date, date(2026, 7, 31));
}

#[test]
fn nothing_to_go_on_yields_none() {
    let hints = ValidDateHints {
        issued_date: Some("2026-01-01"),
        note: "no reference",
        equipment_name: "Document of Compliance",
        anniversary: None,
    };
    assert_eq!(
        ValidDateCalculator::default().calculate(&hints, &[radio_record()], today()),
        None
    );
}
