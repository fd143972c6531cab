use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::workflows::certificates::classifier::{
    catalog, CertificateClassifier, ClassificationInput, Keyword, KeywordCatalog, KeywordSet,
    PriorityRule, PriorityTier,
};

fn classify(raw_name: &str, note: &str, rank: &str, summary: &str) -> String {
    CertificateClassifier::default().classify_fields(raw_name, note, rank, summary)
}

#[test]
fn seaman_book_with_radio_qualification_is_gmdss_sub_label() {
    assert_eq!(
        classify(
            "",
            "SEAMAN'S BOOK No. 12345 GMDSS GENERAL OPERATOR IV/2",
            "",
            ""
        ),
        catalog::SEAMAN_BOOK_GMDSS
    );
}

#[test]
fn seaman_book_with_officer_code_is_coc_sub_label() {
    assert_eq!(
        classify("", "Seaman's book, endorsed for II/2 chief mate", "", ""),
        catalog::SEAMAN_BOOK_COC
    );
}

#[test]
fn plain_seaman_book_stays_generic() {
    assert_eq!(
        classify("Discharge Book", "", "", ""),
        catalog::SEAMAN_BOOK
    );
}

#[test]
fn rank_with_endorsement_keyword_switches_to_endorsement() {
    assert_eq!(
        classify("", "MASTER MARINER ENDORSEMENT", "MASTER", ""),
        catalog::ENDORSEMENT
    );
    assert_eq!(
        classify("", "Master mariner", "Master", ""),
        catalog::COMPETENCY
    );
}

#[test]
fn radio_code_does_not_fire_inside_officer_codes() {
    let result = CertificateClassifier::default().classify(&ClassificationInput {
        note: "Regulation III/2 second engineer".to_string(),
        ..ClassificationInput::default()
    });
    assert_eq!(result.canonical_type, catalog::COMPETENCY);
    assert_eq!(result.priority_tier, PriorityTier::Rank);
}

#[test]
fn standalone_radio_code_fires_tier_one() {
    let result = CertificateClassifier::default().classify(&ClassificationInput {
        document_summary: "Certificate issued under IV/2".to_string(),
        ..ClassificationInput::default()
    });
    assert_eq!(result.canonical_type, catalog::GMDSS);
    assert_eq!(result.priority_tier, PriorityTier::RadioQualification);
    assert_eq!(result.matched_keyword.as_deref(), Some("IV/2"));
}

#[test]
fn navigational_watch_phrase_is_competency() {
    let result = CertificateClassifier::default().classify(&ClassificationInput {
        note: "Officer in charge of a navigational watch on ships of 500 GT".to_string(),
        ..ClassificationInput::default()
    });
    assert_eq!(result.canonical_type, catalog::COMPETENCY);
    assert_eq!(result.priority_tier, PriorityTier::NavigationalWatch);
}

#[test]
fn training_dictionary_respects_insertion_order() {
    // Both security officer and basic safety appear; the security officer entry comes first.
    assert_eq!(
        classify("", "Basic safety refresher; ship security officer course", "", ""),
        catalog::SHIP_SECURITY_OFFICER
    );
    assert_eq!(classify("", "ECDIS generic", "", ""), catalog::ECDIS);
}

#[test]
fn rank_pre_empts_resource_management() {
    assert_eq!(
        classify("", "Chief Mate competency incl. Bridge Resource Management", "", ""),
        catalog::COMPETENCY
    );
    assert_eq!(
        classify("", "Bridge Resource Management course", "", ""),
        catalog::BRIDGE_RESOURCE_MANAGEMENT
    );
}

#[test]
fn fire_fighting_and_medical_dictionary_entries_resolve() {
    let cases = [
        ("Advanced Fire Fighting course", catalog::ADVANCED_FIRE_FIGHTING),
        ("ADVANCED FIRE-FIGHTING", catalog::ADVANCED_FIRE_FIGHTING),
        ("advanced firefighting (STCW A-VI/3)", catalog::ADVANCED_FIRE_FIGHTING),
        ("Medical First Aid on board", catalog::MEDICAL_FIRST_AID),
        ("MEDICAL CARE (STCW A-VI/4-2)", catalog::MEDICAL_CARE),
        ("Medical fitness for sea service", catalog::MEDICAL),
        ("Seafarer medical examination report", catalog::MEDICAL),
        ("MEDICAL CERTIFICATE", catalog::MEDICAL),
    ];

    for (note, expected) in cases {
        let result = CertificateClassifier::default().classify(&ClassificationInput {
            note: note.to_string(),
            ..ClassificationInput::default()
        });
        assert_eq!(result.canonical_type, expected, "note: {note}");
        assert_eq!(result.priority_tier, PriorityTier::Training, "note: {note}");
    }
}

#[test]
fn earlier_dictionary_entry_wins_when_several_appear() {
    assert_eq!(
        classify("", "Medical First Aid and Advanced Fire Fighting", "", ""),
        catalog::ADVANCED_FIRE_FIGHTING
    );
    assert_eq!(
        classify("", "Medical care, includes medical first aid", "", ""),
        catalog::MEDICAL_FIRST_AID
    );
    assert_eq!(
        classify("", "Medical certificate issued after medical care course", "", ""),
        catalog::MEDICAL_CARE
    );
}

#[test]
fn extractor_name_is_returned_verbatim_when_nothing_fires() {
    let result = CertificateClassifier::default().classify(&ClassificationInput {
        raw_name: "  Ballast Water Management Plan ".to_string(),
        ..ClassificationInput::default()
    });
    assert_eq!(result.canonical_type, "  Ballast Water Management Plan ");
    assert_eq!(result.priority_tier, PriorityTier::ExtractorName);
    assert_eq!(result.matched_keyword, None);
}

#[test]
fn empty_inputs_classify_as_unknown() {
    let result = CertificateClassifier::default().classify(&ClassificationInput::default());
    assert_eq!(result.canonical_type, catalog::UNKNOWN);
    assert!(result.is_unknown());
}

#[test]
fn injected_catalog_replaces_standard_rules() {
    let rule = PriorityRule::new(
        PriorityTier::Training,
        KeywordSet::new(vec![Keyword::phrase("YELLOW FEVER")]).expect("compiles"),
        catalog::YELLOW_FEVER,
    );
    let classifier = CertificateClassifier::new(KeywordCatalog::new(vec![rule]));

    assert_eq!(
        classifier.classify_fields("", "Seaman's book", "", ""),
        catalog::UNKNOWN
    );
    assert_eq!(
        classifier.classify_fields("", "yellow fever vaccination", "", ""),
        catalog::YELLOW_FEVER
    );
}

fn identity_keyword() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "SEAMAN'S BOOK",
        "Seaman book",
        "DISCHARGE BOOK",
        "seafarer's identity document",
    ])
}

fn rank_keyword() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "MASTER",
        "Chief Engineer",
        "second officer",
        "C/O",
        "III/1",
    ])
}

proptest! {
    #[test]
    fn identity_document_always_beats_rank(
        identity in identity_keyword(),
        rank in rank_keyword(),
        filler in "[a-z ]{0,20}",
    ) {
        let label = classify("", &format!("{filler} {identity} {filler}"), rank, "");
        prop_assert!(
            [catalog::SEAMAN_BOOK, catalog::SEAMAN_BOOK_COC, catalog::SEAMAN_BOOK_GMDSS]
                .contains(&label.as_str()),
            "unexpected label {label}"
        );
    }

    #[test]
    fn classification_is_idempotent_and_never_empty(
        raw_name in "\\PC{0,30}",
        note in "\\PC{0,60}",
        rank in "\\PC{0,20}",
    ) {
        let classifier = CertificateClassifier::default();
        let first = classifier.classify_fields(&raw_name, &note, &rank, "");
        let second = classifier.classify_fields(&raw_name, &note, &rank, "");
        prop_assert_eq!(&first, &second);
        prop_assert!(!first.is_empty());
    }

    #[test]
    fn empty_name_outputs_are_catalog_labels(note in "\\PC{0,60}", rank in "\\PC{0,20}") {
        let label = classify("", &note, &rank, "");
        prop_assert!(catalog::is_canonical(&label), "non-catalog label {label}");
    }
}
