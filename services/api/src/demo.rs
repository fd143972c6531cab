use crate::infra::{
    sample_entities, InMemoryAbbreviationStore, InMemoryEntityDirectory,
    InMemoryRecordRepository, IntakeService,
};
use chrono::{NaiveDate, Utc};
use clap::Args;
use fleet_intake::config::AppConfig;
use fleet_intake::error::AppError;
use fleet_intake::workflows::certificates::{
    catalog, BypassFlags, EntityId, ExtractedRecord, IntakeDecision, IntakeRequest, Locale,
    RecordScope, SubjectKind,
};
use fleet_intake::workflows::records::ExistingRecordImporter;
use std::path::PathBuf;
use std::sync::Arc;

const SAMPLE_RECORDS: &str = "\
id,cert_name,cert_abbreviation,cert_no,issue_date,valid_date,last_endorse,next_survey,company_id,ship_id,crew_id
cert-002,Basic Safety Training (BST),BST,BST-88120,12/03/2022,12/03/2027,,,pacific-line,,crew-0042
cert-003,Cargo Ship Safety Radio Certificate,CSSR,R-5521,2023-05-21,2028-05-20,2025-05-18,2027-05-20,pacific-line,ship-0007,
";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluate statuses as of this date (YYYY-MM-DD, defaults to now)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// CSV export of existing certificates to use instead of the built-in sample
    #[arg(long)]
    pub(crate) records: Option<PathBuf>,
}

struct Scenario {
    title: &'static str,
    request: IntakeRequest,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let now = args
        .today
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now);

    let records = match args.records {
        Some(path) => ExistingRecordImporter::from_path(path)?,
        None => ExistingRecordImporter::from_reader(SAMPLE_RECORDS.as_bytes())?,
    };

    let abbreviations = InMemoryAbbreviationStore::default();
    abbreviations.set_override(catalog::BASIC_SAFETY, "BST");

    let service: IntakeService = IntakeService::new(
        Arc::new(InMemoryRecordRepository::from_records(records)),
        Arc::new(abbreviations.clone()),
        Arc::new(InMemoryEntityDirectory::from_entities(sample_entities())),
        &config.intake,
    );

    println!("Certificate intake demo ({})", now.format("%Y-%m-%d"));
    for scenario in scenarios() {
        let decision = service.assess_at(scenario.request, now)?;
        render_decision(scenario.title, &decision);
    }

    println!(
        "\nAbbreviation override '{}' used {} time(s)",
        catalog::BASIC_SAFETY,
        abbreviations.usage(catalog::BASIC_SAFETY)
    );
    Ok(())
}

fn crew_request(extracted: ExtractedRecord, bypass: BypassFlags) -> IntakeRequest {
    IntakeRequest {
        scope: RecordScope {
            company_id: "pacific-line".to_string(),
            ship_id: None,
            crew_id: Some("crew-0042".to_string()),
        },
        entity_id: EntityId("crew-0042".to_string()),
        subject: SubjectKind::Crew,
        extracted,
        cert_type: Some("Full Term".to_string()),
        bypass,
    }
}

fn ship_request(extracted: ExtractedRecord) -> IntakeRequest {
    IntakeRequest {
        scope: RecordScope {
            company_id: "pacific-line".to_string(),
            ship_id: Some("ship-0007".to_string()),
            crew_id: None,
        },
        entity_id: EntityId("ship-0007".to_string()),
        subject: SubjectKind::Ship,
        extracted,
        cert_type: None,
        bypass: BypassFlags::default(),
    }
}

fn scenarios() -> Vec<Scenario> {
    let seaman_book = ExtractedRecord {
        raw_name: "Seaman's Book".to_string(),
        note: "GMDSS GENERAL OPERATOR IV/2".to_string(),
        holder_name: Some("Nguyen Van An".to_string()),
        date_of_birth: Some("12/04/1988".to_string()),
        cert_no: Some("SB-104233".to_string()),
        issued_by: Some("Viet Nam Maritime Administration".to_string()),
        issued_date: Some("2023-08-01".to_string()),
        expiry_date: Some("2028-07-31".to_string()),
        ..ExtractedRecord::default()
    };
    let bst_again = ExtractedRecord {
        raw_name: "Basic Training".to_string(),
        holder_name: Some("An Nguyen Van".to_string()),
        cert_no: Some("bst-88120".to_string()),
        issued_date: Some("2022-03-12".to_string()),
        expiry_date: Some("2027-03-12".to_string()),
        ..ExtractedRecord::default()
    };
    let wrong_holder = ExtractedRecord {
        raw_name: "Ship Security Officer".to_string(),
        holder_name: Some("Tran Thi Binh".to_string()),
        cert_no: Some("SSO-7781".to_string()),
        expiry_date: Some("2026-12-01".to_string()),
        ..ExtractedRecord::default()
    };
    let liferaft = ExtractedRecord {
        raw_name: "Liferaft Annual Service".to_string(),
        issued_date: Some("2026-09-01".to_string()),
        ship_name: Some("PACIFIC STAR I".to_string()),
        imo_number: Some("IMO 9234567".to_string()),
        ..ExtractedRecord::default()
    };
    let wrong_ship = ExtractedRecord {
        raw_name: "International Load Line Certificate".to_string(),
        ship_name: Some("PACIFIC STAR".to_string()),
        imo_number: Some("9876543".to_string()),
        expiry_date: Some("2030-01-01".to_string()),
        ..ExtractedRecord::default()
    };

    vec![
        Scenario {
            title: "Seaman's book carrying a radio endorsement",
            request: crew_request(seaman_book, BypassFlags::default()),
        },
        Scenario {
            title: "Basic training certificate uploaded twice",
            request: crew_request(bst_again, BypassFlags::default()),
        },
        Scenario {
            title: "Certificate issued to someone else",
            request: crew_request(wrong_holder.clone(), BypassFlags::default()),
        },
        Scenario {
            title: "Same upload after an operator override",
            request: crew_request(
                wrong_holder,
                BypassFlags {
                    holder_check: true,
                    ship_check: false,
                },
            ),
        },
        Scenario {
            title: "Liferaft service without an expiry date",
            request: ship_request(liferaft),
        },
        Scenario {
            title: "Load line certificate for another IMO",
            request: ship_request(wrong_ship),
        },
    ]
}

fn render_decision(title: &str, decision: &IntakeDecision) {
    println!("\n== {title}");
    println!("Outcome:          {:?}", decision.outcome);
    println!(
        "Certificate:      {} [{}] (tier {})",
        decision.draft.cert_name,
        decision.draft.cert_abbreviation,
        decision.classification.priority_tier.rank()
    );
    if let Some(issuer) = &decision.draft.issued_by {
        println!(
            "Issued by:        {} [{}]",
            issuer,
            decision.draft.issued_by_abbreviation.as_deref().unwrap_or("-")
        );
    }
    match (&decision.draft.valid_date, decision.valid_date_source) {
        (Some(date), Some(source)) => println!("Valid until:      {date} (derived from {source:?})"),
        (Some(date), None) => println!("Valid until:      {date}"),
        (None, _) => println!("Valid until:      -"),
    }
    println!(
        "Status:           {} / {}",
        decision.status.display(Locale::English),
        decision.status.display(Locale::Vietnamese)
    );
    if let Some(duplicate) = &decision.duplicate {
        println!(
            "Duplicate of:     {} ({} fields compared)",
            duplicate.existing_id,
            duplicate.compared_fields.len()
        );
    }
    for verdict in &decision.verdicts {
        println!("Identity:         {}", verdict.message.en);
        println!("                  {}", verdict.message.vi);
    }
    for note in &decision.draft.notes {
        println!("Note:             {note}");
    }
    for warning in &decision.warnings {
        println!("Warning:          {warning}");
    }
}
