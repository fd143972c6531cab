use crate::demo::{run_demo, DemoArgs};
use crate::infra::parse_date;
use crate::server;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fleet_intake::config::AppConfig;
use fleet_intake::error::AppError;
use fleet_intake::workflows::certificates::{
    CertificateClassifier, ClassificationInput, Locale, StatusCalculator,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Fleet Certificate Intake",
    about = "Classify, validate and serve maritime certificate uploads",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Classify a document from extractor text fields
    Classify(ClassifyArgs),
    /// Compute the validity status for an expiry date
    Status(StatusArgs),
    /// Run a scripted intake session against sample crew and ship records
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// CSV export of existing certificates used for duplicate and cross-reference checks
    #[arg(long)]
    pub(crate) records: Option<PathBuf>,
    /// JSON file mapping entity ids to authoritative crew/ship records
    #[arg(long)]
    pub(crate) entities: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ClassifyArgs {
    /// Extractor-guessed document title
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    /// Free-text note extracted from the document
    #[arg(long, default_value = "")]
    pub(crate) note: String,
    /// Seafarer rank or capacity
    #[arg(long, default_value = "")]
    pub(crate) rank: String,
    /// Full OCR text of the document
    #[arg(long, default_value = "")]
    pub(crate) summary: String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum DisplayLanguage {
    #[default]
    En,
    Vi,
}

impl From<DisplayLanguage> for Locale {
    fn from(value: DisplayLanguage) -> Self {
        match value {
            DisplayLanguage::En => Locale::English,
            DisplayLanguage::Vi => Locale::Vietnamese,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct StatusArgs {
    /// Expiry date or timestamp as printed on the certificate
    #[arg(long)]
    pub(crate) expiry: Option<String>,
    /// Term type for grace-period lookup (Full Term, Interim, Provisional, Short Term)
    #[arg(long)]
    pub(crate) cert_type: Option<String>,
    /// Evaluate as of this date (YYYY-MM-DD, defaults to now)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Language of the printed status label
    #[arg(long, value_enum, default_value_t = DisplayLanguage::En)]
    pub(crate) lang: DisplayLanguage,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Classify(args) => run_classify(args),
        Command::Status(args) => run_status(args),
        Command::Demo(args) => run_demo(args),
    }
}

fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let input = ClassificationInput {
        raw_name: args.name,
        note: args.note,
        rank: args.rank,
        document_summary: args.summary,
    };
    let result = CertificateClassifier::default().classify(&input);

    println!("Certificate type: {}", result.canonical_type);
    println!("Priority tier:    {}", result.priority_tier.rank());
    if let Some(keyword) = result.matched_keyword {
        println!("Matched keyword:  {keyword}");
    }
    Ok(())
}

fn run_status(args: StatusArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let calculator = StatusCalculator::from(&config.intake);
    let now = args
        .today
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now);

    let status = calculator.compute_status(args.expiry.as_deref(), args.cert_type.as_deref(), now);
    println!("{}", status.display(args.lang.into()));
    Ok(())
}
