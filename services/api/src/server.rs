use crate::cli::ServeArgs;
use crate::infra::{
    load_entities, sample_entities, AppState, InMemoryAbbreviationStore, InMemoryEntityDirectory,
    InMemoryRecordRepository,
};
use crate::routes::with_certificate_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fleet_intake::config::AppConfig;
use fleet_intake::error::AppError;
use fleet_intake::telemetry;
use fleet_intake::workflows::certificates::CertificateIntakeService;
use fleet_intake::workflows::records::ExistingRecordImporter;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let records = match args.records.as_deref() {
        Some(path) => ExistingRecordImporter::from_path(path)?,
        None => Vec::new(),
    };
    let entities = match args.entities.as_deref() {
        Some(path) => load_entities(path)?,
        None => sample_entities(),
    };

    let repository = InMemoryRecordRepository::from_records(records);
    let directory = InMemoryEntityDirectory::from_entities(entities);
    info!(
        records = repository.len(),
        entities = directory.len(),
        "collaborators hydrated"
    );

    let intake_service = Arc::new(CertificateIntakeService::new(
        Arc::new(repository),
        Arc::new(InMemoryAbbreviationStore::default()),
        Arc::new(directory),
        &config.intake,
    ));

    let app = with_certificate_routes(intake_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "certificate intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
