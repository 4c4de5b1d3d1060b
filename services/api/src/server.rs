use crate::cli::ServeArgs;
use crate::infra::{load_snapshot, load_table, override_paths, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use enade_insights::api::InsightsService;
use enade_insights::config::AppConfig;
use enade_insights::error::AppError;
use enade_insights::survey::DimensionRegistry;
use enade_insights::telemetry;
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
    override_paths(&mut config.data, args.dataset.take(), args.snapshot.take());

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let registry = DimensionRegistry::standard();
    let table = load_table(&config)?;
    let snapshot = load_snapshot(
        &config.data,
        &config.benchmark,
        &registry,
        &table,
        args.rebuild_snapshot,
    )?;

    let service = Arc::new(InsightsService::new(
        registry,
        Arc::new(table),
        Arc::new(snapshot),
        config.benchmark.to_benchmark(),
    ));

    let app = with_service_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        institution = %config.benchmark.institution,
        "enade insights service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
