use crate::cli::ServeArgs;
use crate::infra::{build_quiz_service, AppState};
use crate::routes::with_quiz_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use vark_quiz::config::AppConfig;
use vark_quiz::error::AppError;
use vark_quiz::telemetry;

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    if !config.recommendation.is_configured() {
        warn!("GEMINI_API_KEY not set; recommendations will be unavailable");
    }

    let quiz_service = Arc::new(build_quiz_service(&config, None));

    let app = with_quiz_routes(quiz_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "vark quiz service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
