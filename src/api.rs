use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    clients::{
        directory::DirectoryClient, localization::LocalizationClient,
        messaging::MessagingGatewayClient, sms::SmsManagerClient,
    },
    config::Config,
    error::NotificationError,
    models::{request::ReturnNotificationRequest, result::NotificationResult},
    workflow::ReturnNotificationService,
};

pub struct AppState {
    service: ReturnNotificationService,
}

pub async fn run_api_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let service = ReturnNotificationService::new(
        Arc::new(DirectoryClient::new(&config)?),
        Arc::new(LocalizationClient::new(&config)?),
        Arc::new(MessagingGatewayClient::new(&config)?),
        Arc::new(SmsManagerClient::new(&config)?),
    );

    let state = Arc::new(AppState { service });

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/notifications/return", post(return_notification))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Notification server started");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn return_notification(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReturnNotificationRequest>,
) -> Response {
    let trace_id = Uuid::new_v4();

    info!(
        trace_id = %trace_id,
        complaint_id = request.complaint_id,
        "Received return notification request"
    );

    match state.service.perform_return_notification(&request).await {
        Ok(result) => success_response(result),
        Err(e) => error_response(trace_id, e),
    }
}

fn success_response(result: NotificationResult) -> Response {
    (StatusCode::OK, Json(result)).into_response()
}

fn error_response(trace_id: Uuid, error: NotificationError) -> Response {
    let severity = error.severity();
    let status = match severity {
        400 => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    error!(
        trace_id = %trace_id,
        severity,
        message = %error,
        "Return notification failed"
    );

    let body = serde_json::json!({
        "error": error.to_string(),
        "severity": severity,
    });

    (status, Json(body)).into_response()
}
