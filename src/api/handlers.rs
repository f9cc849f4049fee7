use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use log::warn;
use serde::Serialize;
use std::sync::Arc;

use crate::model::{Vehicle, VehicleFields, VehicleId};
use crate::store::{StoreError, VehicleStore};

pub type AppState<S> = Arc<S>;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub const WELCOME_MESSAGE: &str = "Bienvenido a mi primera API Rest!";
pub const NOT_FOUND_MESSAGE: &str = "Vehículo no encontrado.";
pub const DELETED_MESSAGE: &str = "Vehículo eliminado correctamente.";
pub const SAVE_FAILED_MESSAGE: &str = "Error al guardar los datos en el archivo.";
pub const READ_FAILED_MESSAGE: &str = "Error al leer los datos del archivo.";
pub const INVALID_ID_MESSAGE: &str = "El ID del vehículo debe ser un entero positivo.";
pub const IDS_EXHAUSTED_MESSAGE: &str = "No quedan IDs disponibles para nuevos vehículos.";

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<StoreError> for ErrorResponse {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => ErrorResponse::new(NOT_FOUND_MESSAGE),
            StoreError::Unavailable { .. } => ErrorResponse::new(READ_FAILED_MESSAGE),
            StoreError::Persistence { .. } => ErrorResponse::new(SAVE_FAILED_MESSAGE),
            StoreError::IdsExhausted => ErrorResponse::new(IDS_EXHAUSTED_MESSAGE),
        }
    }
}

fn store_error(e: StoreError) -> ApiError {
    let status = match &e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Unavailable { .. }
        | StoreError::Persistence { .. }
        | StoreError::IdsExhausted => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::from(e)))
}

// Reject malformed ids here so they never reach the store as a value that can't match
fn parse_vehicle_id(raw: &str) -> Result<VehicleId, ApiError> {
    raw.parse::<VehicleId>().map_err(|e| {
        warn!("rejected request: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(INVALID_ID_MESSAGE)),
        )
    })
}

// Body rejections keep axum's status code but answer with the usual error shape
fn request_body<T>(body: Result<RequestJson<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|RequestJson(value)| value).map_err(|rejection| {
        warn!("rejected request body: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ErrorResponse::new(&rejection.body_text())),
        )
    })
}

pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

// Vehicle handlers
pub async fn list_vehicles<S: VehicleStore>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<Vehicle>>, ApiError> {
    store.list().await.map(Json).map_err(store_error)
}

pub async fn get_vehicle<S: VehicleStore>(
    State(store): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vehicle>, ApiError> {
    let id = parse_vehicle_id(&raw_id)?;
    store.get(id).await.map(Json).map_err(store_error)
}

pub async fn create_vehicle<S: VehicleStore>(
    State(store): State<AppState<S>>,
    body: Result<RequestJson<VehicleFields>, JsonRejection>,
) -> Result<Json<Vehicle>, ApiError> {
    let fields = request_body(body)?;
    store.create(fields).await.map(Json).map_err(store_error)
}

pub async fn update_vehicle<S: VehicleStore>(
    State(store): State<AppState<S>>,
    Path(raw_id): Path<String>,
    body: Result<RequestJson<VehicleFields>, JsonRejection>,
) -> Result<Json<Vehicle>, ApiError> {
    let id = parse_vehicle_id(&raw_id)?;
    let fields = request_body(body)?;
    store.update(id, fields).await.map(Json).map_err(store_error)
}

pub async fn delete_vehicle<S: VehicleStore>(
    State(store): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_vehicle_id(&raw_id)?;
    match store.delete(id).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: DELETED_MESSAGE.to_string(),
        })),
        Err(e) => Err(store_error(e)),
    }
}
