//! Request handlers.
//!
//! Registry calls hold a std mutex and touch disk, so they run on the
//! blocking pool.

use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{Field, MultipartRejection},
    },
};
use schoolreg_core::{ImageUpload, RegistryError, SchoolSubmission};
use tracing::info;

use super::AppState;
use super::error::ApiError;
use super::types::{CreatedResponse, HealthResponse, ListResponse};

const ADD_FAILED: &str = "Failed to add school";
const FETCH_FAILED: &str = "Failed to fetch schools";

/// Form field carrying the image file.
pub const IMAGE_FIELD: &str = "image";

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// `POST /api/schools`
pub async fn create_school(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let submission = read_submission(multipart?).await?;

    let registry = state.registry.clone();
    let registered = tokio::task::spawn_blocking(move || {
        let mut registry = registry.lock().map_err(|_| RegistryError::LockPoisoned)?;
        registry.register(submission)
    })
    .await
    .map_err(|e| ApiError::internal(ADD_FAILED, e))?
    .map_err(|e| ApiError::from_registry(e, ADD_FAILED))?;

    info!(id = %registered.id, image = %registered.image, "school registered");
    Ok(Json(CreatedResponse::new(registered.id)))
}

/// `GET /api/schools`
pub async fn list_schools(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
    let registry = state.registry.clone();
    let schools = tokio::task::spawn_blocking(move || {
        let registry = registry.lock().map_err(|_| RegistryError::LockPoisoned)?;
        registry.list()
    })
    .await
    .map_err(|e| ApiError::internal(FETCH_FAILED, e))?
    .map_err(|e| ApiError::from_registry(e, FETCH_FAILED))?;

    Ok(Json(ListResponse {
        success: true,
        schools,
    }))
}

/// Drain the multipart body into a submission. Unknown fields are skipped.
async fn read_submission(mut multipart: Multipart) -> Result<SchoolSubmission, ApiError> {
    let mut submission = SchoolSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == IMAGE_FIELD {
            submission.image = Some(read_image(field).await?);
        } else if SchoolSubmission::TEXT_FIELDS.contains(&name.as_str()) {
            let value = field.text().await?;
            submission.set_text(&name, value);
        }
    }

    Ok(submission)
}

async fn read_image(field: Field<'_>) -> Result<ImageUpload, ApiError> {
    let file_name = field.file_name().unwrap_or_default().to_owned();
    let bytes = field.bytes().await?;
    Ok(ImageUpload::new(file_name, bytes.to_vec()))
}
