use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::destinations::DestinationList,
    dto::images::ImageList,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::DestinationImage,
    response::ApiResponse,
    services::image_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/destinations", get(list_destinations))
        .route(
            "/destinations/{id}/images",
            get(list_images).post(upload_image),
        )
        .route(
            "/destinations/{id}/images/{img_id}/delete",
            post(delete_image),
        )
}

#[utoipa::path(
    get,
    path = "/admin/destinations",
    responses(
        (status = 200, description = "All destinations for management", body = ApiResponse<DestinationList>),
        (status = 401, description = "Login required"),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_destinations(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DestinationList>>> {
    let resp = image_service::list_destinations_admin(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/destinations/{id}/images",
    params(
        ("id" = Uuid, Path, description = "Destination ID")
    ),
    responses(
        (status = 200, description = "Gallery for a destination", body = ApiResponse<ImageList>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Destination not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_images(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ImageList>>> {
    let resp = image_service::list_images(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/destinations/{id}/images",
    params(
        ("id" = Uuid, Path, description = "Destination ID")
    ),
    responses(
        (status = 200, description = "Image stored and recorded", body = ApiResponse<DestinationImage>),
        (status = 400, description = "Missing file field or disallowed extension"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Destination not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<DestinationImage>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("File field has no filename".into()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let resp = image_service::upload_image(&state, &user, id, &filename, &bytes).await?;
        return Ok(Json(resp));
    }

    Err(AppError::BadRequest("Missing file field".into()))
}

#[utoipa::path(
    post,
    path = "/admin/destinations/{id}/images/{img_id}/delete",
    params(
        ("id" = Uuid, Path, description = "Destination ID"),
        ("img_id" = Uuid, Path, description = "Image ID"),
    ),
    responses(
        (status = 200, description = "Image removed"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Image not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, img_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = image_service::delete_image(&state, &user, id, img_id).await?;
    Ok(Json(resp))
}
