use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::destinations::{DestinationDetail, DestinationList, DestinationQuery},
    dto::reviews::SubmitReviewRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Review,
    response::ApiResponse,
    services::{destination_service, review_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_destinations))
        .route("/{id}", get(get_destination).post(submit_review))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Featured destinations (first six)", body = ApiResponse<DestinationList>)
    ),
    tag = "Destinations"
)]
pub async fn featured(State(state): State<AppState>) -> AppResult<Json<ApiResponse<DestinationList>>> {
    let resp = destination_service::featured(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/destinations",
    params(
        ("region" = Option<String>, Query, description = "Region substring filter"),
        ("category" = Option<String>, Query, description = "Category substring filter"),
        ("q" = Option<String>, Query, description = "Matches name, description or region"),
    ),
    responses(
        (status = 200, description = "Filtered destination listing", body = ApiResponse<DestinationList>)
    ),
    tag = "Destinations"
)]
pub async fn list_destinations(
    State(state): State<AppState>,
    Query(query): Query<DestinationQuery>,
) -> AppResult<Json<ApiResponse<DestinationList>>> {
    let resp = destination_service::list_destinations(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/destinations/{id}",
    params(
        ("id" = Uuid, Path, description = "Destination ID")
    ),
    responses(
        (status = 200, description = "Destination with gallery and reviews", body = ApiResponse<DestinationDetail>),
        (status = 404, description = "Destination not found"),
    ),
    tag = "Destinations"
)]
pub async fn get_destination(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<DestinationDetail>>> {
    let resp = destination_service::get_destination(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/destinations/{id}",
    params(
        ("id" = Uuid, Path, description = "Destination ID")
    ),
    request_body = SubmitReviewRequest,
    responses(
        (status = 200, description = "Review submitted", body = ApiResponse<Review>),
        (status = 400, description = "Rating out of range"),
        (status = 401, description = "Login required"),
        (status = 404, description = "Destination not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn submit_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitReviewRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let resp = review_service::submit_review(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
