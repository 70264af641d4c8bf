use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::itineraries::{AddItemRequest, CreateItineraryRequest, ItineraryList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Itinerary, ItineraryItem},
    response::ApiResponse,
    services::itinerary_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_itineraries).post(create_itinerary))
        .route("/{id}/add_item", post(add_item))
        .route("/{id}/delete_item/{item_id}", post(delete_item))
        .route("/{id}/delete", post(delete_itinerary))
}

#[utoipa::path(
    get,
    path = "/itineraries",
    responses(
        (status = 200, description = "The actor's itineraries with their items", body = ApiResponse<ItineraryList>),
        (status = 401, description = "Login required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Itineraries"
)]
pub async fn list_itineraries(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ItineraryList>>> {
    let resp = itinerary_service::list_itineraries(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/itineraries",
    request_body = CreateItineraryRequest,
    responses(
        (status = 200, description = "Itinerary created", body = ApiResponse<Itinerary>),
        (status = 400, description = "Missing title or malformed date"),
        (status = 401, description = "Login required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Itineraries"
)]
pub async fn create_itinerary(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateItineraryRequest>,
) -> AppResult<Json<ApiResponse<Itinerary>>> {
    let resp = itinerary_service::create_itinerary(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/itineraries/{id}/add_item",
    params(
        ("id" = Uuid, Path, description = "Itinerary ID")
    ),
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Day appended", body = ApiResponse<ItineraryItem>),
        (status = 400, description = "Bad day number or unknown destination"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Itinerary not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Itineraries"
)]
pub async fn add_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<ItineraryItem>>> {
    let resp = itinerary_service::add_item(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/itineraries/{id}/delete_item/{item_id}",
    params(
        ("id" = Uuid, Path, description = "Itinerary ID"),
        ("item_id" = Uuid, Path, description = "Item ID"),
    ),
    responses(
        (status = 200, description = "Day removed"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Itinerary or item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Itineraries"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = itinerary_service::delete_item(&state, &user, id, item_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/itineraries/{id}/delete",
    params(
        ("id" = Uuid, Path, description = "Itinerary ID")
    ),
    responses(
        (status = 200, description = "Itinerary and all its days removed"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Itinerary not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Itineraries"
)]
pub async fn delete_itinerary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = itinerary_service::delete_itinerary(&state, &user, id).await?;
    Ok(Json(resp))
}
