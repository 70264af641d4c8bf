use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest},
    error::{AppError, AppResult},
    middleware::auth::SESSION_COOKIE,
    models::User,
    response::{ApiResponse, Meta},
    services::auth_service::{login_user, register_user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Register user", body = ApiResponse<User>),
        (status = 400, description = "Missing field or password mismatch"),
        (status = 409, description = "Email already registered"),
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = register_user(&state.pool, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user, sets the session cookie", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Response> {
    let resp = login_user(&state.pool, payload).await?;

    let raw_token = resp
        .data
        .as_ref()
        .and_then(|d| d.token.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string();
    let cookie = format!("{SESSION_COOKIE}={raw_token}; Path=/; HttpOnly; SameSite=Lax");

    let mut response = Json(resp).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?,
    );
    Ok(response)
}

#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 200, description = "Clear the session cookie; idempotent")
    ),
    tag = "Auth"
)]
pub async fn logout() -> Response {
    let body = ApiResponse::success("Logged out", serde_json::json!({}), Some(Meta::empty()));
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");

    let mut response = Json(body).into_response();
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}
