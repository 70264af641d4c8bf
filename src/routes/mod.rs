use axum::{Router, routing::get};

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod destinations;
pub mod doc;
pub mod health;
pub mod itineraries;
pub mod reviews;

// Build the router without binding state; it is provided at the top level.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(destinations::featured))
        .merge(auth::router())
        .nest("/destinations", destinations::router())
        .nest("/reviews", reviews::router())
        .nest("/itineraries", itineraries::router())
        .nest("/admin", admin::router())
}
