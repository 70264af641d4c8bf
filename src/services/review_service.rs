use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::reviews::SubmitReviewRequest,
    entity::{
        destinations::Entity as Destinations,
        reviews::{ActiveModel as ReviewActive, Entity as Reviews},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Review,
    response::{ApiResponse, Meta},
    services::destination_service::review_from_entity,
    state::AppState,
};

pub fn validate_rating(rating: i32) -> Result<(), AppError> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".into(),
        ));
    }
    Ok(())
}

/// Append a review to a destination. The author is always the requesting
/// actor; the payload carries no user id to spoof.
pub async fn submit_review(
    state: &AppState,
    user: &AuthUser,
    destination_id: Uuid,
    payload: SubmitReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    let destination = Destinations::find_by_id(destination_id)
        .one(&state.orm)
        .await?;
    if destination.is_none() {
        return Err(AppError::NotFound);
    }

    validate_rating(payload.rating)?;

    let comment = payload
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let active = ReviewActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        destination_id: Set(destination_id),
        rating: Set(payload.rating),
        comment: Set(comment),
        created_at: NotSet,
    };
    let review = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "review_submit",
        Some("reviews"),
        Some(serde_json::json!({ "review_id": review.id, "destination_id": destination_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Review submitted",
        review_from_entity(review),
        Some(Meta::empty()),
    ))
}

/// Remove a review. Only the author or an admin may do this; anyone else
/// gets Forbidden and the row stays.
pub async fn delete_review(
    state: &AppState,
    user: &AuthUser,
    review_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let review = Reviews::find_by_id(review_id).one(&state.orm).await?;
    let review = match review {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    if review.user_id != user.user_id && !user.is_admin {
        return Err(AppError::Forbidden);
    }

    Reviews::delete_by_id(review_id).exec(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "review_delete",
        Some("reviews"),
        Some(serde_json::json!({ "review_id": review_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Review deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
