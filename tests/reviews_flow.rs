mod common;

use axum_travel_api::{
    dto::auth::RegisterRequest,
    dto::reviews::SubmitReviewRequest,
    error::AppError,
    services::{auth_service, destination_service, review_service},
};
use sea_orm::{EntityTrait, PaginatorTrait};

use axum_travel_api::entity::{Reviews, Users};

// Registration, review submission and the deletion authorization matrix.
#[tokio::test]
async fn register_review_and_delete_authorization_flow() -> anyhow::Result<()> {
    let Some((state, _db)) = common::setup_state().await? else {
        return Ok(());
    };

    // Register user A through the real path.
    let resp = auth_service::register_user(
        &state.pool,
        RegisterRequest {
            name: "Asha".into(),
            email: "A@Example.com".into(),
            password: "secret123".into(),
            confirm: "secret123".into(),
        },
    )
    .await?;
    let user_a = resp.data.unwrap();
    assert_eq!(user_a.email, "a@example.com", "email is lower-cased");
    assert!(!user_a.is_admin);
    assert_ne!(user_a.password_hash, "secret123");

    // A second registration with the same email (any casing) conflicts and
    // leaves a single row.
    let dup = auth_service::register_user(
        &state.pool,
        RegisterRequest {
            name: "Imposter".into(),
            email: "a@example.com".into(),
            password: "other".into(),
            confirm: "other".into(),
        },
    )
    .await;
    assert!(matches!(dup, Err(AppError::Conflict(_))));
    assert_eq!(Users::find().count(&state.orm).await?, 1);

    let auth_a = axum_travel_api::middleware::auth::AuthUser {
        user_id: user_a.id,
        is_admin: false,
    };
    let auth_b = common::create_user(&state, "Bina", "b@example.com", false).await?;
    let admin = common::create_user(&state, "Admin", "root@example.com", true).await?;

    let dest_id =
        common::create_destination(&state, "Pokhara", "Gandaki", "Lakes", "Lakeside city").await?;

    // Out-of-range rating is rejected and nothing is written.
    let rejected = review_service::submit_review(
        &state,
        &auth_a,
        dest_id,
        SubmitReviewRequest {
            rating: 6,
            comment: Some("too good".into()),
        },
    )
    .await;
    assert!(matches!(rejected, Err(AppError::BadRequest(_))));
    assert_eq!(Reviews::find().count(&state.orm).await?, 0);

    // A valid review lands and shows up on the detail page, newest first.
    let review = review_service::submit_review(
        &state,
        &auth_a,
        dest_id,
        SubmitReviewRequest {
            rating: 5,
            comment: Some("Stunning lake views".into()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(review.user_id, auth_a.user_id, "author is the actor");

    let detail = destination_service::get_destination(&state, dest_id)
        .await?
        .data
        .unwrap();
    assert_eq!(detail.reviews.len(), 1);
    assert_eq!(detail.reviews[0].id, review.id);

    // User B cannot delete it; the row stays.
    let forbidden = review_service::delete_review(&state, &auth_b, review.id).await;
    assert!(matches!(forbidden, Err(AppError::Forbidden)));
    assert_eq!(Reviews::find().count(&state.orm).await?, 1);

    // The author can; the review disappears from the detail view.
    review_service::delete_review(&state, &auth_a, review.id).await?;
    let detail = destination_service::get_destination(&state, dest_id)
        .await?
        .data
        .unwrap();
    assert!(detail.reviews.is_empty());

    // Deleting it again is NotFound.
    let gone = review_service::delete_review(&state, &auth_a, review.id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));

    // An admin may delete someone else's review.
    let review = review_service::submit_review(
        &state,
        &auth_a,
        dest_id,
        SubmitReviewRequest {
            rating: 3,
            comment: None,
        },
    )
    .await?
    .data
    .unwrap();
    review_service::delete_review(&state, &admin, review.id).await?;
    assert_eq!(Reviews::find().count(&state.orm).await?, 0);

    Ok(())
}

#[tokio::test]
async fn login_is_generic_about_failures() -> anyhow::Result<()> {
    let Some((state, _db)) = common::setup_state().await? else {
        return Ok(());
    };

    unsafe { std::env::set_var("JWT_SECRET", "integration-test-secret") };

    auth_service::register_user(
        &state.pool,
        RegisterRequest {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            password: "secret123".into(),
            confirm: "secret123".into(),
        },
    )
    .await?;

    let wrong_password = auth_service::login_user(
        &state.pool,
        axum_travel_api::dto::auth::LoginRequest {
            email: "asha@example.com".into(),
            password: "nope".into(),
        },
    )
    .await;
    let no_such_user = auth_service::login_user(
        &state.pool,
        axum_travel_api::dto::auth::LoginRequest {
            email: "ghost@example.com".into(),
            password: "nope".into(),
        },
    )
    .await;

    // Same message either way, so accounts cannot be enumerated.
    let msg = |res: Result<_, AppError>| match res {
        Err(AppError::BadRequest(m)) => m,
        other => panic!("expected BadRequest, got {other:?}"),
    };
    assert_eq!(msg(wrong_password), msg(no_such_user));

    // Correct credentials work, with a case-insensitive email.
    let ok = auth_service::login_user(
        &state.pool,
        axum_travel_api::dto::auth::LoginRequest {
            email: "ASHA@example.com".into(),
            password: "secret123".into(),
        },
    )
    .await?;
    assert!(ok.data.unwrap().token.starts_with("Bearer "));

    Ok(())
}
