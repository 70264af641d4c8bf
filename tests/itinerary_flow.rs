mod common;

use axum_travel_api::{
    dto::itineraries::{AddItemRequest, CreateItineraryRequest},
    error::AppError,
    services::itinerary_service,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use uuid::Uuid;

use axum_travel_api::entity::{Itineraries, ItineraryItems};

#[tokio::test]
async fn create_add_days_and_cascade_delete_flow() -> anyhow::Result<()> {
    let Some((state, _db)) = common::setup_state().await? else {
        return Ok(());
    };

    let owner = common::create_user(&state, "Owner", "owner@example.com", false).await?;
    let stranger = common::create_user(&state, "Stranger", "stranger@example.com", false).await?;
    let dest_id =
        common::create_destination(&state, "Lumbini", "Lumbini", "Heritage", "Birthplace").await?;

    // Title is mandatory; malformed dates are rejected.
    let no_title = itinerary_service::create_itinerary(
        &state,
        &owner,
        CreateItineraryRequest {
            title: "   ".into(),
            start_date: None,
            end_date: None,
        },
    )
    .await;
    assert!(matches!(no_title, Err(AppError::BadRequest(_))));

    let bad_date = itinerary_service::create_itinerary(
        &state,
        &owner,
        CreateItineraryRequest {
            title: "Spring trip".into(),
            start_date: Some("next tuesday".into()),
            end_date: None,
        },
    )
    .await;
    assert!(matches!(bad_date, Err(AppError::BadRequest(_))));

    let itinerary = itinerary_service::create_itinerary(
        &state,
        &owner,
        CreateItineraryRequest {
            title: "Spring trip".into(),
            start_date: Some("2026-03-10".into()),
            end_date: Some("2026-03-17".into()),
        },
    )
    .await?
    .data
    .unwrap();

    // Day number must be positive and the destination must exist.
    let bad_day = itinerary_service::add_item(
        &state,
        &owner,
        itinerary.id,
        AddItemRequest {
            day_number: 0,
            destination_id: dest_id,
            notes: None,
        },
    )
    .await;
    assert!(matches!(bad_day, Err(AppError::BadRequest(_))));

    let dangling = itinerary_service::add_item(
        &state,
        &owner,
        itinerary.id,
        AddItemRequest {
            day_number: 1,
            destination_id: Uuid::new_v4(),
            notes: None,
        },
    )
    .await;
    assert!(matches!(dangling, Err(AppError::BadRequest(_))));
    assert_eq!(ItineraryItems::find().count(&state.orm).await?, 0);

    // Two days on the same day number are allowed.
    for day in [1, 1, 2] {
        itinerary_service::add_item(
            &state,
            &owner,
            itinerary.id,
            AddItemRequest {
                day_number: day,
                destination_id: dest_id,
                notes: Some(format!("day {day}")),
            },
        )
        .await?;
    }

    // A stranger cannot touch someone else's itinerary.
    let forbidden = itinerary_service::add_item(
        &state,
        &stranger,
        itinerary.id,
        AddItemRequest {
            day_number: 3,
            destination_id: dest_id,
            notes: None,
        },
    )
    .await;
    assert!(matches!(forbidden, Err(AppError::Forbidden)));

    let forbidden = itinerary_service::delete_itinerary(&state, &stranger, itinerary.id).await;
    assert!(matches!(forbidden, Err(AppError::Forbidden)));

    let listed = itinerary_service::list_itineraries(&state, &owner)
        .await?
        .data
        .unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].items.len(), 3);

    // The stranger sees nothing of it.
    let listed = itinerary_service::list_itineraries(&state, &stranger)
        .await?
        .data
        .unwrap();
    assert!(listed.items.is_empty());

    // Deleting the itinerary takes all three items with it.
    itinerary_service::delete_itinerary(&state, &owner, itinerary.id).await?;
    assert_eq!(Itineraries::find().count(&state.orm).await?, 0);
    assert_eq!(ItineraryItems::find().count(&state.orm).await?, 0);

    Ok(())
}

#[tokio::test]
async fn delete_item_checks_ownership_and_membership() -> anyhow::Result<()> {
    let Some((state, _db)) = common::setup_state().await? else {
        return Ok(());
    };

    let owner = common::create_user(&state, "Owner", "owner@example.com", false).await?;
    let stranger = common::create_user(&state, "Stranger", "stranger@example.com", false).await?;
    let dest_id =
        common::create_destination(&state, "Rara Lake", "Karnali", "Lakes", "Alpine lake").await?;

    let mine = itinerary_service::create_itinerary(
        &state,
        &owner,
        CreateItineraryRequest {
            title: "Mine".into(),
            start_date: None,
            end_date: None,
        },
    )
    .await?
    .data
    .unwrap();
    let theirs = itinerary_service::create_itinerary(
        &state,
        &stranger,
        CreateItineraryRequest {
            title: "Theirs".into(),
            start_date: None,
            end_date: None,
        },
    )
    .await?
    .data
    .unwrap();

    let item = itinerary_service::add_item(
        &state,
        &owner,
        mine.id,
        AddItemRequest {
            day_number: 1,
            destination_id: dest_id,
            notes: None,
        },
    )
    .await?
    .data
    .unwrap();

    // Wrong owner: Forbidden. Wrong itinerary for the item: NotFound.
    let forbidden = itinerary_service::delete_item(&state, &stranger, mine.id, item.id).await;
    assert!(matches!(forbidden, Err(AppError::Forbidden)));

    let mismatched = itinerary_service::delete_item(&state, &stranger, theirs.id, item.id).await;
    assert!(matches!(mismatched, Err(AppError::NotFound)));

    let missing = itinerary_service::delete_item(&state, &owner, mine.id, Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    itinerary_service::delete_item(&state, &owner, mine.id, item.id).await?;
    assert_eq!(ItineraryItems::find().count(&state.orm).await?, 0);

    Ok(())
}
