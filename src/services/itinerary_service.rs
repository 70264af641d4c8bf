use chrono::{NaiveDate, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::itineraries::{AddItemRequest, CreateItineraryRequest, ItineraryList, ItineraryWithItems},
    entity::{
        destinations::Entity as Destinations,
        itineraries::{
            ActiveModel as ItineraryActive, Column as ItineraryCol, Entity as Itineraries,
            Model as ItineraryModel,
        },
        itinerary_items::{
            ActiveModel as ItemActive, Column as ItemCol, Entity as ItineraryItems,
            Model as ItemModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Itinerary, ItineraryItem},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Parse an optional `YYYY-MM-DD` field; empty text counts as unset.
pub fn parse_date(input: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    let input = match input.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s,
        None => return Ok(None),
    };
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("Invalid date: {input}")))
}

pub async fn list_itineraries(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<ItineraryList>> {
    let rows = Itineraries::find()
        .filter(ItineraryCol::UserId.eq(user.user_id))
        .order_by_desc(ItineraryCol::CreatedAt)
        .find_with_related(ItineraryItems)
        .all(&state.orm)
        .await?;

    let items = rows
        .into_iter()
        .map(|(itinerary, items)| ItineraryWithItems {
            itinerary: itinerary_from_entity(itinerary),
            items: items.into_iter().map(item_from_entity).collect(),
        })
        .collect::<Vec<_>>();

    let total = items.len() as i64;
    let data = ItineraryList { items };
    Ok(ApiResponse::success(
        "Itineraries",
        data,
        Some(Meta::new(1, total, total)),
    ))
}

pub async fn create_itinerary(
    state: &AppState,
    user: &AuthUser,
    payload: CreateItineraryRequest,
) -> AppResult<ApiResponse<Itinerary>> {
    let title = payload.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".into()));
    }

    let start_date = parse_date(payload.start_date.as_deref())?;
    let end_date = parse_date(payload.end_date.as_deref())?;

    let active = ItineraryActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        title: Set(title),
        start_date: Set(start_date),
        end_date: Set(end_date),
        created_at: NotSet,
    };
    let itinerary = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "itinerary_create",
        Some("itineraries"),
        Some(serde_json::json!({ "itinerary_id": itinerary.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Itinerary created",
        itinerary_from_entity(itinerary),
        Some(Meta::empty()),
    ))
}

/// Fetch an itinerary and check ownership. Absent rows are NotFound;
/// someone else's itinerary is Forbidden, never a silent redirect.
async fn owned_itinerary(
    state: &AppState,
    user: &AuthUser,
    itinerary_id: Uuid,
) -> AppResult<ItineraryModel> {
    let itinerary = Itineraries::find_by_id(itinerary_id)
        .one(&state.orm)
        .await?;
    let itinerary = match itinerary {
        Some(it) => it,
        None => return Err(AppError::NotFound),
    };
    if itinerary.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    Ok(itinerary)
}

pub async fn add_item(
    state: &AppState,
    user: &AuthUser,
    itinerary_id: Uuid,
    payload: AddItemRequest,
) -> AppResult<ApiResponse<ItineraryItem>> {
    let itinerary = owned_itinerary(state, user, itinerary_id).await?;

    if payload.day_number < 1 {
        return Err(AppError::BadRequest("Day number must be positive".into()));
    }

    // Confirm the referenced destination up front instead of letting the
    // insert fail on the foreign key.
    let destination = Destinations::find_by_id(payload.destination_id)
        .one(&state.orm)
        .await?;
    if destination.is_none() {
        return Err(AppError::BadRequest("Destination does not exist".into()));
    }

    let notes = payload
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let active = ItemActive {
        id: Set(Uuid::new_v4()),
        itinerary_id: Set(itinerary.id),
        day_number: Set(payload.day_number),
        destination_id: Set(payload.destination_id),
        notes: Set(notes),
    };
    let item = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "itinerary_add_item",
        Some("itinerary_items"),
        Some(serde_json::json!({ "itinerary_id": itinerary.id, "item_id": item.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Day added to itinerary",
        item_from_entity(item),
        Some(Meta::empty()),
    ))
}

pub async fn delete_item(
    state: &AppState,
    user: &AuthUser,
    itinerary_id: Uuid,
    item_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let itinerary = owned_itinerary(state, user, itinerary_id).await?;

    let item = ItineraryItems::find_by_id(item_id)
        .filter(ItemCol::ItineraryId.eq(itinerary.id))
        .one(&state.orm)
        .await?;
    let item = match item {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };

    item.delete(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "itinerary_delete_item",
        Some("itinerary_items"),
        Some(serde_json::json!({ "itinerary_id": itinerary.id, "item_id": item_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Day removed",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Delete an itinerary and every item in it, in one transaction.
pub async fn delete_itinerary(
    state: &AppState,
    user: &AuthUser,
    itinerary_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let itinerary = owned_itinerary(state, user, itinerary_id).await?;

    let txn = state.orm.begin().await?;
    ItineraryItems::delete_many()
        .filter(ItemCol::ItineraryId.eq(itinerary.id))
        .exec(&txn)
        .await?;
    Itineraries::delete_by_id(itinerary.id).exec(&txn).await?;
    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "itinerary_delete",
        Some("itineraries"),
        Some(serde_json::json!({ "itinerary_id": itinerary_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Itinerary deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn itinerary_from_entity(model: ItineraryModel) -> Itinerary {
    Itinerary {
        id: model.id,
        user_id: model.user_id,
        title: model.title,
        start_date: model.start_date,
        end_date: model.end_date,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn item_from_entity(model: ItemModel) -> ItineraryItem {
    ItineraryItem {
        id: model.id,
        itinerary_id: model.itinerary_id,
        day_number: model.day_number,
        destination_id: model.destination_id,
        notes: model.notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_calendar_dates() {
        let parsed = parse_date(Some("2025-06-01")).unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2025, 6, 1));
    }

    #[test]
    fn parse_date_treats_empty_as_unset() {
        assert_eq!(parse_date(None).unwrap(), None);
        assert_eq!(parse_date(Some("")).unwrap(), None);
        assert_eq!(parse_date(Some("   ")).unwrap(), None);
    }

    #[test]
    fn parse_date_rejects_malformed_text() {
        assert!(matches!(
            parse_date(Some("01/06/2025")),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_date(Some("2025-13-40")),
            Err(AppError::BadRequest(_))
        ));
    }
}
