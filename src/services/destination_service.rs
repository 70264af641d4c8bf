use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    dto::destinations::{DestinationDetail, DestinationList, DestinationQuery},
    entity::{
        destination_images::{Column as ImageCol, Entity as DestinationImages},
        destinations::{Column, Entity as Destinations, Model as DestinationModel},
        reviews::{Column as ReviewCol, Entity as Reviews},
    },
    error::{AppError, AppResult},
    models::{Destination, DestinationImage, Review},
    response::{ApiResponse, Meta},
    state::AppState,
};

const FEATURED_LIMIT: u64 = 6;

/// The landing-page payload: the first six destinations by id.
pub async fn featured(state: &AppState) -> AppResult<ApiResponse<DestinationList>> {
    let items = Destinations::find()
        .order_by_asc(Column::Id)
        .limit(FEATURED_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(destination_from_entity)
        .collect();

    let data = DestinationList { items };
    Ok(ApiResponse::success("Featured destinations", data, None))
}

pub async fn list_destinations(
    state: &AppState,
    query: DestinationQuery,
) -> AppResult<ApiResponse<DestinationList>> {
    let mut condition = Condition::all();

    if let Some(region) = query.region.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Expr::col(Column::Region).ilike(format!("%{}%", region)));
    }
    if let Some(category) = query.category.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Expr::col(Column::Category).ilike(format!("%{}%", category)));
    }
    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern.clone()))
                .add(Expr::col(Column::Region).ilike(pattern)),
        );
    }

    let items: Vec<Destination> = Destinations::find()
        .filter(condition)
        .order_by_asc(Column::Region)
        .order_by_asc(Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(destination_from_entity)
        .collect();

    let total = items.len() as i64;
    let data = DestinationList { items };
    Ok(ApiResponse::success(
        "Destinations",
        data,
        Some(Meta::new(1, total, total)),
    ))
}

/// Destination detail with its gallery and reviews (newest first). The
/// gallery view tolerates rows whose backing file has gone missing; it only
/// reports filenames.
pub async fn get_destination(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<DestinationDetail>> {
    let destination = Destinations::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(destination_from_entity);
    let destination = match destination {
        Some(d) => d,
        None => return Err(AppError::NotFound),
    };

    let images = DestinationImages::find()
        .filter(ImageCol::DestinationId.eq(id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(image_from_entity)
        .collect();

    let reviews = Reviews::find()
        .filter(ReviewCol::DestinationId.eq(id))
        .order_by_desc(ReviewCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(review_from_entity)
        .collect();

    let data = DestinationDetail {
        destination,
        images,
        reviews,
    };
    Ok(ApiResponse::success("Destination", data, None))
}

pub fn destination_from_entity(model: DestinationModel) -> Destination {
    Destination {
        id: model.id,
        name: model.name,
        region: model.region,
        category: model.category,
        description: model.description,
        latitude: model.latitude,
        longitude: model.longitude,
        image_url: model.image_url,
        highlights: model.highlights,
    }
}

pub fn image_from_entity(model: crate::entity::destination_images::Model) -> DestinationImage {
    DestinationImage {
        id: model.id,
        destination_id: model.destination_id,
        filename: model.filename,
        is_primary: model.is_primary,
    }
}

pub fn review_from_entity(model: crate::entity::reviews::Model) -> Review {
    use chrono::Utc;
    Review {
        id: model.id,
        user_id: model.user_id,
        destination_id: model.destination_id,
        rating: model.rating,
        comment: model.comment,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
