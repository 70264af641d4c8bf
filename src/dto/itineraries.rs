use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Itinerary, ItineraryItem};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItineraryRequest {
    pub title: String,
    /// Calendar date as `YYYY-MM-DD`; empty or absent means unset.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub day_number: i32,
    pub destination_id: Uuid,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItineraryWithItems {
    pub itinerary: Itinerary,
    pub items: Vec<ItineraryItem>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ItineraryList {
    #[schema(value_type = Vec<ItineraryWithItems>)]
    pub items: Vec<ItineraryWithItems>,
}
