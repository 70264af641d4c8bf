use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Destination, DestinationImage, Review};

/// Query parameters for the destination listing. Each filter is optional
/// and matches as a case-insensitive substring; they compose with AND.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DestinationQuery {
    pub region: Option<String>,
    pub category: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct DestinationList {
    #[schema(value_type = Vec<Destination>)]
    pub items: Vec<Destination>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DestinationDetail {
    pub destination: Destination,
    pub images: Vec<DestinationImage>,
    pub reviews: Vec<Review>,
}
