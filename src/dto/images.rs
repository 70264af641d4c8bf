use serde::Serialize;
use utoipa::ToSchema;

use crate::models::DestinationImage;

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ImageList {
    #[schema(value_type = Vec<DestinationImage>)]
    pub items: Vec<DestinationImage>,
}
