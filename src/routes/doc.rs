use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        destinations::{DestinationDetail, DestinationList, DestinationQuery},
        images::ImageList,
        itineraries::{AddItemRequest, CreateItineraryRequest, ItineraryList, ItineraryWithItems},
        reviews::SubmitReviewRequest,
    },
    models::{Destination, DestinationImage, Itinerary, ItineraryItem, Review, User},
    response::{ApiResponse, Meta},
    routes::{admin, auth, destinations, health, itineraries, reviews},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::logout,
        destinations::featured,
        destinations::list_destinations,
        destinations::get_destination,
        destinations::submit_review,
        reviews::delete_review,
        itineraries::list_itineraries,
        itineraries::create_itinerary,
        itineraries::add_item,
        itineraries::delete_item,
        itineraries::delete_itinerary,
        admin::list_destinations,
        admin::list_images,
        admin::upload_image,
        admin::delete_image
    ),
    components(
        schemas(
            User,
            Destination,
            DestinationImage,
            Itinerary,
            ItineraryItem,
            Review,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            SubmitReviewRequest,
            CreateItineraryRequest,
            AddItemRequest,
            DestinationQuery,
            DestinationList,
            DestinationDetail,
            ItineraryList,
            ItineraryWithItems,
            ImageList,
            Meta,
            ApiResponse<Destination>,
            ApiResponse<DestinationList>,
            ApiResponse<DestinationDetail>,
            ApiResponse<ItineraryList>,
            ApiResponse<ImageList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and logout"),
        (name = "Destinations", description = "Browsing and search"),
        (name = "Reviews", description = "Destination reviews"),
        (name = "Itineraries", description = "Multi-day trip planning"),
        (name = "Admin", description = "Destination image management"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
