pub mod auth_service;
pub mod destination_service;
pub mod image_service;
pub mod itinerary_service;
pub mod review_service;
