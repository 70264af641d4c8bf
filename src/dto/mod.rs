pub mod auth;
pub mod destinations;
pub mod images;
pub mod itineraries;
pub mod reviews;
