pub mod audit_logs;
pub mod destination_images;
pub mod destinations;
pub mod itineraries;
pub mod itinerary_items;
pub mod reviews;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use destination_images::Entity as DestinationImages;
pub use destinations::Entity as Destinations;
pub use itineraries::Entity as Itineraries;
pub use itinerary_items::Entity as ItineraryItems;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
