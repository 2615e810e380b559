pub mod listing_service;
pub mod walk_service;
