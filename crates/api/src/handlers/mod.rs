pub mod claims;
pub mod diagnostics;
pub mod food_listings;
pub mod providers;
pub mod receivers;
pub mod reports;
pub mod views;
