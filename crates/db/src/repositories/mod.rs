//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and return [`DataResult`].
//!
//! [`DataResult`]: crate::error::DataResult

pub mod claim_repo;
pub mod diagnostics_repo;
pub mod food_listing_repo;
pub mod provider_repo;
pub mod receiver_repo;

pub use claim_repo::ClaimRepo;
pub use diagnostics_repo::DiagnosticsRepo;
pub use food_listing_repo::FoodListingRepo;
pub use provider_repo::ProviderRepo;
pub use receiver_repo::ReceiverRepo;
