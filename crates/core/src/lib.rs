//! Domain types and pure logic for the food-donation tracker.
//!
//! Nothing in this crate talks to the database: it holds the shared
//! vocabulary (ids, statuses, errors), input validation for listings and
//! claims, the tabular result type used by reports and views, and the
//! explicit view cache owned by the HTTP layer.

pub mod cache;
pub mod error;
pub mod listing;
pub mod outcome;
pub mod selection;
pub mod status;
pub mod table;
pub mod types;
