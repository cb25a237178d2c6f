//! Pre-defined read-only projections.
//!
//! Each view filters to the active subset of its relation and has a fixed
//! ordering. They never write and return tables ready for display.

use std::str::FromStr;

use foodshare_core::error::CoreError;
use foodshare_core::table::QueryTable;
use serde::Serialize;

use crate::access::run_query;
use crate::error::DataResult;
use crate::DbPool;

/// Named projections available through [`load_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Available listings joined with their provider, newest first.
    AvailableListings,
    /// Active providers by name.
    ActiveProviders,
    /// Active receivers by name.
    ActiveReceivers,
    /// Non-cancelled claims joined with food and receiver names, newest first.
    Claims,
}

impl View {
    pub const ALL: &'static [View] = &[
        View::AvailableListings,
        View::ActiveProviders,
        View::ActiveReceivers,
        View::Claims,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            View::AvailableListings => "available-listings",
            View::ActiveProviders => "active-providers",
            View::ActiveReceivers => "active-receivers",
            View::Claims => "claims",
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            View::AvailableListings => {
                "SELECT fl.id AS food_id, fl.food_name, fl.food_type, fl.meal_type, \
                        fl.quantity, fl.unit, fl.location, fl.expiry_date, fl.created_date, \
                        fl.description, fl.status, p.name AS provider_name, \
                        COALESCE(fl.provider_type, p.provider_type) AS provider_type \
                 FROM food_listings fl \
                 LEFT JOIN providers p ON p.id = fl.provider_id \
                 WHERE fl.status = 'Available' \
                 ORDER BY fl.created_date DESC, fl.id DESC"
            }
            View::ActiveProviders => {
                "SELECT id, name, provider_type, contact, email, phone, address, city, state, \
                        postal_code, registration_date, status \
                 FROM providers WHERE status = 'Active' ORDER BY name, id"
            }
            View::ActiveReceivers => {
                "SELECT id, name, organization_type, contact, email, phone, address, city, \
                        state, postal_code, registration_date, status \
                 FROM receivers WHERE status = 'Active' ORDER BY name, id"
            }
            View::Claims => {
                "SELECT c.id AS claim_id, c.food_id, c.receiver_id, c.claimed_quantity, \
                        c.claimed_at, c.status, c.pickup_time, c.notes, \
                        fl.food_name, r.name AS receiver_name \
                 FROM claims c \
                 LEFT JOIN food_listings fl ON fl.id = c.food_id \
                 LEFT JOIN receivers r ON r.id = c.receiver_id \
                 WHERE c.status <> 'Cancelled' \
                 ORDER BY c.claimed_at DESC, c.id DESC"
            }
        }
    }
}

impl FromStr for View {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .iter()
            .copied()
            .find(|v| v.slug() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown view: '{s}'")))
    }
}

/// Run a pre-defined view.
pub async fn load_view(pool: &DbPool, view: View) -> DataResult<QueryTable> {
    tracing::debug!(view = view.slug(), "Loading view");
    run_query(pool, view.sql(), &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_parse_back() {
        for view in View::ALL {
            assert_eq!(view.slug().parse::<View>().unwrap(), *view);
        }
        assert!("everything".parse::<View>().is_err());
    }

    #[test]
    fn views_filter_to_active_subset_and_order() {
        for view in View::ALL {
            let sql = view.sql();
            assert!(sql.contains("ORDER BY"), "{} is unordered", view.slug());
            assert!(sql.trim_start().starts_with("SELECT"));
        }
        assert!(View::AvailableListings.sql().contains("'Available'"));
        assert!(View::ActiveProviders.sql().contains("'Active'"));
        assert!(View::ActiveReceivers.sql().contains("'Active'"));
        assert!(View::Claims.sql().contains("<> 'Cancelled'"));
    }
}
