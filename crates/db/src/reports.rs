//! Catalog of canned analytical reports.
//!
//! Each entry pairs a stable slug and a display label with one read-only SQL
//! statement. Parameters bind positionally to `$1..$n` in declaration order.
//! Every numeric output column is cast to `int8` or `float8` so the generic
//! row decoder in [`crate::access`] can read it.
//!
//! Ratio reports (`claim-to-listing-ratio-by-city`,
//! `provider-type-effectiveness`) left-join the claim counts onto the listing
//! counts: a city or provider type with listings but no claims appears with a
//! zero count and a zero ratio instead of being dropped.

use std::collections::HashMap;

use foodshare_core::table::QueryTable;
use serde::Serialize;

use crate::access::{run_query, SqlParam};
use crate::error::DataError;
use crate::DbPool;

/// Which kind of aggregate a report computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportShape {
    /// Count or sum per dimension value.
    GroupBy,
    /// Highest-ranked row(s) after ordering.
    TopN,
    /// A single aggregate over the whole relation.
    Scalar,
    /// Plain filtered lookup.
    Lookup,
    /// Share of the grand total per group.
    Percentage,
    /// One aggregate divided by another, joined on a shared key.
    Ratio,
    /// Grouped by a calendar day or hour bucket.
    TimeBucket,
    /// Average distance in days between two date columns.
    DateDifference,
    /// Count of distinct values per group.
    DistinctCount,
}

/// A named input to a report.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportParam {
    pub name: &'static str,
    pub description: &'static str,
    /// Used when the caller supplies nothing (or only whitespace).
    pub default: &'static str,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportDef {
    pub slug: &'static str,
    pub label: &'static str,
    pub shape: ReportShape,
    pub sql: &'static str,
    pub params: &'static [ReportParam],
}

/// A report that did not run, with enough context to diagnose it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Report '{label}' failed: {error}")]
pub struct ReportFailure {
    pub slug: &'static str,
    pub label: &'static str,
    /// The raw SQL that was sent.
    pub query: &'static str,
    pub error: DataError,
}

const CITY_PARAM: ReportParam = ReportParam {
    name: "city",
    description: "City whose providers should be listed",
    default: "New Jessica",
};

/// Every report, in display order.
pub static CATALOG: &[ReportDef] = &[
    ReportDef {
        slug: "providers-per-city",
        label: "Number of food providers in each city",
        shape: ReportShape::GroupBy,
        sql: "SELECT city, COUNT(*) AS provider_count \
              FROM providers \
              GROUP BY city \
              ORDER BY provider_count DESC, city",
        params: &[],
    },
    ReportDef {
        slug: "receivers-per-city",
        label: "Number of food receivers in each city",
        shape: ReportShape::GroupBy,
        sql: "SELECT city, COUNT(*) AS receiver_count \
              FROM receivers \
              GROUP BY city \
              ORDER BY receiver_count DESC, city",
        params: &[],
    },
    ReportDef {
        slug: "top-provider-type-by-quantity",
        label: "Provider type contributing the most food",
        shape: ReportShape::TopN,
        sql: "SELECT provider_type, SUM(quantity)::float8 AS total_quantity \
              FROM food_listings \
              GROUP BY provider_type \
              ORDER BY total_quantity DESC, provider_type \
              LIMIT 1",
        params: &[],
    },
    ReportDef {
        slug: "provider-contacts-in-city",
        label: "Contact information of providers in a city",
        shape: ReportShape::Lookup,
        sql: "SELECT name, contact, phone, email \
              FROM providers \
              WHERE city = $1 \
              ORDER BY name",
        params: &[CITY_PARAM],
    },
    ReportDef {
        slug: "top-receiver-by-claims",
        label: "Receiver with the most food claims",
        shape: ReportShape::TopN,
        sql: "SELECT c.receiver_id, r.name AS receiver_name, COUNT(*) AS total_claims \
              FROM claims c \
              LEFT JOIN receivers r ON r.id = c.receiver_id \
              GROUP BY c.receiver_id, r.name \
              ORDER BY total_claims DESC, c.receiver_id \
              LIMIT 1",
        params: &[],
    },
    ReportDef {
        slug: "total-quantity-available",
        label: "Total quantity of food available",
        shape: ReportShape::Scalar,
        sql: "SELECT COALESCE(SUM(quantity), 0)::float8 AS total_quantity \
              FROM food_listings",
        params: &[],
    },
    ReportDef {
        slug: "top-city-by-listings",
        label: "City with the highest number of food listings",
        shape: ReportShape::TopN,
        sql: "SELECT location AS city, COUNT(*) AS listing_count \
              FROM food_listings \
              GROUP BY location \
              ORDER BY listing_count DESC, location \
              LIMIT 1",
        params: &[],
    },
    ReportDef {
        slug: "food-type-frequency",
        label: "Most commonly available food types",
        shape: ReportShape::GroupBy,
        sql: "SELECT food_type, COUNT(*) AS frequency \
              FROM food_listings \
              GROUP BY food_type \
              ORDER BY frequency DESC, food_type",
        params: &[],
    },
    ReportDef {
        slug: "claims-per-food-item",
        label: "Number of food claims per food item",
        shape: ReportShape::GroupBy,
        sql: "SELECT c.food_id, fl.food_name, COUNT(*) AS claims_count \
              FROM claims c \
              LEFT JOIN food_listings fl ON fl.id = c.food_id \
              GROUP BY c.food_id, fl.food_name \
              ORDER BY claims_count DESC, c.food_id",
        params: &[],
    },
    ReportDef {
        slug: "top-provider-by-completed-claims",
        label: "Provider with the highest number of completed claims",
        shape: ReportShape::TopN,
        sql: "SELECT fl.provider_id, p.name AS provider_name, COUNT(*) AS completed_claims \
              FROM claims c \
              JOIN food_listings fl ON fl.id = c.food_id \
              LEFT JOIN providers p ON p.id = fl.provider_id \
              WHERE c.status = 'Completed' \
              GROUP BY fl.provider_id, p.name \
              ORDER BY completed_claims DESC, fl.provider_id \
              LIMIT 1",
        params: &[],
    },
    ReportDef {
        slug: "claim-status-percentage",
        label: "Percentage of food claims by status",
        shape: ReportShape::Percentage,
        sql: "SELECT status, \
                     ROUND(COUNT(*) * 100.0 / (SELECT COUNT(*) FROM claims), 2)::float8 \
                         AS percentage \
              FROM claims \
              GROUP BY status \
              ORDER BY percentage DESC, status",
        params: &[],
    },
    ReportDef {
        slug: "avg-claimed-quantity-per-receiver",
        label: "Average claimed quantity per claim, by receiver",
        shape: ReportShape::GroupBy,
        sql: "SELECT c.receiver_id, r.name AS receiver_name, \
                     ROUND(AVG(c.claimed_quantity)::numeric, 2)::float8 AS avg_quantity_claimed \
              FROM claims c \
              LEFT JOIN receivers r ON r.id = c.receiver_id \
              GROUP BY c.receiver_id, r.name \
              ORDER BY c.receiver_id",
        params: &[],
    },
    ReportDef {
        slug: "claims-per-meal-type",
        label: "Most claimed meal type",
        shape: ReportShape::GroupBy,
        sql: "SELECT fl.meal_type, COUNT(*) AS claim_count \
              FROM claims c \
              JOIN food_listings fl ON fl.id = c.food_id \
              GROUP BY fl.meal_type \
              ORDER BY claim_count DESC, fl.meal_type",
        params: &[],
    },
    ReportDef {
        slug: "most-claimed-food-items",
        label: "Most frequently claimed food items",
        shape: ReportShape::GroupBy,
        sql: "SELECT fl.food_name, COUNT(*) AS claim_count \
              FROM claims c \
              JOIN food_listings fl ON fl.id = c.food_id \
              GROUP BY fl.food_name \
              ORDER BY claim_count DESC, fl.food_name",
        params: &[],
    },
    ReportDef {
        slug: "busiest-claim-days",
        label: "Busiest days for food claims",
        shape: ReportShape::TimeBucket,
        sql: "SELECT (claimed_at AT TIME ZONE 'UTC')::date AS claim_date, \
                     COUNT(*) AS total_claims \
              FROM claims \
              GROUP BY claim_date \
              ORDER BY total_claims DESC, claim_date",
        params: &[],
    },
    ReportDef {
        slug: "peak-claim-hours",
        label: "Peak hours for food claims",
        shape: ReportShape::TimeBucket,
        sql: "SELECT EXTRACT(HOUR FROM claimed_at AT TIME ZONE 'UTC')::int4 AS claim_hour, \
                     COUNT(*) AS claim_count \
              FROM claims \
              GROUP BY claim_hour \
              ORDER BY claim_count DESC, claim_hour",
        params: &[],
    },
    ReportDef {
        slug: "claim-to-listing-ratio-by-city",
        label: "Claim-to-listing ratio by city",
        shape: ReportShape::Ratio,
        sql: "WITH listed AS ( \
                  SELECT location AS city, COUNT(*) AS total_listings \
                  FROM food_listings \
                  GROUP BY location \
              ), \
              claimed AS ( \
                  SELECT fl.location AS city, COUNT(*) AS total_claims \
                  FROM claims c \
                  JOIN food_listings fl ON fl.id = c.food_id \
                  GROUP BY fl.location \
              ) \
              SELECT l.city, \
                     COALESCE(cl.total_claims, 0) AS total_claims, \
                     l.total_listings, \
                     COALESCE(ROUND(COALESCE(cl.total_claims, 0)::numeric \
                         / NULLIF(l.total_listings, 0), 2), 0)::float8 \
                         AS claim_to_listing_ratio \
              FROM listed l \
              LEFT JOIN claimed cl ON cl.city = l.city \
              ORDER BY claim_to_listing_ratio DESC, l.city",
        params: &[],
    },
    ReportDef {
        slug: "avg-days-listing-to-claim",
        label: "Average days from listing to completed claim",
        shape: ReportShape::DateDifference,
        sql: "SELECT ROUND((AVG(EXTRACT(EPOCH FROM (c.claimed_at - fl.created_date))) \
                         / 86400.0)::numeric, 2)::float8 AS avg_days_to_claim \
              FROM claims c \
              JOIN food_listings fl ON fl.id = c.food_id \
              WHERE c.status = 'Completed'",
        params: &[],
    },
    ReportDef {
        slug: "avg-days-claim-to-expiry",
        label: "Average days of shelf life left at completed claim",
        shape: ReportShape::DateDifference,
        sql: "SELECT ROUND(AVG(fl.expiry_date - (c.claimed_at AT TIME ZONE 'UTC')::date)::numeric, 2)::float8 \
                         AS avg_days_claim_to_expiry \
              FROM claims c \
              JOIN food_listings fl ON fl.id = c.food_id \
              WHERE c.status = 'Completed'",
        params: &[],
    },
    ReportDef {
        slug: "provider-type-effectiveness",
        label: "Provider type effectiveness (completed claims per listing)",
        shape: ReportShape::Ratio,
        sql: "WITH listed AS ( \
                  SELECT provider_type, COUNT(*) AS listings \
                  FROM food_listings \
                  GROUP BY provider_type \
              ), \
              completed AS ( \
                  SELECT fl.provider_type, COUNT(*) AS completed_claims \
                  FROM claims c \
                  JOIN food_listings fl ON fl.id = c.food_id \
                  WHERE c.status = 'Completed' \
                  GROUP BY fl.provider_type \
              ) \
              SELECT l.provider_type, \
                     l.listings, \
                     COALESCE(cc.completed_claims, 0) AS completed_claims, \
                     COALESCE(ROUND(COALESCE(cc.completed_claims, 0)::numeric \
                         / NULLIF(l.listings, 0), 2), 0)::float8 AS effectiveness_rate \
              FROM listed l \
              LEFT JOIN completed cc ON cc.provider_type IS NOT DISTINCT FROM l.provider_type \
              ORDER BY effectiveness_rate DESC, l.provider_type",
        params: &[],
    },
    ReportDef {
        slug: "avg-days-to-expiry",
        label: "Average days until available listings expire",
        shape: ReportShape::DateDifference,
        sql: "SELECT ROUND(AVG(expiry_date - CURRENT_DATE)::numeric, 2)::float8 \
                         AS avg_days_to_expire \
              FROM food_listings \
              WHERE status = 'Available'",
        params: &[],
    },
    ReportDef {
        slug: "top-providers-by-variety",
        label: "Top 5 providers with the most food variety",
        shape: ReportShape::DistinctCount,
        sql: "SELECT fl.provider_id, p.name AS provider_name, \
                     COUNT(DISTINCT fl.food_name) AS unique_food_items \
              FROM food_listings fl \
              LEFT JOIN providers p ON p.id = fl.provider_id \
              GROUP BY fl.provider_id, p.name \
              ORDER BY unique_food_items DESC, fl.provider_id \
              LIMIT 5",
        params: &[],
    },
];

/// Look up a report by slug.
pub fn find(slug: &str) -> Option<&'static ReportDef> {
    CATALOG.iter().find(|r| r.slug == slug)
}

/// Look up a report by its display label.
pub fn find_by_label(label: &str) -> Option<&'static ReportDef> {
    CATALOG.iter().find(|r| r.label == label)
}

impl ReportDef {
    /// Resolve supplied arguments against the declared parameters.
    ///
    /// Missing or blank arguments fall back to the default. Arguments that
    /// match no declared parameter are ignored.
    pub fn bind_args(&self, supplied: &HashMap<String, String>) -> Vec<SqlParam> {
        self.params
            .iter()
            .map(|param| {
                let value = supplied
                    .get(param.name)
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .unwrap_or(param.default);
                SqlParam::from(value)
            })
            .collect()
    }
}

/// Run one report. Failures carry the report's raw SQL.
pub async fn run_report(
    pool: &DbPool,
    report: &'static ReportDef,
    args: &HashMap<String, String>,
) -> Result<QueryTable, ReportFailure> {
    let params = report.bind_args(args);
    tracing::debug!(report = report.slug, params = params.len(), "Running report");

    run_query(pool, report.sql, &params)
        .await
        .map_err(|error| {
            tracing::error!(report = report.slug, error = %error, "Report failed");
            ReportFailure {
                slug: report.slug,
                label: report.label,
                query: report.sql,
                error,
            }
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_has_every_report_once() {
        assert_eq!(CATALOG.len(), 22);
        let slugs: HashSet<&str> = CATALOG.iter().map(|r| r.slug).collect();
        let labels: HashSet<&str> = CATALOG.iter().map(|r| r.label).collect();
        assert_eq!(slugs.len(), CATALOG.len(), "duplicate slug");
        assert_eq!(labels.len(), CATALOG.len(), "duplicate label");
    }

    #[test]
    fn every_report_is_a_single_read() {
        for report in CATALOG {
            let sql = report.sql.trim_start();
            assert!(
                sql.starts_with("SELECT") || sql.starts_with("WITH"),
                "{} is not a read",
                report.slug
            );
            assert!(!sql.contains(';'), "{} has multiple statements", report.slug);
        }
    }

    #[test]
    fn placeholders_match_declared_params() {
        for report in CATALOG {
            for n in 1..=report.params.len() {
                assert!(
                    report.sql.contains(&format!("${n}")),
                    "{} does not use ${n}",
                    report.slug
                );
            }
            let next = report.params.len() + 1;
            assert!(
                !report.sql.contains(&format!("${next}")),
                "{} uses undeclared ${next}",
                report.slug
            );
        }
    }

    #[test]
    fn lookup_by_slug_and_label() {
        let report = find("claim-status-percentage").unwrap();
        assert_eq!(report.shape, ReportShape::Percentage);
        assert_eq!(
            find_by_label("Percentage of food claims by status").map(|r| r.slug),
            Some("claim-status-percentage")
        );
        assert!(find("no-such-report").is_none());
    }

    #[test]
    fn averaged_quantities_and_expiry_match_their_labels() {
        let per_receiver = find("avg-claimed-quantity-per-receiver").unwrap();
        assert!(per_receiver.label.contains("claimed quantity"));
        assert!(per_receiver.sql.contains("AVG(c.claimed_quantity)"));

        let expiry = find("avg-days-to-expiry").unwrap();
        assert!(expiry.label.contains("available listings"));
        assert!(expiry.sql.contains("WHERE status = 'Available'"));
    }

    #[test]
    fn both_days_to_claim_definitions_exist() {
        let forward = find("avg-days-listing-to-claim").unwrap();
        let backward = find("avg-days-claim-to-expiry").unwrap();
        assert!(forward.sql.contains("c.claimed_at - fl.created_date"));
        assert!(backward.sql.contains("fl.expiry_date - (c.claimed_at"));
    }

    #[test]
    fn ratio_reports_keep_groups_without_claims() {
        for report in CATALOG.iter().filter(|r| r.shape == ReportShape::Ratio) {
            assert!(report.sql.contains("LEFT JOIN"), "{}", report.slug);
            assert!(report.sql.contains("NULLIF"), "{}", report.slug);
        }
    }

    #[test]
    fn blank_or_missing_args_use_defaults() {
        let report = find("provider-contacts-in-city").unwrap();

        let none = HashMap::new();
        assert_eq!(report.bind_args(&none), vec![SqlParam::from("New Jessica")]);

        let blank = HashMap::from([("city".to_string(), "   ".to_string())]);
        assert_eq!(report.bind_args(&blank), vec![SqlParam::from("New Jessica")]);

        let given = HashMap::from([
            ("city".to_string(), " Springfield ".to_string()),
            ("ignored".to_string(), "x".to_string()),
        ]);
        assert_eq!(report.bind_args(&given), vec![SqlParam::from("Springfield")]);
    }

    #[test]
    fn parameterless_reports_bind_nothing() {
        let report = find("providers-per-city").unwrap();
        let args = HashMap::from([("city".to_string(), "Downtown".to_string())]);
        assert!(report.bind_args(&args).is_empty());
    }
}
