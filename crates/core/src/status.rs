//! Status vocabularies stored as `VARCHAR` columns.
//!
//! Each enum's labels match the `CHECK` constraints in the schema DDL
//! exactly (case-sensitive), so a label round-trips through the database
//! unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in lifecycle order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The label stored in the database.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $label => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {}: '{other}'",
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

define_status_enum! {
    /// Registration status shared by providers and receivers.
    RegistrationStatus {
        Active => "Active",
        Inactive => "Inactive",
    }
}

define_status_enum! {
    /// Food listing status. Transitions are driven outside this service.
    ListingStatus {
        Available => "Available",
        Claimed => "Claimed",
        Expired => "Expired",
    }
}

define_status_enum! {
    /// Claim lifecycle: Pending -> Approved -> Completed, or Cancelled.
    ClaimStatus {
        Pending => "Pending",
        Approved => "Approved",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

impl ClaimStatus {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: ClaimStatus) -> bool {
        matches!(
            (self, next),
            (ClaimStatus::Pending, ClaimStatus::Approved)
                | (ClaimStatus::Pending, ClaimStatus::Cancelled)
                | (ClaimStatus::Approved, ClaimStatus::Completed)
                | (ClaimStatus::Approved, ClaimStatus::Cancelled)
        )
    }
}

/// Render a status list as a SQL `IN (...)` body for CHECK constraints.
pub fn sql_label_list(labels: &[&str]) -> String {
    labels
        .iter()
        .map(|l| format!("'{l}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
