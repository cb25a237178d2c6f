//! Outcomes of listing mutations.
//!
//! A statement that touches zero rows is not a failure: an update that
//! matched nothing is reported as "no changes" and a delete that matched
//! nothing means the row is already gone.

use serde::Serialize;

use crate::types::DbId;

/// What a listing mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationOutcome {
    Created,
    Updated,
    NoChanges,
    Deleted,
    AlreadyAbsent,
}

impl MutationOutcome {
    /// Classify an update by the number of rows it affected.
    pub fn from_update(rows_affected: u64) -> Self {
        if rows_affected > 0 {
            Self::Updated
        } else {
            Self::NoChanges
        }
    }

    /// Classify a delete by the number of rows it affected.
    pub fn from_delete(rows_affected: u64) -> Self {
        if rows_affected > 0 {
            Self::Deleted
        } else {
            Self::AlreadyAbsent
        }
    }

    /// Whether the database changed, and so cached views are stale.
    pub fn changed_rows(self) -> bool {
        matches!(self, Self::Created | Self::Updated | Self::Deleted)
    }

    /// Whether this outcome should be shown as a warning rather than a success.
    pub fn is_warning(self) -> bool {
        !self.changed_rows()
    }

    /// Human-readable message for the listing with `id`.
    pub fn message(self, id: DbId) -> String {
        match self {
            Self::Created => format!("Food item #{id} added successfully"),
            Self::Updated => format!("Food item #{id} updated successfully"),
            Self::NoChanges => format!("No changes made to food item #{id}"),
            Self::Deleted => format!("Food item #{id} deleted successfully"),
            Self::AlreadyAbsent => format!("No food item with ID #{id} was found or deleted"),
        }
    }
}

/// Response body for a listing mutation.
#[derive(Debug, Clone, Serialize)]
pub struct MutationReport {
    pub id: DbId,
    pub outcome: MutationOutcome,
    pub warning: bool,
    pub message: String,
}

impl MutationReport {
    pub fn new(id: DbId, outcome: MutationOutcome) -> Self {
        Self {
            id,
            outcome,
            warning: outcome.is_warning(),
            message: outcome.message(id),
        }
    }
}
