//! Favorite model and toggle outcome.

use favorites_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `favorites` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Favorite {
    pub id: String,
    pub profile_id: String,
    pub model_id: String,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Membership state of a (profile, model) pair after a toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ToggleResult {
    /// The pair is now favorited; `favorite` is the active row.
    Favorited { favorite: Favorite },
    /// The pair is no longer favorited; `removed_id` is the row that was retired.
    Unfavorited { removed_id: String },
}

impl ToggleResult {
    /// Map the row returned by the toggle statement to the resulting state.
    pub fn from_row(favorite: Favorite) -> Self {
        if favorite.deleted {
            ToggleResult::Unfavorited {
                removed_id: favorite.id,
            }
        } else {
            ToggleResult::Favorited { favorite }
        }
    }

    pub fn is_favorited(&self) -> bool {
        matches!(self, ToggleResult::Favorited { .. })
    }

    /// Id of the favorite row touched by the toggle.
    pub fn favorite_id(&self) -> &str {
        match self {
            ToggleResult::Favorited { favorite } => &favorite.id,
            ToggleResult::Unfavorited { removed_id } => removed_id,
        }
    }
}
