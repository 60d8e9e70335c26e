//! Shapes returned by the favorites listing.
//!
//! [`ModelCardRow`] is the flat projection a catalog query selects for one
//! model; [`ModelCard`] is its nested, serializable form. The conversion is
//! independent of favorites so any model listing can reuse it, provided the
//! query computes `is_favorited_by_caller` for its own caller.

use favorites_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Row structs
// ---------------------------------------------------------------------------

/// Flat projection of a model with its owner, category, and counts.
#[derive(Debug, Clone, FromRow)]
pub struct ModelCardRow {
    pub model_id: String,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub filename: String,
    pub owner_id: String,
    pub owner_username: String,
    pub category_id: Option<DbId>,
    pub category_title: Option<String>,
    pub category_slug: Option<String>,
    pub favorite_count: i64,
    pub download_count: i64,
    pub is_favorited_by_caller: bool,
}

/// One row of the favorites listing.
#[derive(Debug, Clone, FromRow)]
pub struct FavoriteListingRow {
    pub favorite_id: String,
    #[sqlx(flatten)]
    pub model: ModelCardRow,
}

// ---------------------------------------------------------------------------
// Shaped results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
}

/// Aggregate counts; `favorites` counts active favorites only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelCounts {
    pub favorites: i64,
    pub downloads: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelCard {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub filename: String,
    pub profile: ProfileSummary,
    pub category: Option<CategorySummary>,
    pub counts: ModelCounts,
    pub is_favorited_by_caller: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedFavorite {
    pub id: String,
    pub model: ModelCard,
}

/// A page of results plus the size of the full matching set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub total: i64,
    pub data: Vec<T>,
}

impl From<ModelCardRow> for ModelCard {
    fn from(row: ModelCardRow) -> Self {
        // The category is present only when the LEFT JOIN matched.
        let category = match (row.category_id, row.category_title, row.category_slug) {
            (Some(id), Some(title), Some(slug)) => Some(CategorySummary { id, title, slug }),
            _ => None,
        };

        ModelCard {
            id: row.model_id,
            title: row.title,
            description: row.description,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
            filename: row.filename,
            profile: ProfileSummary {
                id: row.owner_id,
                username: row.owner_username,
            },
            category,
            counts: ModelCounts {
                favorites: row.favorite_count,
                downloads: row.download_count,
            },
            is_favorited_by_caller: row.is_favorited_by_caller,
        }
    }
}

impl From<FavoriteListingRow> for EnrichedFavorite {
    fn from(row: FavoriteListingRow) -> Self {
        EnrichedFavorite {
            id: row.favorite_id,
            model: row.model.into(),
        }
    }
}
