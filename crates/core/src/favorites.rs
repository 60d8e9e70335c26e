//! Listing criteria, validation, and predicate composition for favorites.
//!
//! A favorites listing is described by [`ListFavoritesCriteria`] (what the
//! caller asked for) and resolved into a [`FavoriteQuery`] (what the store
//! executes). The filter is an ordered list of [`FavoritePredicate`]
//! fragments that are AND-ed together by the persistence layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page size for favorites listings.
pub const DEFAULT_FAVORITES_LIMIT: i64 = 10;

/// Default number of rows skipped.
pub const DEFAULT_FAVORITES_OFFSET: i64 = 0;

// ---------------------------------------------------------------------------
// Sort direction
// ---------------------------------------------------------------------------

/// Ordering applied to the favorite's `created_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "ascending")]
    Asc,
    #[default]
    #[serde(alias = "descending")]
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(CoreError::InvalidArgument(format!(
                "Invalid sort direction '{other}'. Must be one of: asc, desc"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// Caller-supplied criteria for listing a profile's favorites.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListFavoritesCriteria {
    #[validate(custom(function = "validate_not_blank"))]
    pub profile_id: String,
    #[validate(range(min = 1, message = "limit must be a positive integer"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "offset must not be negative"))]
    pub offset: Option<i64>,
    pub sort_direction: Option<SortDirection>,
    pub category_id: Option<DbId>,
    pub tags: Option<Vec<String>>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("profile_id must not be empty".into());
        return Err(err);
    }
    Ok(())
}

impl ListFavoritesCriteria {
    /// Criteria with every optional field left at its default.
    pub fn for_profile(profile_id: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
            ..Self::default()
        }
    }

    /// Validate the criteria and resolve defaults into an executable query.
    pub fn resolve(&self) -> Result<FavoriteQuery, CoreError> {
        self.validate()?;

        let profile_id = self.profile_id.trim().to_string();
        let tags = self.tags.as_deref().map(normalize_tags).unwrap_or_default();
        let predicates = compose_predicates(&profile_id, self.category_id, &tags);

        Ok(FavoriteQuery {
            profile_id,
            limit: self.limit.unwrap_or(DEFAULT_FAVORITES_LIMIT),
            offset: self.offset.unwrap_or(DEFAULT_FAVORITES_OFFSET),
            sort_direction: self.sort_direction.unwrap_or_default(),
            predicates,
        })
    }
}

/// A validated listing with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteQuery {
    /// The caller; also used to compute `is_favorited_by_caller`.
    pub profile_id: String,
    pub limit: i64,
    pub offset: i64,
    pub sort_direction: SortDirection,
    pub predicates: Vec<FavoritePredicate>,
}

// ---------------------------------------------------------------------------
// Predicate fragments
// ---------------------------------------------------------------------------

/// One conjunct of the favorites filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritePredicate {
    /// `favorite.deleted = false`
    FavoriteActive,
    /// `favorite.profile_id = ?`
    Profile(String),
    /// `model.active = true`
    ModelActive,
    /// `model.deleted = false`
    ModelNotDeleted,
    /// `model.category_id = ?`
    Category(DbId),
    /// `model.tags` shares at least one element with the given set.
    TagsOverlap(Vec<String>),
}

/// Build the full conjunction for a listing.
///
/// The four base fragments are always present. The category fragment is
/// added only when a category is given and the tag fragment only when `tags`
/// is non-empty; an empty tag set never turns into "match nothing".
pub fn compose_predicates(
    profile_id: &str,
    category_id: Option<DbId>,
    tags: &[String],
) -> Vec<FavoritePredicate> {
    let mut predicates = vec![
        FavoritePredicate::FavoriteActive,
        FavoritePredicate::Profile(profile_id.to_string()),
        FavoritePredicate::ModelActive,
        FavoritePredicate::ModelNotDeleted,
    ];

    if let Some(category_id) = category_id {
        predicates.push(FavoritePredicate::Category(category_id));
    }

    if !tags.is_empty() {
        predicates.push(FavoritePredicate::TagsOverlap(tags.to_vec()));
    }

    predicates
}

/// Trim tags and drop blanks and duplicates, keeping first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Pagination arithmetic
// ---------------------------------------------------------------------------

/// Number of rows a page holds for a given total: `min(limit, total - offset)`,
/// or zero once `offset` reaches `total`.
pub fn expected_page_len(total: i64, limit: i64, offset: i64) -> i64 {
    if offset >= total {
        0
    } else {
        limit.min(total - offset)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    // -- resolve -------------------------------------------------------------

    #[test]
    fn resolve_applies_defaults() {
        let query = ListFavoritesCriteria::for_profile("p1").resolve().unwrap();
        assert_eq!(query.profile_id, "p1");
        assert_eq!(query.limit, DEFAULT_FAVORITES_LIMIT);
        assert_eq!(query.offset, DEFAULT_FAVORITES_OFFSET);
        assert_eq!(query.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn resolve_rejects_empty_profile() {
        let err = ListFavoritesCriteria::for_profile("").resolve().unwrap_err();
        assert_matches!(err, CoreError::InvalidArgument(_));
    }

    #[test]
    fn resolve_rejects_whitespace_profile() {
        let err = ListFavoritesCriteria::for_profile("   ").resolve().unwrap_err();
        assert_matches!(err, CoreError::InvalidArgument(_));
    }

    #[test]
    fn resolve_rejects_zero_limit() {
        let criteria = ListFavoritesCriteria {
            limit: Some(0),
            ..ListFavoritesCriteria::for_profile("p1")
        };
        assert_matches!(criteria.resolve(), Err(CoreError::InvalidArgument(_)));
    }

    #[test]
    fn resolve_rejects_negative_offset() {
        let criteria = ListFavoritesCriteria {
            offset: Some(-1),
            ..ListFavoritesCriteria::for_profile("p1")
        };
        assert_matches!(criteria.resolve(), Err(CoreError::InvalidArgument(_)));
    }

    #[test]
    fn resolve_keeps_explicit_paging() {
        let criteria = ListFavoritesCriteria {
            limit: Some(3),
            offset: Some(6),
            sort_direction: Some(SortDirection::Asc),
            ..ListFavoritesCriteria::for_profile("p1")
        };
        let query = criteria.resolve().unwrap();
        assert_eq!((query.limit, query.offset), (3, 6));
        assert_eq!(query.sort_direction, SortDirection::Asc);
    }

    // -- compose_predicates --------------------------------------------------

    #[test]
    fn base_predicates_always_present() {
        let predicates = compose_predicates("p1", None, &[]);
        assert_eq!(
            predicates,
            vec![
                FavoritePredicate::FavoriteActive,
                FavoritePredicate::Profile("p1".to_string()),
                FavoritePredicate::ModelActive,
                FavoritePredicate::ModelNotDeleted,
            ]
        );
    }

    #[test]
    fn category_adds_fragment() {
        let predicates = compose_predicates("p1", Some(5), &[]);
        assert!(predicates.contains(&FavoritePredicate::Category(5)));
    }

    #[test]
    fn category_and_tags_are_both_kept() {
        let predicates = compose_predicates("p1", Some(5), &tags(&["cyberpunk"]));
        assert!(predicates.contains(&FavoritePredicate::Category(5)));
        assert!(predicates.contains(&FavoritePredicate::TagsOverlap(tags(&["cyberpunk"]))));
        assert!(predicates.contains(&FavoritePredicate::ModelActive));
        assert!(predicates.contains(&FavoritePredicate::ModelNotDeleted));
    }

    #[test]
    fn empty_tags_add_no_fragment() {
        let predicates = compose_predicates("p1", None, &[]);
        assert!(!predicates
            .iter()
            .any(|p| matches!(p, FavoritePredicate::TagsOverlap(_))));
    }

    #[test]
    fn absent_and_empty_tags_resolve_identically() {
        let absent = ListFavoritesCriteria::for_profile("p1").resolve().unwrap();
        let empty = ListFavoritesCriteria {
            tags: Some(Vec::new()),
            ..ListFavoritesCriteria::for_profile("p1")
        }
        .resolve()
        .unwrap();
        let blanks = ListFavoritesCriteria {
            tags: Some(tags(&["", "  "])),
            ..ListFavoritesCriteria::for_profile("p1")
        }
        .resolve()
        .unwrap();
        assert_eq!(absent, empty);
        assert_eq!(absent, blanks);
    }

    // -- normalize_tags ------------------------------------------------------

    #[test]
    fn normalize_trims_and_dedupes() {
        assert_eq!(
            normalize_tags(&tags(&[" anime ", "anime", "", "sci-fi"])),
            tags(&["anime", "sci-fi"])
        );
    }

    // -- SortDirection -------------------------------------------------------

    #[test]
    fn sort_direction_parses_short_and_long_forms() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("Descending".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_matches!("sideways".parse::<SortDirection>(), Err(CoreError::InvalidArgument(_)));
    }

    #[test]
    fn sort_direction_deserializes_from_json() {
        let dir: SortDirection = serde_json::from_str("\"ascending\"").unwrap();
        assert_eq!(dir, SortDirection::Asc);
        let dir: SortDirection = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(dir, SortDirection::Desc);
    }

    // -- expected_page_len ---------------------------------------------------

    #[test]
    fn page_len_is_bounded_by_limit_and_remaining_rows() {
        assert_eq!(expected_page_len(25, 10, 0), 10);
        assert_eq!(expected_page_len(25, 10, 20), 5);
        assert_eq!(expected_page_len(25, 10, 25), 0);
        assert_eq!(expected_page_len(0, 10, 0), 0);
    }
}
