//! Repository for the `favorites` table.

use favorites_core::favorites::{FavoritePredicate, FavoriteQuery};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::favorite::Favorite;
use crate::models::listing::FavoriteListingRow;

/// Column list for favorites queries.
const COLUMNS: &str = "id, profile_id, model_id, deleted, created_at, updated_at";

/// Join graph shared by the listing count and page queries.
const LISTING_FROM: &str = " FROM favorites f
    JOIN models m ON m.id = f.model_id
    JOIN profiles p ON p.id = m.profile_id
    LEFT JOIN categories c ON c.id = m.category_id";

/// Projection for one listing row. The caller's profile id is bound right
/// after this text for the `is_favorited_by_caller` sub-select.
const LISTING_SELECT: &str = "SELECT f.id AS favorite_id,
    m.id AS model_id, m.title, m.description, m.tags, m.created_at, m.updated_at, m.filename,
    p.id AS owner_id, p.username AS owner_username,
    c.id AS category_id, c.title AS category_title, c.slug AS category_slug,
    (SELECT COUNT(*) FROM favorites fc WHERE fc.model_id = m.id AND fc.deleted = FALSE) AS favorite_count,
    (SELECT COUNT(*) FROM downloads d WHERE d.model_id = m.id) AS download_count,
    EXISTS (SELECT 1 FROM favorites fv
            WHERE fv.model_id = m.id AND fv.deleted = FALSE AND fv.profile_id = ";

/// Query and toggle operations for favorites.
pub struct FavoriteRepo;

impl FavoriteRepo {
    // ── Listing ──────────────────────────────────────────────────────

    /// Count favorites matching every predicate.
    pub async fn count_matching(
        conn: &mut PgConnection,
        predicates: &[FavoritePredicate],
    ) -> Result<i64, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
        builder.push(LISTING_FROM);
        push_filters(&mut builder, predicates);

        builder.build_query_scalar::<i64>().fetch_one(conn).await
    }

    /// Fetch one ordered page of favorites matching the query's predicates.
    ///
    /// Rows are ordered by the favorite's `created_at`, then by its `id` in
    /// the same direction so equal timestamps page deterministically.
    pub async fn list_matching(
        conn: &mut PgConnection,
        query: &FavoriteQuery,
    ) -> Result<Vec<FavoriteListingRow>, sqlx::Error> {
        let direction = query.sort_direction.as_sql();

        let mut builder = QueryBuilder::<Postgres>::new(LISTING_SELECT);
        builder.push_bind(query.profile_id.clone());
        builder.push(") AS is_favorited_by_caller");
        builder.push(LISTING_FROM);
        push_filters(&mut builder, &query.predicates);
        builder.push(format!(
            " ORDER BY f.created_at {direction}, f.id {direction}"
        ));
        builder.push(" LIMIT ");
        builder.push_bind(query.limit);
        builder.push(" OFFSET ");
        builder.push_bind(query.offset);

        builder
            .build_query_as::<FavoriteListingRow>()
            .fetch_all(conn)
            .await
    }

    // ── Membership ───────────────────────────────────────────────────

    /// Find the active favorite for a (profile, model) pair, if any.
    pub async fn find_for_pair(
        pool: &PgPool,
        profile_id: &str,
        model_id: &str,
    ) -> Result<Option<Favorite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM favorites
             WHERE profile_id = $1 AND model_id = $2 AND deleted = FALSE"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(profile_id)
            .bind(model_id)
            .fetch_optional(pool)
            .await
    }

    /// Flip membership for a (profile, model) pair in one statement.
    ///
    /// Inserts an active row when the pair has none. Otherwise flips the
    /// existing row's `deleted` flag; re-activation stamps `created_at` with
    /// the current time so the favorite sorts as new. Concurrent calls for
    /// the same pair serialize on `uq_favorites_profile_model`.
    ///
    /// The returned row's `deleted` flag is the state after the toggle.
    pub async fn toggle(
        pool: &PgPool,
        profile_id: &str,
        model_id: &str,
    ) -> Result<Favorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO favorites (id, profile_id, model_id)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_favorites_profile_model DO UPDATE SET
                deleted = NOT favorites.deleted,
                created_at = CASE WHEN favorites.deleted THEN NOW() ELSE favorites.created_at END,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(Uuid::now_v7().to_string())
            .bind(profile_id)
            .bind(model_id)
            .fetch_one(pool)
            .await
    }

    /// Count every row (active or retired) stored for a pair.
    pub async fn count_rows_for_pair(
        pool: &PgPool,
        profile_id: &str,
        model_id: &str,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM favorites WHERE profile_id = $1 AND model_id = $2",
        )
        .bind(profile_id)
        .bind(model_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}

/// Render predicate fragments as a `WHERE` clause joined with `AND`.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, predicates: &[FavoritePredicate]) {
    if predicates.is_empty() {
        return;
    }

    builder.push(" WHERE ");
    let mut clauses = builder.separated(" AND ");
    for predicate in predicates {
        match predicate {
            FavoritePredicate::FavoriteActive => {
                clauses.push("f.deleted = FALSE");
            }
            FavoritePredicate::Profile(profile_id) => {
                clauses.push("f.profile_id = ");
                clauses.push_bind_unseparated(profile_id.clone());
            }
            FavoritePredicate::ModelActive => {
                clauses.push("m.active = TRUE");
            }
            FavoritePredicate::ModelNotDeleted => {
                clauses.push("m.deleted = FALSE");
            }
            FavoritePredicate::Category(category_id) => {
                clauses.push("m.category_id = ");
                clauses.push_bind_unseparated(*category_id);
            }
            FavoritePredicate::TagsOverlap(tags) => {
                clauses.push("m.tags && ");
                clauses.push_bind_unseparated(tags.clone());
                clauses.push_unseparated("::text[]");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use favorites_core::favorites::compose_predicates;

    use super::*;

    fn rendered(predicates: &[FavoritePredicate]) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1");
        push_filters(&mut builder, predicates);
        builder.sql().to_string()
    }

    #[test]
    fn base_filter_renders_four_conjuncts() {
        let sql = rendered(&compose_predicates("p1", None, &[]));
        assert_eq!(
            sql,
            "SELECT 1 WHERE f.deleted = FALSE AND f.profile_id = $1 \
             AND m.active = TRUE AND m.deleted = FALSE"
        );
    }

    #[test]
    fn optional_filters_bind_in_order() {
        let sql = rendered(&compose_predicates("p1", Some(5), &["a".to_string()]));
        assert!(sql.ends_with("AND m.category_id = $2 AND m.tags && $3::text[]"));
    }

    #[test]
    fn no_predicates_render_no_where() {
        assert_eq!(rendered(&[]), "SELECT 1");
    }
}
