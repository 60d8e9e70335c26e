//! Paginated, filtered listing of a profile's favorites.

use favorites_core::favorites::ListFavoritesCriteria;

use crate::error::FavoritesError;
use crate::models::listing::{EnrichedFavorite, Page};
use crate::repositories::FavoriteRepo;
use crate::DbPool;

/// Lists favorites with a total count taken from the same snapshot as the page.
#[derive(Debug, Clone)]
pub struct FavoritesQueryService {
    pool: DbPool,
}

impl FavoritesQueryService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List one page of the caller's favorites.
    ///
    /// The count and the page run inside a single `REPEATABLE READ` read-only
    /// transaction, so `total` always describes the set the page was cut from.
    pub async fn list_favorites(
        &self,
        criteria: &ListFavoritesCriteria,
    ) -> Result<Page<EnrichedFavorite>, FavoritesError> {
        let query = criteria.resolve()?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let total = FavoriteRepo::count_matching(&mut *tx, &query.predicates).await?;
        let rows = FavoriteRepo::list_matching(&mut *tx, &query).await?;
        tx.commit().await?;

        tracing::debug!(
            profile_id = %query.profile_id,
            total,
            returned = rows.len(),
            limit = query.limit,
            offset = query.offset,
            "Listed favorites"
        );

        Ok(Page {
            total,
            data: rows.into_iter().map(EnrichedFavorite::from).collect(),
        })
    }
}
