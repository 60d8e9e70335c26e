//! Repository for the `profiles` table.

use sqlx::PgPool;

use crate::models::profile::Profile;

/// Read access to profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find a profile by its ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Profile>, sqlx::Error> {
        sqlx::query_as::<_, Profile>("SELECT id, username FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
