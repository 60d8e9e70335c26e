use favorites_core::error::CoreError;

/// PostgreSQL SQLSTATE for a foreign-key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Error returned by the favorites services.
///
/// Local input problems surface as [`CoreError`]; anything the store could
/// not complete surfaces as `PersistenceUnavailable` and is never retried here.
#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(#[from] sqlx::Error),
}

impl FavoritesError {
    /// Classify a failed write against `favorites`.
    ///
    /// Foreign-key violations name the constraint that failed, which tells us
    /// whether the model or the profile reference was dangling.
    pub fn from_favorite_write(err: sqlx::Error, profile_id: &str, model_id: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
                return match db_err.constraint() {
                    Some("fk_favorites_profile") => CoreError::InvalidReference {
                        entity: "Profile",
                        id: profile_id.to_string(),
                    }
                    .into(),
                    _ => CoreError::InvalidReference {
                        entity: "Model",
                        id: model_id.to_string(),
                    }
                    .into(),
                };
            }
        }
        FavoritesError::PersistenceUnavailable(err)
    }

    /// `true` for caller mistakes that retrying cannot fix.
    pub fn is_client_error(&self) -> bool {
        matches!(self, FavoritesError::Core(_))
    }
}
