//! Favorite / un-favorite a catalog model.

use favorites_core::error::CoreError;

use crate::error::FavoritesError;
use crate::models::favorite::{Favorite, ToggleResult};
use crate::models::profile::Profile;
use crate::repositories::FavoriteRepo;
use crate::DbPool;

/// Flips a profile's favorite membership for a model.
#[derive(Debug, Clone)]
pub struct FavoriteToggleService {
    pool: DbPool,
}

impl FavoriteToggleService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Favorite the model if the profile has not, otherwise un-favorite it.
    ///
    /// The read and the write are one conditional upsert, so two concurrent
    /// calls never both create a row and a cancelled call leaves no partial
    /// change behind.
    pub async fn toggle_favorite(
        &self,
        profile: &Profile,
        model_id: &str,
    ) -> Result<ToggleResult, FavoritesError> {
        let model_id = require_model_id(model_id)?;

        let row = FavoriteRepo::toggle(&self.pool, &profile.id, model_id)
            .await
            .map_err(|e| {
                let err = FavoritesError::from_favorite_write(e, &profile.id, model_id);
                if !err.is_client_error() {
                    tracing::error!(
                        profile_id = %profile.id,
                        model_id,
                        error = %err,
                        "Favorite toggle failed"
                    );
                }
                err
            })?;

        let result = ToggleResult::from_row(row);
        tracing::info!(
            profile_id = %profile.id,
            model_id,
            favorite_id = result.favorite_id(),
            favorited = result.is_favorited(),
            "Favorite toggled"
        );

        Ok(result)
    }

    /// The profile's active favorite for a model, if there is one.
    pub async fn current_favorite(
        &self,
        profile: &Profile,
        model_id: &str,
    ) -> Result<Option<Favorite>, FavoritesError> {
        let model_id = require_model_id(model_id)?;
        Ok(FavoriteRepo::find_for_pair(&self.pool, &profile.id, model_id).await?)
    }

    /// Whether the profile currently has the model favorited.
    pub async fn is_favorited(
        &self,
        profile: &Profile,
        model_id: &str,
    ) -> Result<bool, FavoritesError> {
        Ok(self.current_favorite(profile, model_id).await?.is_some())
    }
}

fn require_model_id(model_id: &str) -> Result<&str, CoreError> {
    let model_id = model_id.trim();
    if model_id.is_empty() {
        return Err(CoreError::InvalidArgument(
            "model_id must not be empty".to_string(),
        ));
    }
    Ok(model_id)
}
