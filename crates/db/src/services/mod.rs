//! Favorites services.
//!
//! Each service owns a clone of the pool it was constructed with. Clones are
//! cheap; the pool itself is created and closed by the entry point.

pub mod favorite_toggle;
pub mod favorites_query;

pub use favorite_toggle::FavoriteToggleService;
pub use favorites_query::FavoritesQueryService;
