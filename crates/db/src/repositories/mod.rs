//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Methods that must share a transaction take `&mut PgConnection`; the rest
//! accept `&PgPool`.

pub mod favorite_repo;
pub mod profile_repo;

pub use favorite_repo::FavoriteRepo;
pub use profile_repo::ProfileRepo;
