//! Profile model.

use serde::Serialize;
use sqlx::FromRow;

/// A resolved, authenticated profile (row from `profiles`).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
}
