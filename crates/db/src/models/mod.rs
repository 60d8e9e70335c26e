//! Row structs and result shapes.
//!
//! Row structs derive `FromRow` and match the SQL column names; the shaped
//! types derive `Serialize` and are what the services hand back.

pub mod favorite;
pub mod listing;
pub mod profile;
