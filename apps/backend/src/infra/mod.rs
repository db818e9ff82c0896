//! Store bootstrap, `DbErr` translation and `AppState` construction.

pub mod db;
pub mod db_errors;
pub mod state;
