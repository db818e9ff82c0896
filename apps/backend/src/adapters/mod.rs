//! SeaORM adapters; each returns `sea_orm::DbErr` and works on any connection or transaction.

pub mod cities_sea;
pub mod countries_sea;
