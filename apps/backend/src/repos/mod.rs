//! Repositories: map adapter rows to domain models and `DbErr` to `DomainError`.

pub mod cities;
pub mod countries;
