//! Country use cases.

use sea_orm::ConnectionTrait;
use tracing::{debug, info, warn};

use crate::domain::{Country, CountryDetails, CountrySort, Page, PageSpec};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::countries;

/// Country domain service.
pub struct CountryService;

impl CountryService {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        details: CountryDetails,
    ) -> Result<Country, DomainError> {
        let country = countries::create(conn, details).await?;
        info!(country_id = country.id, "countries.created");
        Ok(country)
    }

    /// Replace every field of country `id` with `details`.
    ///
    /// Fields left `None` in `details` are cleared.
    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
        details: CountryDetails,
    ) -> Result<Country, DomainError> {
        if countries::find_by_id(conn, id).await?.is_none() {
            warn!(country_id = id, "countries.update_missing");
            return Err(DomainError::entity_not_found(NotFoundKind::Country, id));
        }

        let country = countries::save(conn, id, details).await?;
        info!(country_id = id, "countries.updated");
        Ok(country)
    }

    /// Deleting an unknown id succeeds without effect.
    pub async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), DomainError> {
        let removed = countries::delete_by_id(conn, id).await?;
        debug!(country_id = id, removed, "countries.deleted");
        Ok(())
    }

    pub async fn find_all<C: ConnectionTrait>(
        &self,
        conn: &C,
        spec: &PageSpec<CountrySort>,
    ) -> Result<Page<Country>, DomainError> {
        countries::find_all(conn, spec).await
    }
}

impl Default for CountryService {
    fn default() -> Self {
        Self::new()
    }
}
