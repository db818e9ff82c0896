//! City use cases.

use sea_orm::ConnectionTrait;
use tracing::{debug, info, warn};

use crate::domain::{City, CityDetails, CitySort, Page, PageSpec};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::cities;

/// City domain service.
pub struct CityService;

impl CityService {
    pub fn new() -> Self {
        Self
    }

    /// Insert a city. A country id that does not exist is rejected by the store.
    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        details: CityDetails,
    ) -> Result<City, DomainError> {
        let city = cities::create(conn, details).await?;
        info!(city_id = city.id, country_id = ?city.country_id(), "cities.created");
        Ok(city)
    }

    /// Replace every field of city `id` with `details`.
    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
        details: CityDetails,
    ) -> Result<City, DomainError> {
        if !cities::exists(conn, id).await? {
            warn!(city_id = id, "cities.update_missing");
            return Err(DomainError::entity_not_found(NotFoundKind::City, id));
        }

        let city = cities::save(conn, id, details).await?;
        info!(city_id = id, "cities.updated");
        Ok(city)
    }

    pub async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), DomainError> {
        let removed = cities::delete_by_id(conn, id).await?;
        debug!(city_id = id, removed, "cities.deleted");
        Ok(())
    }

    pub async fn find_all<C: ConnectionTrait>(
        &self,
        conn: &C,
        spec: &PageSpec<CitySort>,
    ) -> Result<Page<City>, DomainError> {
        cities::find_all(conn, spec).await
    }
}

impl Default for CityService {
    fn default() -> Self {
        Self::new()
    }
}
