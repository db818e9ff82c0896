//! City repository. Cities are returned with their country attached.

use sea_orm::ConnectionTrait;

use crate::adapters::cities_sea::{self as adapter, CityCreate, CityUpdate};
use crate::adapters::countries_sea;
use crate::domain::{City, CityDetails, CitySort, Country, Page, PageSpec};
use crate::entities::{cities, countries};
use crate::errors::domain::DomainError;

fn to_city(model: cities::Model, country: Option<countries::Model>) -> City {
    City {
        id: model.id,
        name: model.name,
        country: country.map(Country::from),
    }
}

async fn attach_country<C: ConnectionTrait>(
    conn: &C,
    model: cities::Model,
) -> Result<City, DomainError> {
    let country = match model.country_id {
        Some(country_id) => countries_sea::find_by_id(conn, country_id).await?,
        None => None,
    };
    Ok(to_city(model, country))
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Option<City>, DomainError> {
    match adapter::find_by_id(conn, id).await? {
        Some(model) => Ok(Some(attach_country(conn, model).await?)),
        None => Ok(None),
    }
}

/// Whether city `id` exists, without loading its country
pub async fn exists<C: ConnectionTrait>(conn: &C, id: i64) -> Result<bool, DomainError> {
    Ok(adapter::find_by_id(conn, id).await?.is_some())
}

pub async fn find_all<C: ConnectionTrait>(
    conn: &C,
    spec: &PageSpec<CitySort>,
) -> Result<Page<City>, DomainError> {
    let (rows, total) = adapter::find_page(conn, spec).await?;
    Ok(Page::new(rows, total, spec).map(|(city, country)| to_city(city, country)))
}

/// Insert a new city; the store assigns the id and enforces the country reference.
pub async fn create<C: ConnectionTrait>(
    conn: &C,
    details: CityDetails,
) -> Result<City, DomainError> {
    let model = adapter::create(
        conn,
        CityCreate {
            name: details.name,
            country_id: details.country_id,
        },
    )
    .await?;
    attach_country(conn, model).await
}

/// Overwrite every field of the existing city `id` with `details`.
pub async fn save<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    details: CityDetails,
) -> Result<City, DomainError> {
    let model = adapter::update(
        conn,
        CityUpdate {
            id,
            name: details.name,
            country_id: details.country_id,
        },
    )
    .await?;
    attach_country(conn, model).await
}

pub async fn delete_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<u64, DomainError> {
    Ok(adapter::delete_by_id(conn, id).await?)
}

pub async fn delete_all<C: ConnectionTrait>(conn: &C) -> Result<u64, DomainError> {
    Ok(adapter::delete_all(conn).await?)
}
