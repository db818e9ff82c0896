//! Country repository: the persistence gateway services talk to.

use sea_orm::ConnectionTrait;

use crate::adapters::countries_sea::{self as adapter, CountryCreate, CountryUpdate};
use crate::domain::{Country, CountryDetails, CountrySort, Page, PageSpec};
use crate::entities::countries;
use crate::errors::domain::DomainError;

impl From<countries::Model> for Country {
    fn from(model: countries::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code: model.code,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<Country>, DomainError> {
    Ok(adapter::find_by_id(conn, id).await?.map(Country::from))
}

pub async fn find_all<C: ConnectionTrait>(
    conn: &C,
    spec: &PageSpec<CountrySort>,
) -> Result<Page<Country>, DomainError> {
    let (rows, total) = adapter::find_page(conn, spec).await?;
    Ok(Page::new(rows, total, spec).map(Country::from))
}

/// Insert a new country; the store assigns the id.
pub async fn create<C: ConnectionTrait>(
    conn: &C,
    details: CountryDetails,
) -> Result<Country, DomainError> {
    let model = adapter::create(
        conn,
        CountryCreate {
            name: details.name,
            code: details.code,
        },
    )
    .await?;
    Ok(model.into())
}

/// Overwrite every field of the existing country `id` with `details`.
pub async fn save<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    details: CountryDetails,
) -> Result<Country, DomainError> {
    let model = adapter::update(
        conn,
        CountryUpdate {
            id,
            name: details.name,
            code: details.code,
        },
    )
    .await?;
    Ok(model.into())
}

pub async fn delete_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<u64, DomainError> {
    Ok(adapter::delete_by_id(conn, id).await?)
}

pub async fn delete_all<C: ConnectionTrait>(conn: &C) -> Result<u64, DomainError> {
    Ok(adapter::delete_all(conn).await?)
}
