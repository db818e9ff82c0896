//! SeaORM adapter for the city repository - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryOrder, Set,
    Unchanged,
};

use crate::adapters::countries_sea::order_of;
use crate::domain::{CitySort, PageSpec};
use crate::entities::{cities, countries};

pub mod dto;

pub use dto::{CityCreate, CityUpdate};

fn sort_column(property: CitySort) -> cities::Column {
    match property {
        CitySort::Id => cities::Column::Id,
        CitySort::Name => cities::Column::Name,
        CitySort::Country => cities::Column::CountryId,
    }
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<cities::Model>, sea_orm::DbErr> {
    cities::Entity::find_by_id(id).one(conn).await
}

/// Fetch one page of cities joined with their country, plus the total count.
pub async fn find_page<C: ConnectionTrait>(
    conn: &C,
    spec: &PageSpec<CitySort>,
) -> Result<(Vec<(cities::Model, Option<countries::Model>)>, u64), sea_orm::DbErr> {
    let mut query = cities::Entity::find();
    if let Some(order) = spec.sort() {
        query = query.order_by(sort_column(order.property), order_of(order.direction));
    }
    if !matches!(spec.sort(), Some(o) if o.property == CitySort::Id) {
        query = query.order_by_asc(cities::Column::Id);
    }

    let paginator = query
        .find_also_related(countries::Entity)
        .paginate(conn, spec.size());
    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(spec.page()).await?;
    Ok((rows, total))
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    dto: CityCreate,
) -> Result<cities::Model, sea_orm::DbErr> {
    cities::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        country_id: Set(dto.country_id),
    }
    .insert(conn)
    .await
}

/// Overwrite every mutable column of an existing row.
///
/// Fails with `DbErr::RecordNotUpdated` if the id does not exist.
pub async fn update<C: ConnectionTrait>(
    conn: &C,
    dto: CityUpdate,
) -> Result<cities::Model, sea_orm::DbErr> {
    cities::ActiveModel {
        id: Unchanged(dto.id),
        name: Set(dto.name),
        country_id: Set(dto.country_id),
    }
    .update(conn)
    .await
}

pub async fn delete_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<u64, sea_orm::DbErr> {
    let result = cities::Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}

pub async fn delete_all<C: ConnectionTrait>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let result = cities::Entity::delete_many().exec(conn).await?;
    Ok(result.rows_affected)
}
