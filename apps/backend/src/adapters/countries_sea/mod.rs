//! SeaORM adapter for the country repository - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, Order, PaginatorTrait, QueryOrder,
    Set, Unchanged,
};

use crate::domain::{CountrySort, PageSpec, SortDirection};
use crate::entities::countries;

pub mod dto;

pub use dto::{CountryCreate, CountryUpdate};

// Adapter functions return DbErr; the repos layer maps to DomainError via From<DbErr>.

pub(crate) fn order_of(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

fn sort_column(property: CountrySort) -> countries::Column {
    match property {
        CountrySort::Id => countries::Column::Id,
        CountrySort::Name => countries::Column::Name,
        CountrySort::Code => countries::Column::Code,
    }
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<countries::Model>, sea_orm::DbErr> {
    countries::Entity::find_by_id(id).one(conn).await
}

/// Fetch one page plus the total row count.
///
/// Rows are ordered by the requested sort, then by id so pages are stable.
pub async fn find_page<C: ConnectionTrait>(
    conn: &C,
    spec: &PageSpec<CountrySort>,
) -> Result<(Vec<countries::Model>, u64), sea_orm::DbErr> {
    let mut query = countries::Entity::find();
    if let Some(order) = spec.sort() {
        query = query.order_by(sort_column(order.property), order_of(order.direction));
    }
    if !matches!(spec.sort(), Some(o) if o.property == CountrySort::Id) {
        query = query.order_by_asc(countries::Column::Id);
    }

    let paginator = query.paginate(conn, spec.size());
    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(spec.page()).await?;
    Ok((rows, total))
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    dto: CountryCreate,
) -> Result<countries::Model, sea_orm::DbErr> {
    countries::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        code: Set(dto.code),
    }
    .insert(conn)
    .await
}

/// Overwrite every mutable column of an existing row.
///
/// Fails with `DbErr::RecordNotUpdated` if the id does not exist.
pub async fn update<C: ConnectionTrait>(
    conn: &C,
    dto: CountryUpdate,
) -> Result<countries::Model, sea_orm::DbErr> {
    countries::ActiveModel {
        id: Unchanged(dto.id),
        name: Set(dto.name),
        code: Set(dto.code),
    }
    .update(conn)
    .await
}

/// Returns the number of rows removed (0 when the id is unknown).
pub async fn delete_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<u64, sea_orm::DbErr> {
    let result = countries::Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}

pub async fn delete_all<C: ConnectionTrait>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let result = countries::Entity::delete_many().exec(conn).await?;
    Ok(result.rows_affected)
}
