use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Countries {
    Table,
    Id,
    Name,
    Code,
}

#[derive(Iden)]
enum Cities {
    Table,
    Id,
    Name,
    CountryId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // countries
        manager
            .create_table(
                Table::create()
                    .table(Countries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Countries::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Countries::Name).string().null())
                    .col(ColumnDef::new(Countries::Code).string().null())
                    .to_owned(),
            )
            .await?;

        // cities (country reference is nullable; no cascade so a referenced
        // country cannot be deleted out from under its cities)
        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cities::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Cities::Name).string().null())
                    .col(ColumnDef::new(Cities::CountryId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cities_country_id")
                            .from(Cities::Table, Cities::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_cities_country_id")
                    .table(Cities::Table)
                    .col(Cities::CountryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ix_cities_country_id")
                    .table(Cities::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Countries::Table).to_owned())
            .await?;

        Ok(())
    }
}
