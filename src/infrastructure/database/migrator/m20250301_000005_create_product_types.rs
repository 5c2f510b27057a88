//! Create product_types table and seed the accepted types

use sea_orm_migration::prelude::*;

use crate::infrastructure::seed;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProductTypes::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert()
            .into_table(ProductTypes::Table)
            .columns([ProductTypes::Id, ProductTypes::Name])
            .to_owned();
        for (id, name) in seed::PRODUCT_TYPES {
            insert.values_panic([id.into(), name.into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ProductTypes {
    Table,
    Id,
    Name,
}
