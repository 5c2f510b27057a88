//! Create products table

use sea_orm_migration::prelude::*;

use super::m20250301_000004_create_receptions::Receptions;
use super::m20250301_000005_create_product_types::ProductTypes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Products::DateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Products::TypeId).integer().not_null())
                    .col(ColumnDef::new(Products::ReceptionId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_reception")
                            .from(Products::Table, Products::ReceptionId)
                            .to(Receptions::Table, Receptions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_type")
                            .from(Products::Table, Products::TypeId)
                            .to(ProductTypes::Table, ProductTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_reception_date_time")
                    .table(Products::Table)
                    .col(Products::ReceptionId)
                    .col(Products::DateTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Products {
    Table,
    Id,
    DateTime,
    TypeId,
    ReceptionId,
}
