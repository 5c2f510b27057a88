//! Create pickup_points table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_cities::Cities;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PickupPoints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PickupPoints::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PickupPoints::RegistrationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PickupPoints::CityId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pickup_points_city")
                            .from(PickupPoints::Table, PickupPoints::CityId)
                            .to(Cities::Table, Cities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pickup_points_registration_date")
                    .table(PickupPoints::Table)
                    .col(PickupPoints::RegistrationDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PickupPoints::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PickupPoints {
    Table,
    Id,
    RegistrationDate,
    CityId,
}
