//! Create receptions table
//!
//! The partial unique index allows at most one in-progress reception per
//! pickup point; a concurrent second insert fails with a unique violation.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use super::m20250301_000002_create_pickup_points::PickupPoints;
use super::m20250301_000003_create_reception_statuses::ReceptionStatuses;
use crate::infrastructure::seed;

pub const ONE_IN_PROGRESS_INDEX: &str = "ux_receptions_one_in_progress";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Receptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Receptions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Receptions::PickupPointId).uuid().not_null())
                    .col(
                        ColumnDef::new(Receptions::DateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Receptions::StatusId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_receptions_pickup_point")
                            .from(Receptions::Table, Receptions::PickupPointId)
                            .to(PickupPoints::Table, PickupPoints::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_receptions_status")
                            .from(Receptions::Table, Receptions::StatusId)
                            .to(ReceptionStatuses::Table, ReceptionStatuses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_receptions_pickup_point")
                    .table(Receptions::Table)
                    .col(Receptions::PickupPointId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_receptions_date_time")
                    .table(Receptions::Table)
                    .col(Receptions::DateTime)
                    .to_owned(),
            )
            .await?;

        // Partial indexes are not expressible through the schema builder
        manager
            .get_connection()
            .execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {} ON receptions (pickup_point_id) WHERE status_id = {}",
                ONE_IN_PROGRESS_INDEX,
                seed::IN_PROGRESS_STATUS_ID
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Receptions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Receptions {
    Table,
    Id,
    PickupPointId,
    DateTime,
    StatusId,
}
