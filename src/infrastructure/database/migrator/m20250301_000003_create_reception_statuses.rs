//! Create reception_statuses table and seed in_progress / closed

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
                    .table(ReceptionStatuses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReceptionStatuses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ReceptionStatuses::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert()
            .into_table(ReceptionStatuses::Table)
            .columns([ReceptionStatuses::Id, ReceptionStatuses::Name])
            .to_owned();
        for (id, kind) in seed::RECEPTION_STATUSES {
            insert.values_panic([id.into(), kind.as_str().into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReceptionStatuses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReceptionStatuses {
    Table,
    Id,
    Name,
}
