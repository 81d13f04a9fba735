//! Create `advertisement` table. All content columns are required.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Advertisement::Table)
                    .if_not_exists()
                    .col(uuid(Advertisement::Id).primary_key())
                    .col(text(Advertisement::Title).not_null())
                    .col(text(Advertisement::Description).not_null())
                    .col(text(Advertisement::Image).not_null())
                    .col(timestamp_with_time_zone(Advertisement::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Advertisement::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Advertisement::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Advertisement { Table, Id, Title, Description, Image, CreatedAt, UpdatedAt }
