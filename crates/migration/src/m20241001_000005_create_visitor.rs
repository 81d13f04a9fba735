//! Create `visitor` table: one row per client address.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visitor::Table)
                    .if_not_exists()
                    .col(uuid(Visitor::Id).primary_key())
                    .col(text(Visitor::IpAddress).unique_key().not_null())
                    .col(text(Visitor::City).not_null())
                    .col(text(Visitor::Region).not_null())
                    .col(text(Visitor::Country).not_null())
                    .col(timestamp_with_time_zone(Visitor::VisitTime).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Visitor::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Visitor { Table, Id, IpAddress, City, Region, Country, VisitTime }
