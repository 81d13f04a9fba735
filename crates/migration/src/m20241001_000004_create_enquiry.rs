//! Create `enquiry` table for contact-form submissions.
//! The `(name, email)` uniqueness used by upserts is added in the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enquiry::Table)
                    .if_not_exists()
                    .col(uuid(Enquiry::Id).primary_key())
                    .col(text(Enquiry::Name).not_null())
                    .col(text(Enquiry::Email).not_null())
                    .col(text(Enquiry::Mobile).not_null())
                    .col(text(Enquiry::Subject).not_null())
                    .col(text(Enquiry::Address).not_null())
                    .col(text(Enquiry::Message).not_null())
                    .col(timestamp_with_time_zone(Enquiry::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Enquiry::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Enquiry::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Enquiry { Table, Id, Name, Email, Mobile, Subject, Address, Message, CreatedAt, UpdatedAt }
