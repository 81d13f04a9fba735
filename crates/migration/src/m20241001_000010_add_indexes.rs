use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Enquiry: composite unique (name, email) backs the ON CONFLICT upsert
        manager
            .create_index(
                Index::create()
                    .name("uniq_enquiry_name_email")
                    .table(Enquiry::Table)
                    .col(Enquiry::Name)
                    .col(Enquiry::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Listing order
        manager
            .create_index(
                Index::create()
                    .name("idx_advertisement_created_at")
                    .table(Advertisement::Table)
                    .col(Advertisement::CreatedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_service_created_at")
                    .table(Service::Table)
                    .col(Service::CreatedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_visitor_visit_time")
                    .table(Visitor::Table)
                    .col(Visitor::VisitTime)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_visitor_visit_time").table(Visitor::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_service_created_at").table(Service::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_advertisement_created_at").table(Advertisement::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("uniq_enquiry_name_email").table(Enquiry::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Enquiry { Table, Name, Email }

#[derive(DeriveIden)]
enum Advertisement { Table, CreatedAt }

#[derive(DeriveIden)]
enum Service { Table, CreatedAt }

#[derive(DeriveIden)]
enum Visitor { Table, VisitTime }
