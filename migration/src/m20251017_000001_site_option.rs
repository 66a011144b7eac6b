use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteOption::Table)
                    .if_not_exists()
                    .col(pk_auto(SiteOption::Id))
                    .col(string_uniq(SiteOption::Name))
                    .col(text(SiteOption::Value))
                    .col(timestamp(SiteOption::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SiteOption::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SiteOption {
    Table,
    Id,
    Name,
    Value,
    UpdatedAt,
}
