//! Creates the `url_records` table.
//!
//! The primary key on `short_code` is what makes reservation atomic: a
//! conflicting insert is rejected by the database itself.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UrlRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UrlRecords::ShortCode)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UrlRecords::LongUrl).text().not_null())
                    .col(
                        ColumnDef::new(UrlRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UrlRecords::OwnerId).string().null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UrlRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UrlRecords {
    Table,
    ShortCode,
    LongUrl,
    CreatedAt,
    OwnerId,
}
