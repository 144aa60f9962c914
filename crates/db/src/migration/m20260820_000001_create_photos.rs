//! Initial photos migration.
//!
//! Creates the photos table, an insertion-ordered index over stored blobs.
//! The sequence column renders as `BIGSERIAL` on Postgres and as
//! `INTEGER PRIMARY KEY AUTOINCREMENT` on sqlite; both assign strictly
//! increasing values that are not reused after deletes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Photos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Photos::Sequence)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Photos::Identifier)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Photos::OriginalFilename).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Photos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Photos {
    Table,
    Sequence,
    Identifier,
    OriginalFilename,
}
