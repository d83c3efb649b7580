use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Favourites::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Favourites::UserId).integer().not_null())
                    .col(ColumnDef::new(Favourites::ProductId).integer().not_null())
                    .col(ColumnDef::new(Favourites::LikeDate).timestamp().not_null())
                    .primary_key(
                        Index::create()
                            .col(Favourites::UserId)
                            .col(Favourites::ProductId)
                            .col(Favourites::LikeDate),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Favourites::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum Favourites {
    Table,
    UserId,
    ProductId,
    LikeDate,
}
