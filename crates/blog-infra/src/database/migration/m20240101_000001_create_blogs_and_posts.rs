//! Creates the `blogs` and `posts` relations.
//!
//! Every statement is `IF NOT EXISTS`, so applying it over an existing
//! schema leaves the data untouched.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Blogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Blogs::BlogId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Blogs::Url).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Posts::PostId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Posts::Title).string().not_null())
                    .col(ColumnDef::new(Posts::Content).text().not_null())
                    .col(ColumnDef::new(Posts::BlogId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_blog_id")
                            .from(Posts::Table, Posts::BlogId)
                            .to(Blogs::Table, Blogs::BlogId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_posts_blog_id")
                    .table(Posts::Table)
                    .col(Posts::BlogId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Blogs::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Blogs {
    Table,
    BlogId,
    Url,
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    PostId,
    Title,
    Content,
    BlogId,
}
