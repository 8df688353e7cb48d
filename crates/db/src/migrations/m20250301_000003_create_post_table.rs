//! Create post table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Post::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Post::LectureId).string_len(32).not_null())
                    .col(ColumnDef::new(Post::Content).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Post::LikeCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Post::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Post::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_lecture")
                            .from(Post::Table, Post::LectureId)
                            .to(Lecture::Table, Lecture::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: lecture_id (for listing a lecture's posts)
        manager
            .create_index(
                Index::create()
                    .name("idx_post_lecture_id")
                    .table(Post::Table)
                    .col(Post::LectureId)
                    .to_owned(),
            )
            .await?;

        // Index: (lecture_id, like_count, created_at) for the popular sort
        manager
            .create_index(
                Index::create()
                    .name("idx_post_lecture_popularity")
                    .table(Post::Table)
                    .col(Post::LectureId)
                    .col(Post::LikeCount)
                    .col(Post::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Post {
    Table,
    Id,
    LectureId,
    Content,
    LikeCount,
    CreatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum Lecture {
    Table,
    Id,
}
