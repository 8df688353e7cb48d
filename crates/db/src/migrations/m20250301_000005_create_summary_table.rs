//! Create summary table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Summary::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Summary::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Summary::LectureId).string_len(32).not_null())
                    .col(ColumnDef::new(Summary::SummaryText).text().not_null())
                    .col(
                        ColumnDef::new(Summary::TotalPostsCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Summary::TotalLikesCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Summary::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_summary_lecture")
                            .from(Summary::Table, Summary::LectureId)
                            .to(Lecture::Table, Lecture::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: lecture_id - at most one summary per lecture; the
        // summarization pipeline's race arbiter
        manager
            .create_index(
                Index::create()
                    .name("idx_summary_lecture_id")
                    .table(Summary::Table)
                    .col(Summary::LectureId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Summary::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Summary {
    Table,
    Id,
    LectureId,
    SummaryText,
    TotalPostsCount,
    TotalLikesCount,
    CreatedAt,
}

#[derive(Iden)]
enum Lecture {
    Table,
    Id,
}
