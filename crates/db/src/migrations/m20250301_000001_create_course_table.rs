//! Create course table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Course::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Course::Code).string_len(32).not_null())
                    .col(ColumnDef::new(Course::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Course::TotalSessions).integer().not_null())
                    .col(ColumnDef::new(Course::RegularDayOfWeek).small_integer())
                    .col(ColumnDef::new(Course::RegularStartTime).string_len(8))
                    .col(ColumnDef::new(Course::RegularEndTime).string_len(8))
                    .col(ColumnDef::new(Course::FirstSessionDate).date())
                    .col(
                        ColumnDef::new(Course::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Course::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: code - one course per human-facing code
        manager
            .create_index(
                Index::create()
                    .name("idx_course_code")
                    .table(Course::Table)
                    .col(Course::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Course {
    Table,
    Id,
    Code,
    Title,
    TotalSessions,
    RegularDayOfWeek,
    RegularStartTime,
    RegularEndTime,
    FirstSessionDate,
    CreatedAt,
    UpdatedAt,
}
