//! Create lecture table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lecture::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lecture::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lecture::CourseId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Lecture::SessionNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Lecture::Status)
                            .string_len(16)
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(Lecture::ScheduledStartTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(Lecture::ScheduledEndTime).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Lecture::IsRescheduled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Lecture::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Lecture::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lecture_course")
                            .from(Lecture::Table, Lecture::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (course_id, session_number) - one session N per course
        manager
            .create_index(
                Index::create()
                    .name("idx_lecture_course_session")
                    .table(Lecture::Table)
                    .col(Lecture::CourseId)
                    .col(Lecture::SessionNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: status (the maintenance jobs scan by status)
        manager
            .create_index(
                Index::create()
                    .name("idx_lecture_status")
                    .table(Lecture::Table)
                    .col(Lecture::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lecture::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Lecture {
    Table,
    Id,
    CourseId,
    SessionNumber,
    Status,
    ScheduledStartTime,
    ScheduledEndTime,
    IsRescheduled,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Course {
    Table,
    Id,
}
