//! Lecture entity (one scheduled meeting of a course).
//!
//! This is the lifecycle state-machine subject: `status` only moves forward
//! along scheduled → active → ended → summarized.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lecture lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "ended")]
    Ended,
    #[sea_orm(string_value = "summarized")]
    Summarized,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lecture")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning course
    #[sea_orm(indexed)]
    pub course_id: String,

    /// Session number, unique within a course (1..total_sessions)
    pub session_number: i32,

    /// Lifecycle status
    pub status: Status,

    #[sea_orm(nullable)]
    pub scheduled_start_time: Option<DateTimeWithTimeZone>,

    #[sea_orm(nullable)]
    pub scheduled_end_time: Option<DateTimeWithTimeZone>,

    /// Set when the session was moved from its regular slot
    pub is_rescheduled: bool,

    pub created_at: DateTimeWithTimeZone,

    /// Last modification time; the auto-summarize job reads this as the
    /// fallback end time when no scheduled end time is set
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,

    #[sea_orm(has_many = "super::post::Entity")]
    Post,

    #[sea_orm(has_one = "super::summary::Entity")]
    Summary,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::summary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Summary.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
