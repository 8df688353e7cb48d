//! Post entity (anonymous student message against a lecture).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The lecture this post belongs to
    #[sea_orm(indexed)]
    pub lecture_id: String,

    /// Message body (1-200 characters, trimmed)
    pub content: String,

    /// Denormalized like counter; a cache of `count(like)`, never the
    /// source of truth
    pub like_count: i32,

    pub created_at: DateTimeWithTimeZone,

    /// Soft-delete marker; rows with this set are excluded from all reads
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lecture::Entity",
        from = "Column::LectureId",
        to = "super::lecture::Column::Id",
        on_delete = "Cascade"
    )]
    Lecture,

    #[sea_orm(has_many = "super::like::Entity")]
    Like,
}

impl Related<super::lecture::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecture.def()
    }
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Like.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
