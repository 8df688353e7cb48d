//! Summary entity (AI-generated digest of a lecture's posts).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "summary")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The lecture this summary digests; at most one summary per lecture
    #[sea_orm(unique)]
    pub lecture_id: String,

    #[sea_orm(column_type = "Text")]
    pub summary_text: String,

    /// Post count snapshot at generation time
    pub total_posts_count: i32,

    /// Like count snapshot at generation time
    pub total_likes_count: i32,

    pub created_at: DateTimeWithTimeZone,
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
}

impl Related<super::lecture::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecture.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
