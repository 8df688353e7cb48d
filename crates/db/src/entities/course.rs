//! Course entity (the scheduling template lectures belong to).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Unique human-facing course code (e.g., "CS101")
    #[sea_orm(unique)]
    pub code: String,

    pub title: String,

    /// Number of sessions the course runs for
    pub total_sessions: i32,

    /// Weekly meeting day (0 = Sunday .. 6 = Saturday)
    #[sea_orm(nullable)]
    pub regular_day_of_week: Option<i16>,

    /// Weekly meeting start time ("HH:MM")
    #[sea_orm(nullable)]
    pub regular_start_time: Option<String>,

    /// Weekly meeting end time ("HH:MM")
    #[sea_orm(nullable)]
    pub regular_end_time: Option<String>,

    /// Date of the first session
    #[sea_orm(nullable)]
    pub first_session_date: Option<Date>,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lecture::Entity")]
    Lecture,
}

impl Related<super::lecture::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecture.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
