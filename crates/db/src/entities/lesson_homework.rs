//! Homework assignment entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lesson_homework")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(nullable)]
    pub lesson_video_id: Option<String>,

    /// Assignment text.
    #[sea_orm(column_type = "Text")]
    pub homework: String,

    /// Optional attachment (homework allow-list).
    #[sea_orm(nullable)]
    pub file_url: Option<String>,

    /// Submissions strictly after this point are rejected.
    pub deadline: DateTimeWithTimeZone,

    /// Set once at insert, never updated.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lesson_video::Entity",
        from = "Column::LessonVideoId",
        to = "super::lesson_video::Column::Id",
        on_delete = "SetNull"
    )]
    LessonVideo,

    #[sea_orm(has_many = "super::homework_submission::Entity")]
    Submissions,
}

impl Related<super::lesson_video::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LessonVideo.def()
    }
}

impl Related<super::homework_submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
