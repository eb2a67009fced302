//! Lesson video rating entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rating")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub lesson_video_id: String,

    /// NULL after the rating user is deleted; the score still counts.
    #[sea_orm(nullable)]
    pub user_id: Option<String>,

    /// 1..=5, validated by the service; (video, user) unique in the schema.
    pub score: i16,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lesson_video::Entity",
        from = "Column::LessonVideoId",
        to = "super::lesson_video::Column::Id",
        on_delete = "Cascade"
    )]
    LessonVideo,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::lesson_video::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LessonVideo.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
