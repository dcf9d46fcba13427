use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "threads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub kind: String,
    pub created_by: i64,
    pub last_message_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::thread_participants::Entity")]
    Participants,
    #[sea_orm(has_many = "super::messages::Entity")]
    Messages,
}

impl Related<super::thread_participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_thread(self, participant_ids: Vec<i64>) -> crate::models::messaging::entities::Thread {
        use crate::models::messaging::entities::{Thread, ThreadKind};

        Thread {
            id: self.id,
            title: self.title,
            kind: self.kind.parse::<ThreadKind>().unwrap_or(ThreadKind::Direct),
            created_by: self.created_by,
            participant_ids,
            last_message_at: self.last_message_at.map(super::to_datetime),
            created_at: super::to_datetime(self.created_at),
        }
    }
}
