use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub relationship: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub occupation: Option<String>,
    pub is_primary_contact: bool,
    pub deleted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::parent_students::Entity")]
    Children,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::parent_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Children.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_parent(self, user: &super::users::Model) -> crate::models::parents::entities::Parent {
        use crate::models::parents::entities::{Parent, ParentRelationship};

        Parent {
            id: self.id,
            user_id: self.user_id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            relationship: self
                .relationship
                .parse::<ParentRelationship>()
                .unwrap_or(ParentRelationship::Guardian),
            phone: self.phone,
            address: self.address,
            occupation: self.occupation,
            is_primary_contact: self.is_primary_contact,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
