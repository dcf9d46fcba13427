use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "terms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub academic_year: String,
    pub start_date: Date,
    pub end_date: Date,
    pub is_current: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_term(self) -> crate::models::academics::entities::Term {
        crate::models::academics::entities::Term {
            id: self.id,
            name: self.name,
            academic_year: self.academic_year,
            start_date: self.start_date,
            end_date: self.end_date,
            is_current: self.is_current,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
