use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_structures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub grade_level_id: i64,
    pub term_id: i64,
    pub fee_type: String,
    pub amount_cents: i64,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_fee_structure(self) -> crate::models::fees::entities::FeeStructure {
        use crate::models::fees::entities::{FeeStructure, FeeType};

        FeeStructure {
            id: self.id,
            grade_level_id: self.grade_level_id,
            term_id: self.term_id,
            fee_type: self.fee_type.parse::<FeeType>().unwrap_or(FeeType::Other),
            amount_cents: self.amount_cents,
            description: self.description,
            is_active: self.is_active,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
