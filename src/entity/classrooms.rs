use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classrooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub grade_level_id: Option<i64>,
    pub class_teacher_id: Option<i64>,
    pub capacity: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::grade_levels::Entity",
        from = "Column::GradeLevelId",
        to = "super::grade_levels::Column::Id"
    )]
    GradeLevel,
}

impl Related<super::grade_levels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeLevel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_classroom(self) -> crate::models::academics::entities::Classroom {
        crate::models::academics::entities::Classroom {
            id: self.id,
            code: self.code,
            name: self.name,
            grade_level_id: self.grade_level_id,
            class_teacher_id: self.class_teacher_id,
            capacity: self.capacity,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
