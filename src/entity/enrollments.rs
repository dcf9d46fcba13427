use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub application_id: i64,
    #[sea_orm(unique)]
    pub student_id: Option<i64>,
    #[sea_orm(unique)]
    pub admission_number: String,
    pub enrollment_date: Date,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::applications::Entity",
        from = "Column::ApplicationId",
        to = "super::applications::Column::Id",
        on_delete = "Cascade"
    )]
    Application,
    #[sea_orm(
        belongs_to = "super::student_profiles::Entity",
        from = "Column::StudentId",
        to = "super::student_profiles::Column::Id",
        on_delete = "SetNull"
    )]
    Student,
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl Related<super::student_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_enrollment(self) -> crate::models::admissions::entities::Enrollment {
        crate::models::admissions::entities::Enrollment {
            id: self.id,
            application_id: self.application_id,
            student_id: self.student_id,
            admission_number: self.admission_number,
            enrollment_date: self.enrollment_date,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
