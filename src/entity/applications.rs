use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub gender: String,
    pub grade_level_id: i64,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub guardian_email: Option<String>,
    pub address: Option<String>,
    pub previous_school: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub submitted_at: i64,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<i64>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::grade_levels::Entity",
        from = "Column::GradeLevelId",
        to = "super::grade_levels::Column::Id",
        on_delete = "Restrict"
    )]
    GradeLevel,
    #[sea_orm(has_one = "super::enrollments::Entity")]
    Enrollment,
}

impl Related<super::grade_levels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeLevel.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_application(self) -> crate::models::admissions::entities::Application {
        use crate::models::admissions::entities::{Application, ApplicationStatus};
        use crate::models::students::entities::Gender;

        Application {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender.parse::<Gender>().unwrap_or(Gender::Other),
            grade_level_id: self.grade_level_id,
            guardian_name: self.guardian_name,
            guardian_phone: self.guardian_phone,
            guardian_email: self.guardian_email,
            address: self.address,
            previous_school: self.previous_school,
            notes: self.notes,
            status: self
                .status
                .parse::<ApplicationStatus>()
                .unwrap_or(ApplicationStatus::New),
            submitted_at: super::to_datetime(self.submitted_at),
            reviewed_by: self.reviewed_by,
            reviewed_at: self.reviewed_at.map(super::to_datetime),
        }
    }
}
