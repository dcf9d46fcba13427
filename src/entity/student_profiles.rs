use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub admission_number: String,
    pub grade_level_id: i64,
    pub classroom_id: Option<i64>,
    pub gender: Option<String>,
    pub date_of_birth: Option<Date>,
    pub enrollment_date: Date,
    pub academic_status: String,
    pub is_boarder: bool,
    pub medical_notes: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::grade_levels::Entity",
        from = "Column::GradeLevelId",
        to = "super::grade_levels::Column::Id"
    )]
    GradeLevel,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::grade_levels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeLevel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Joins the profile with its user row for names and email.
    pub fn into_student(self, user: &super::users::Model) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{AcademicStatus, Gender, Student};

        Student {
            id: self.id,
            user_id: self.user_id,
            admission_number: self.admission_number,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            grade_level_id: self.grade_level_id,
            classroom_id: self.classroom_id,
            gender: self.gender.and_then(|g| g.parse::<Gender>().ok()),
            date_of_birth: self.date_of_birth,
            enrollment_date: self.enrollment_date,
            academic_status: self
                .academic_status
                .parse::<AcademicStatus>()
                .unwrap_or(AcademicStatus::Active),
            is_boarder: self.is_boarder,
            medical_notes: self.medical_notes,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
