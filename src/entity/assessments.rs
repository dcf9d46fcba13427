use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub term_id: i64,
    pub subject_id: i64,
    pub classroom_id: Option<i64>,
    pub max_score: f64,
    pub weight: f64,
    pub held_on: Option<Date>,
    pub description: Option<String>,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assessment(self) -> crate::models::assessments::entities::Assessment {
        use crate::models::assessments::entities::{Assessment, AssessmentKind};

        Assessment {
            id: self.id,
            name: self.name,
            kind: self
                .kind
                .parse::<AssessmentKind>()
                .unwrap_or(AssessmentKind::Exam),
            term_id: self.term_id,
            subject_id: self.subject_id,
            classroom_id: self.classroom_id,
            max_score: self.max_score,
            weight: self.weight,
            held_on: self.held_on,
            description: self.description,
            created_by: self.created_by,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
