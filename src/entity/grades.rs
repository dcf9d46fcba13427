use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub assessment_id: i64,
    pub score: f64,
    pub comments: Option<String>,
    pub graded_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id",
        on_delete = "Cascade"
    )]
    Assessment,
    #[sea_orm(
        belongs_to = "super::student_profiles::Entity",
        from = "Column::StudentId",
        to = "super::student_profiles::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl Related<super::student_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Percentage and letter are derived from the assessment's maximum score.
    pub fn into_grade(self, max_score: f64) -> crate::models::grades::entities::Grade {
        use crate::services::grades::calc;

        let percentage = calc::round2(calc::percentage(self.score, max_score));
        crate::models::grades::entities::Grade {
            id: self.id,
            student_id: self.student_id,
            assessment_id: self.assessment_id,
            score: self.score,
            max_score,
            percentage,
            letter_grade: calc::letter_grade(percentage),
            comments: self.comments,
            graded_by: self.graded_by,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Model;
    use crate::models::grades::entities::LetterGrade;

    #[test]
    fn test_letter_follows_rounded_percentage() {
        let row = Model {
            id: 1,
            student_id: 1,
            assessment_id: 1,
            score: 39.998,
            comments: None,
            graded_by: 1,
            created_at: 0,
            updated_at: 0,
        };
        let grade = row.into_grade(50.0);
        assert_eq!(grade.percentage, 80.0);
        assert_eq!(grade.letter_grade, LetterGrade::A);
    }
}
