use std::collections::HashMap;

use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::{assessments, grades, subjects};
use crate::errors::{Result, SchoolError};
use crate::models::PaginatedResponse;
use crate::models::grades::{
    entities::{Grade, ReportEntry},
    requests::{CreateGradeRequest, UpdateGradeRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// Maximum score per assessment id, needed to derive percentages.
    async fn assessment_max_scores(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, f64>> {
        let mut ids: Vec<i64> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(i64, f64)> = assessments::Entity::find()
            .select_only()
            .column(assessments::Column::Id)
            .column(assessments::Column::MaxScore)
            .filter(assessments::Column::Id.is_in(ids))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load assessments"))?;
        Ok(rows.into_iter().collect())
    }

    async fn with_max_scores(&self, rows: Vec<grades::Model>) -> Result<Vec<Grade>> {
        let max_scores = self
            .assessment_max_scores(rows.iter().map(|r| r.assessment_id))
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let max_score = *max_scores.get(&row.assessment_id)?;
                Some(row.into_grade(max_score))
            })
            .collect())
    }

    pub async fn create_grade_impl(&self, req: CreateGradeRequest, graded_by: i64) -> Result<Grade> {
        let now = now_ts();
        let model = grades::ActiveModel {
            student_id: Set(req.student_id),
            assessment_id: Set(req.assessment_id),
            score: Set(req.score),
            comments: Set(req.comments),
            graded_by: Set(graded_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let row = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to record grade"))?;
        self.with_max_scores(vec![row])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::not_found("Assessment not found"))
    }

    pub async fn get_grade_impl(&self, id: i64) -> Result<Option<Grade>> {
        let row = grades::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query grade"))?;
        match row {
            Some(row) => Ok(self.with_max_scores(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list_grades_impl(
        &self,
        page: i64,
        size: i64,
        student_id: Option<i64>,
        assessment_id: Option<i64>,
        term_id: Option<i64>,
    ) -> Result<PaginatedResponse<Grade>> {
        let mut select = grades::Entity::find();
        if let Some(student_id) = student_id {
            select = select.filter(grades::Column::StudentId.eq(student_id));
        }
        if let Some(assessment_id) = assessment_id {
            select = select.filter(grades::Column::AssessmentId.eq(assessment_id));
        }
        if let Some(term_id) = term_id {
            let ids: Vec<i64> = assessments::Entity::find()
                .select_only()
                .column(assessments::Column::Id)
                .filter(assessments::Column::TermId.eq(term_id))
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(db_error("Failed to load assessments"))?;
            select = select.filter(grades::Column::AssessmentId.is_in(ids));
        }
        select = select
            .order_by_desc(grades::Column::CreatedAt)
            .order_by_desc(grades::Column::Id);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list grades")
            .await?;
        Ok(PaginatedResponse {
            items: self.with_max_scores(rows).await?,
            pagination,
        })
    }

    pub async fn update_grade_impl(&self, id: i64, req: UpdateGradeRequest) -> Result<Option<Grade>> {
        if self.get_grade_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = grades::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(score) = req.score {
            model.score = Set(score);
        }
        if let Some(comments) = req.comments {
            model.comments = Set(Some(comments));
        }

        let row = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update grade"))?;
        Ok(self.with_max_scores(vec![row]).await?.pop())
    }

    pub async fn delete_grade_impl(&self, id: i64) -> Result<bool> {
        let result = grades::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete grade"))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_report_entries_impl(
        &self,
        student_id: i64,
        term_id: i64,
    ) -> Result<Vec<ReportEntry>> {
        let term_assessments: HashMap<i64, assessments::Model> = assessments::Entity::find()
            .filter(assessments::Column::TermId.eq(term_id))
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load assessments"))?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();
        if term_assessments.is_empty() {
            return Ok(Vec::new());
        }

        let grade_rows = grades::Entity::find()
            .filter(grades::Column::StudentId.eq(student_id))
            .filter(grades::Column::AssessmentId.is_in(term_assessments.keys().copied()))
            .order_by_asc(grades::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load grades"))?;

        let subject_ids: Vec<i64> = grade_rows
            .iter()
            .filter_map(|g| term_assessments.get(&g.assessment_id).map(|a| a.subject_id))
            .collect();
        let subjects: HashMap<i64, subjects::Model> = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(subject_ids))
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load subjects"))?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        Ok(grade_rows
            .into_iter()
            .filter_map(|grade| {
                let assessment = term_assessments.get(&grade.assessment_id)?;
                let subject = subjects.get(&assessment.subject_id)?;
                Some(ReportEntry {
                    subject_id: subject.id,
                    subject_code: subject.code.clone(),
                    subject_name: subject.name.clone(),
                    credit_hours: subject.credit_hours,
                    score: grade.score,
                    max_score: assessment.max_score,
                    weight: assessment.weight,
                })
            })
            .collect())
    }
}
