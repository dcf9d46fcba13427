use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::{assessments, grades};
use crate::errors::Result;
use crate::models::PaginatedResponse;
use crate::models::assessments::{
    entities::Assessment,
    requests::{CreateAssessmentRequest, UpdateAssessmentRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_assessment_impl(
        &self,
        req: CreateAssessmentRequest,
        created_by: i64,
    ) -> Result<Assessment> {
        let now = now_ts();
        let model = assessments::ActiveModel {
            name: Set(req.name),
            kind: Set(req.kind.to_string()),
            term_id: Set(req.term_id),
            subject_id: Set(req.subject_id),
            classroom_id: Set(req.classroom_id),
            max_score: Set(req.max_score),
            weight: Set(req.weight),
            held_on: Set(req.held_on),
            description: Set(req.description),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let row = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create assessment"))?;
        Ok(row.into_assessment())
    }

    pub async fn get_assessment_impl(&self, id: i64) -> Result<Option<Assessment>> {
        let row = assessments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query assessment"))?;
        Ok(row.map(|m| m.into_assessment()))
    }

    pub async fn list_assessments_impl(
        &self,
        page: i64,
        size: i64,
        term_id: Option<i64>,
        subject_id: Option<i64>,
        classroom_id: Option<i64>,
    ) -> Result<PaginatedResponse<Assessment>> {
        let mut select = assessments::Entity::find();
        if let Some(term_id) = term_id {
            select = select.filter(assessments::Column::TermId.eq(term_id));
        }
        if let Some(subject_id) = subject_id {
            select = select.filter(assessments::Column::SubjectId.eq(subject_id));
        }
        if let Some(classroom_id) = classroom_id {
            select = select.filter(assessments::Column::ClassroomId.eq(classroom_id));
        }
        select = select
            .order_by_desc(assessments::Column::CreatedAt)
            .order_by_desc(assessments::Column::Id);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list assessments")
            .await?;
        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_assessment()).collect(),
            pagination,
        })
    }

    pub async fn update_assessment_impl(
        &self,
        id: i64,
        req: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        if self.get_assessment_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = assessments::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(kind) = req.kind {
            model.kind = Set(kind.to_string());
        }
        if let Some(classroom_id) = req.classroom_id {
            model.classroom_id = Set(Some(classroom_id));
        }
        if let Some(max_score) = req.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(weight) = req.weight {
            model.weight = Set(weight);
        }
        if let Some(held_on) = req.held_on {
            model.held_on = Set(Some(held_on));
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }

        let row = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update assessment"))?;
        Ok(Some(row.into_assessment()))
    }

    pub async fn delete_assessment_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        grades::Entity::delete_many()
            .filter(grades::Column::AssessmentId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_error("Failed to delete grades"))?;
        let result = assessments::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_error("Failed to delete assessment"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn max_recorded_score_impl(&self, assessment_id: i64) -> Result<Option<f64>> {
        let max = grades::Entity::find()
            .select_only()
            .column_as(grades::Column::Score.max(), "max_score")
            .filter(grades::Column::AssessmentId.eq(assessment_id))
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query grades"))?;
        Ok(max.flatten())
    }
}
