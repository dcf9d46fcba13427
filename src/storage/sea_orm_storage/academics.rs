use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::{classrooms, grade_levels, subjects, terms};
use crate::errors::Result;
use crate::models::PaginatedResponse;
use crate::models::academics::{
    entities::{Classroom, GradeLevel, Subject, Term},
    requests::{
        CreateClassroomRequest, CreateGradeLevelRequest, CreateSubjectRequest, CreateTermRequest,
        UpdateClassroomRequest, UpdateGradeLevelRequest, UpdateSubjectRequest, UpdateTermRequest,
    },
};
use crate::utils::contains_pattern;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    // Grade levels

    pub async fn create_grade_level_impl(&self, req: CreateGradeLevelRequest) -> Result<GradeLevel> {
        let now = now_ts();
        let model = grade_levels::ActiveModel {
            name: Set(req.name),
            level: Set(req.level),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create grade level"))?;
        Ok(result.into_grade_level())
    }

    pub async fn get_grade_level_impl(&self, id: i64) -> Result<Option<GradeLevel>> {
        let result = grade_levels::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query grade level"))?;
        Ok(result.map(|m| m.into_grade_level()))
    }

    pub async fn list_grade_levels_impl(
        &self,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse<GradeLevel>> {
        let select = grade_levels::Entity::find()
            .order_by_asc(grade_levels::Column::Level)
            .order_by_asc(grade_levels::Column::Id);
        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list grade levels")
            .await?;

        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_grade_level()).collect(),
            pagination,
        })
    }

    pub async fn update_grade_level_impl(
        &self,
        id: i64,
        req: UpdateGradeLevelRequest,
    ) -> Result<Option<GradeLevel>> {
        if self.get_grade_level_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = grade_levels::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(level) = req.level {
            model.level = Set(level);
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update grade level"))?;
        Ok(Some(result.into_grade_level()))
    }

    pub async fn delete_grade_level_impl(&self, id: i64) -> Result<bool> {
        let result = grade_levels::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete grade level"))?;
        Ok(result.rows_affected > 0)
    }

    // Classrooms

    pub async fn create_classroom_impl(&self, req: CreateClassroomRequest) -> Result<Classroom> {
        let now = now_ts();
        let model = classrooms::ActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            grade_level_id: Set(req.grade_level_id),
            class_teacher_id: Set(req.class_teacher_id),
            capacity: Set(req.capacity),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create classroom"))?;
        Ok(result.into_classroom())
    }

    pub async fn get_classroom_impl(&self, id: i64) -> Result<Option<Classroom>> {
        let result = classrooms::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query classroom"))?;
        Ok(result.map(|m| m.into_classroom()))
    }

    pub async fn list_classrooms_impl(
        &self,
        page: i64,
        size: i64,
        grade_level_id: Option<i64>,
    ) -> Result<PaginatedResponse<Classroom>> {
        let mut select = classrooms::Entity::find();
        if let Some(grade_level_id) = grade_level_id {
            select = select.filter(classrooms::Column::GradeLevelId.eq(grade_level_id));
        }
        select = select.order_by_asc(classrooms::Column::Code);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list classrooms")
            .await?;
        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_classroom()).collect(),
            pagination,
        })
    }

    pub async fn update_classroom_impl(
        &self,
        id: i64,
        req: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>> {
        if self.get_classroom_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = classrooms::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(grade_level_id) = req.grade_level_id {
            model.grade_level_id = Set(Some(grade_level_id));
        }
        if let Some(class_teacher_id) = req.class_teacher_id {
            model.class_teacher_id = Set(Some(class_teacher_id));
        }
        if let Some(capacity) = req.capacity {
            model.capacity = Set(capacity);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update classroom"))?;
        Ok(Some(result.into_classroom()))
    }

    pub async fn delete_classroom_impl(&self, id: i64) -> Result<bool> {
        let result = classrooms::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete classroom"))?;
        Ok(result.rows_affected > 0)
    }

    // Terms

    pub async fn create_term_impl(&self, req: CreateTermRequest) -> Result<Term> {
        let now = now_ts();
        let model = terms::ActiveModel {
            name: Set(req.name),
            academic_year: Set(req.academic_year),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            is_current: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create term"))?;
        Ok(result.into_term())
    }

    pub async fn get_term_impl(&self, id: i64) -> Result<Option<Term>> {
        let result = terms::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query term"))?;
        Ok(result.map(|m| m.into_term()))
    }

    pub async fn list_terms_impl(
        &self,
        page: i64,
        size: i64,
        academic_year: Option<String>,
    ) -> Result<PaginatedResponse<Term>> {
        let mut select = terms::Entity::find();
        if let Some(year) = academic_year
            && !year.trim().is_empty()
        {
            select = select.filter(terms::Column::AcademicYear.eq(year.trim()));
        }
        select = select.order_by_desc(terms::Column::StartDate);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list terms")
            .await?;
        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_term()).collect(),
            pagination,
        })
    }

    pub async fn update_term_impl(&self, id: i64, req: UpdateTermRequest) -> Result<Option<Term>> {
        if self.get_term_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = terms::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(academic_year) = req.academic_year {
            model.academic_year = Set(academic_year);
        }
        if let Some(start_date) = req.start_date {
            model.start_date = Set(start_date);
        }
        if let Some(end_date) = req.end_date {
            model.end_date = Set(end_date);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update term"))?;
        Ok(Some(result.into_term()))
    }

    pub async fn delete_term_impl(&self, id: i64) -> Result<bool> {
        let result = terms::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete term"))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn set_current_term_impl(&self, id: i64) -> Result<Option<Term>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let exists = terms::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_error("Failed to query term"))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let now = now_ts();
        terms::Entity::update_many()
            .col_expr(terms::Column::IsCurrent, Expr::value(false))
            .col_expr(terms::Column::UpdatedAt, Expr::value(now))
            .filter(terms::Column::IsCurrent.eq(true))
            .exec(&txn)
            .await
            .map_err(db_error("Failed to clear current term"))?;
        terms::Entity::update_many()
            .col_expr(terms::Column::IsCurrent, Expr::value(true))
            .col_expr(terms::Column::UpdatedAt, Expr::value(now))
            .filter(terms::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(db_error("Failed to set current term"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        self.get_term_impl(id).await
    }

    pub async fn get_current_term_impl(&self) -> Result<Option<Term>> {
        let result = terms::Entity::find()
            .filter(terms::Column::IsCurrent.eq(true))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query current term"))?;
        Ok(result.map(|m| m.into_term()))
    }

    // Subjects

    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = now_ts();
        let model = subjects::ActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            description: Set(req.description),
            credit_hours: Set(req.credit_hours),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create subject"))?;
        Ok(result.into_subject())
    }

    pub async fn get_subject_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = subjects::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query subject"))?;
        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_impl(
        &self,
        page: i64,
        size: i64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<Subject>> {
        let mut select = subjects::Entity::find();
        if let Some(ref search) = search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(subjects::Column::Code.like(contains_pattern(search)))
                    .add(subjects::Column::Name.like(contains_pattern(search))),
            );
        }
        select = select.order_by_asc(subjects::Column::Code);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list subjects")
            .await?;
        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_subject()).collect(),
            pagination,
        })
    }

    pub async fn update_subject_impl(
        &self,
        id: i64,
        req: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = subjects::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }
        if let Some(credit_hours) = req.credit_hours {
            model.credit_hours = Set(credit_hours);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update subject"))?;
        Ok(Some(result.into_subject()))
    }

    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = subjects::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete subject"))?;
        Ok(result.rows_affected > 0)
    }
}
