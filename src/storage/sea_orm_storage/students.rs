use std::collections::HashMap;

use super::{SeaOrmStorage, db_error, now_ts, today};
use crate::entity::{student_profiles, users};
use crate::errors::{Result, SchoolError};
use crate::models::PaginatedResponse;
use crate::models::students::{
    entities::{AcademicStatus, Student},
    requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

impl SeaOrmStorage {
    /// Ids of users whose first or last name matches `search`.
    pub(crate) async fn user_ids_matching_name(&self, search: &str) -> Result<Vec<i64>> {
        let ids = users::Entity::find()
            .select_only()
            .column(users::Column::Id)
            .filter(
                Condition::any()
                    .add(users::Column::FirstName.like(contains_pattern(search)))
                    .add(users::Column::LastName.like(contains_pattern(search))),
            )
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to search users"))?;
        Ok(ids)
    }

    async fn join_students(&self, rows: Vec<student_profiles::Model>) -> Result<Vec<Student>> {
        let users: HashMap<i64, users::Model> =
            self.load_user_rows(rows.iter().map(|r| r.user_id)).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let user = users.get(&row.user_id)?;
                Some(row.into_student(user))
            })
            .collect())
    }

    async fn join_student(&self, row: student_profiles::Model) -> Result<Option<Student>> {
        Ok(self.join_students(vec![row]).await?.pop())
    }

    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = now_ts();
        let model = student_profiles::ActiveModel {
            user_id: Set(req.user_id),
            admission_number: Set(req.admission_number),
            grade_level_id: Set(req.grade_level_id),
            classroom_id: Set(req.classroom_id),
            gender: Set(req.gender.map(|g| g.to_string())),
            date_of_birth: Set(req.date_of_birth),
            enrollment_date: Set(req.enrollment_date.unwrap_or_else(today)),
            academic_status: Set(AcademicStatus::Active.to_string()),
            is_boarder: Set(req.is_boarder),
            medical_notes: Set(req.medical_notes),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let row = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create student"))?;
        self.join_student(row)
            .await?
            .ok_or_else(|| SchoolError::not_found("Student user not found"))
    }

    pub async fn get_student_impl(&self, id: i64) -> Result<Option<Student>> {
        let row = student_profiles::Entity::find_by_id(id)
            .filter(student_profiles::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query student"))?;
        match row {
            Some(row) => self.join_student(row).await,
            None => Ok(None),
        }
    }

    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let row = student_profiles::Entity::find()
            .filter(student_profiles::Column::UserId.eq(user_id))
            .filter(student_profiles::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query student"))?;
        match row {
            Some(row) => self.join_student(row).await,
            None => Ok(None),
        }
    }

    pub async fn list_students_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        let mut select =
            student_profiles::Entity::find().filter(student_profiles::Column::DeletedAt.is_null());

        if let Some(grade_level_id) = query.grade_level_id {
            select = select.filter(student_profiles::Column::GradeLevelId.eq(grade_level_id));
        }
        if let Some(classroom_id) = query.classroom_id {
            select = select.filter(student_profiles::Column::ClassroomId.eq(classroom_id));
        }
        if let Some(status) = query.academic_status {
            select = select.filter(student_profiles::Column::AcademicStatus.eq(status.as_str()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let search = search.trim();
            let user_ids = self.user_ids_matching_name(search).await?;
            select = select.filter(
                Condition::any()
                    .add(student_profiles::Column::AdmissionNumber.like(contains_pattern(search)))
                    .add(student_profiles::Column::UserId.is_in(user_ids)),
            );
        }
        select = select.order_by_asc(student_profiles::Column::AdmissionNumber);

        let (rows, pagination) = self
            .fetch_page(select, query.page, query.size, "Failed to list students")
            .await?;
        Ok(PaginatedResponse {
            items: self.join_students(rows).await?,
            pagination,
        })
    }

    pub async fn update_student_impl(
        &self,
        id: i64,
        req: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = student_profiles::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(grade_level_id) = req.grade_level_id {
            model.grade_level_id = Set(grade_level_id);
        }
        if let Some(classroom_id) = req.classroom_id {
            model.classroom_id = Set(Some(classroom_id));
        }
        if let Some(gender) = req.gender {
            model.gender = Set(Some(gender.to_string()));
        }
        if let Some(date_of_birth) = req.date_of_birth {
            model.date_of_birth = Set(Some(date_of_birth));
        }
        if let Some(status) = req.academic_status {
            model.academic_status = Set(status.to_string());
        }
        if let Some(is_boarder) = req.is_boarder {
            model.is_boarder = Set(is_boarder);
        }
        if let Some(medical_notes) = req.medical_notes {
            model.medical_notes = Set(Some(medical_notes));
        }

        let row = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update student"))?;
        self.join_student(row).await
    }

    pub async fn soft_delete_student_impl(&self, id: i64) -> Result<bool> {
        if self.get_student_impl(id).await?.is_none() {
            return Ok(false);
        }
        let now = now_ts();
        let model = student_profiles::ActiveModel {
            id: Set(id),
            academic_status: Set(AcademicStatus::Withdrawn.to_string()),
            deleted_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };
        model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to delete student"))?;
        Ok(true)
    }

    pub async fn existing_student_ids_impl(&self, ids: &[i64]) -> Result<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found = student_profiles::Entity::find()
            .select_only()
            .column(student_profiles::Column::Id)
            .filter(student_profiles::Column::Id.is_in(ids.to_vec()))
            .filter(student_profiles::Column::DeletedAt.is_null())
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to query students"))?;
        Ok(found)
    }
}
