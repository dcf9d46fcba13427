use std::collections::HashMap;

use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::{teacher_profiles, users};
use crate::errors::{Result, SchoolError};
use crate::models::PaginatedResponse;
use crate::models::teachers::{
    entities::Teacher,
    requests::{CreateTeacherRequest, UpdateTeacherRequest},
};
use crate::utils::contains_pattern;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    async fn join_teachers(&self, rows: Vec<teacher_profiles::Model>) -> Result<Vec<Teacher>> {
        let users: HashMap<i64, users::Model> =
            self.load_user_rows(rows.iter().map(|r| r.user_id)).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let user = users.get(&row.user_id)?;
                Some(row.into_teacher(user))
            })
            .collect())
    }

    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let now = now_ts();
        let model = teacher_profiles::ActiveModel {
            user_id: Set(req.user_id),
            employee_number: Set(req.employee_number),
            qualification: Set(req.qualification),
            specialization: Set(req.specialization),
            hire_date: Set(req.hire_date),
            is_active: Set(true),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let row = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create teacher"))?;
        self.join_teachers(vec![row])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::not_found("Teacher user not found"))
    }

    pub async fn get_teacher_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let row = teacher_profiles::Entity::find_by_id(id)
            .filter(teacher_profiles::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query teacher"))?;
        match row {
            Some(row) => Ok(self.join_teachers(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list_teachers_impl(
        &self,
        page: i64,
        size: i64,
        is_active: Option<bool>,
        search: Option<String>,
    ) -> Result<PaginatedResponse<Teacher>> {
        let mut select =
            teacher_profiles::Entity::find().filter(teacher_profiles::Column::DeletedAt.is_null());

        if let Some(is_active) = is_active {
            select = select.filter(teacher_profiles::Column::IsActive.eq(is_active));
        }
        if let Some(ref search) = search
            && !search.trim().is_empty()
        {
            let search = search.trim();
            let user_ids = self.user_ids_matching_name(search).await?;
            select = select.filter(
                Condition::any()
                    .add(teacher_profiles::Column::EmployeeNumber.like(contains_pattern(search)))
                    .add(teacher_profiles::Column::UserId.is_in(user_ids)),
            );
        }
        select = select.order_by_asc(teacher_profiles::Column::EmployeeNumber);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list teachers")
            .await?;
        Ok(PaginatedResponse {
            items: self.join_teachers(rows).await?,
            pagination,
        })
    }

    pub async fn update_teacher_impl(
        &self,
        id: i64,
        req: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        if self.get_teacher_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = teacher_profiles::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(qualification) = req.qualification {
            model.qualification = Set(Some(qualification));
        }
        if let Some(specialization) = req.specialization {
            model.specialization = Set(Some(specialization));
        }
        if let Some(hire_date) = req.hire_date {
            model.hire_date = Set(Some(hire_date));
        }
        if let Some(is_active) = req.is_active {
            model.is_active = Set(is_active);
        }

        let row = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update teacher"))?;
        Ok(self.join_teachers(vec![row]).await?.pop())
    }

    pub async fn soft_delete_teacher_impl(&self, id: i64) -> Result<bool> {
        if self.get_teacher_impl(id).await?.is_none() {
            return Ok(false);
        }
        let now = now_ts();
        let model = teacher_profiles::ActiveModel {
            id: Set(id),
            is_active: Set(false),
            deleted_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };
        model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to delete teacher"))?;
        Ok(true)
    }
}
