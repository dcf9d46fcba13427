use std::collections::HashMap;

use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::{parent_students, parents, student_profiles, users};
use crate::errors::{Result, SchoolError};
use crate::models::PaginatedResponse;
use crate::models::parents::{
    entities::Parent,
    requests::{CreateParentRequest, UpdateParentRequest},
};
use crate::models::students::entities::Student;
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    async fn join_parents(&self, rows: Vec<parents::Model>) -> Result<Vec<Parent>> {
        let users: HashMap<i64, users::Model> =
            self.load_user_rows(rows.iter().map(|r| r.user_id)).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let user = users.get(&row.user_id)?;
                Some(row.into_parent(user))
            })
            .collect())
    }

    pub async fn create_parent_impl(&self, req: CreateParentRequest) -> Result<Parent> {
        let now = now_ts();
        let model = parents::ActiveModel {
            user_id: Set(req.user_id),
            relationship: Set(req.relationship.to_string()),
            phone: Set(req.phone),
            address: Set(req.address),
            occupation: Set(req.occupation),
            is_primary_contact: Set(req.is_primary_contact),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let row = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create parent"))?;
        self.join_parents(vec![row])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::not_found("Parent user not found"))
    }

    pub async fn get_parent_impl(&self, id: i64) -> Result<Option<Parent>> {
        let row = parents::Entity::find_by_id(id)
            .filter(parents::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query parent"))?;
        match row {
            Some(row) => Ok(self.join_parents(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn get_parent_by_user_id_impl(&self, user_id: i64) -> Result<Option<Parent>> {
        let row = parents::Entity::find()
            .filter(parents::Column::UserId.eq(user_id))
            .filter(parents::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query parent"))?;
        match row {
            Some(row) => Ok(self.join_parents(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list_parents_impl(
        &self,
        page: i64,
        size: i64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<Parent>> {
        let mut select = parents::Entity::find().filter(parents::Column::DeletedAt.is_null());

        if let Some(ref search) = search
            && !search.trim().is_empty()
        {
            let search = search.trim();
            let user_ids = self.user_ids_matching_name(search).await?;
            select = select.filter(
                Condition::any()
                    .add(parents::Column::Phone.like(contains_pattern(search)))
                    .add(parents::Column::UserId.is_in(user_ids)),
            );
        }
        select = select.order_by_asc(parents::Column::Id);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list parents")
            .await?;
        Ok(PaginatedResponse {
            items: self.join_parents(rows).await?,
            pagination,
        })
    }

    pub async fn update_parent_impl(
        &self,
        id: i64,
        req: UpdateParentRequest,
    ) -> Result<Option<Parent>> {
        if self.get_parent_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = parents::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(relationship) = req.relationship {
            model.relationship = Set(relationship.to_string());
        }
        if let Some(phone) = req.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(address) = req.address {
            model.address = Set(Some(address));
        }
        if let Some(occupation) = req.occupation {
            model.occupation = Set(Some(occupation));
        }
        if let Some(is_primary_contact) = req.is_primary_contact {
            model.is_primary_contact = Set(is_primary_contact);
        }

        let row = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update parent"))?;
        Ok(self.join_parents(vec![row]).await?.pop())
    }

    pub async fn soft_delete_parent_impl(&self, id: i64) -> Result<bool> {
        if self.get_parent_impl(id).await?.is_none() {
            return Ok(false);
        }
        let now = now_ts();
        let model = parents::ActiveModel {
            id: Set(id),
            deleted_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };
        model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to delete parent"))?;
        Ok(true)
    }

    pub async fn link_parent_student_impl(&self, parent_id: i64, student_id: i64) -> Result<()> {
        let model = parent_students::ActiveModel {
            parent_id: Set(parent_id),
            student_id: Set(student_id),
            created_at: Set(now_ts()),
            ..Default::default()
        };
        model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to link student"))?;
        Ok(())
    }

    pub async fn unlink_parent_student_impl(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        let result = parent_students::Entity::delete_many()
            .filter(parent_students::Column::ParentId.eq(parent_id))
            .filter(parent_students::Column::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to unlink student"))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_parent_students_impl(&self, parent_id: i64) -> Result<Vec<Student>> {
        let student_ids: Vec<i64> = parent_students::Entity::find()
            .select_only()
            .column(parent_students::Column::StudentId)
            .filter(parent_students::Column::ParentId.eq(parent_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list linked students"))?;
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = student_profiles::Entity::find()
            .filter(student_profiles::Column::Id.is_in(student_ids))
            .filter(student_profiles::Column::DeletedAt.is_null())
            .order_by_asc(student_profiles::Column::AdmissionNumber)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list linked students"))?;
        let users = self.load_user_rows(rows.iter().map(|r| r.user_id)).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let user = users.get(&row.user_id)?;
                Some(row.into_student(user))
            })
            .collect())
    }

    pub async fn is_parent_of_impl(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        let count = parent_students::Entity::find()
            .filter(parent_students::Column::ParentId.eq(parent_id))
            .filter(parent_students::Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to query parent link"))?;
        Ok(count > 0)
    }
}
