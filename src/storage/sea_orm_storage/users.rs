use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::Result;
use crate::models::{
    users::{
        entities::{User, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = now_ts();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            phone: Set(req.phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create user"))?;

        Ok(result.into_user())
    }

    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_users_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<User>> {
        let rows = self.load_user_rows(ids.iter().copied()).await?;
        let mut users: Vec<User> = rows.into_values().map(|m| m.into_user()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let mut select = Users::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::Username.like(contains_pattern(search)))
                    .add(Column::Email.like(contains_pattern(search)))
                    .add(Column::FirstName.like(contains_pattern(search)))
                    .add(Column::LastName.like(contains_pattern(search))),
            );
        }

        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (rows, pagination) = self
            .fetch_page(select, query.page, query.size, "Failed to list users")
            .await?;

        Ok(UserListResponse {
            items: rows.into_iter().map(|m| m.into_user()).collect(),
            pagination,
        })
    }

    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to update last login"))?;

        Ok(result.rows_affected > 0)
    }

    /// `update.password` must already be hashed.
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }

        model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update user"))?;

        self.get_user_by_id_impl(id).await
    }

    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete user"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count users"))
    }
}
