use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::blog_posts::{ActiveModel, Column, Entity as BlogPosts};
use crate::errors::Result;
use crate::models::PaginatedResponse;
use crate::models::blog::{
    entities::{BlogPost, PostStatus},
    requests::{CreatePostRequest, PostFilter, UpdatePostRequest},
};
use crate::utils::{contains_pattern, prefix_pattern};
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_post_impl(
        &self,
        req: CreatePostRequest,
        slug: String,
        author_id: i64,
    ) -> Result<BlogPost> {
        let now = now_ts();
        let model = ActiveModel {
            title: Set(req.title),
            slug: Set(slug),
            content: Set(req.content),
            excerpt: Set(req.excerpt),
            category: Set(req.category.to_string()),
            status: Set(PostStatus::Draft.to_string()),
            author_id: Set(author_id),
            view_count: Set(0),
            published_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let row = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create post"))?;
        Ok(row.into_post())
    }

    pub async fn get_post_impl(&self, id: i64) -> Result<Option<BlogPost>> {
        let row = BlogPosts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query post"))?;
        Ok(row.map(|m| m.into_post()))
    }

    pub async fn get_post_by_slug_impl(&self, slug: &str) -> Result<Option<BlogPost>> {
        let row = BlogPosts::find()
            .filter(Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query post"))?;
        Ok(row.map(|m| m.into_post()))
    }

    pub async fn list_slugs_like_impl(&self, base: &str) -> Result<Vec<String>> {
        let slugs = BlogPosts::find()
            .select_only()
            .column(Column::Slug)
            .filter(
                Condition::any()
                    .add(Column::Slug.eq(base))
                    .add(Column::Slug.like(prefix_pattern(&format!("{base}-")))),
            )
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to query slugs"))?;
        Ok(slugs)
    }

    /// Newest first by publication time, falling back to creation time.
    pub async fn list_posts_impl(
        &self,
        page: i64,
        size: i64,
        filter: PostFilter,
    ) -> Result<PaginatedResponse<BlogPost>> {
        let mut select = BlogPosts::find();
        if let Some(status) = filter.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(category) = filter.category {
            select = select.filter(Column::Category.eq(category.as_str()));
        }
        if let Some(ref search) = filter.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::Title.like(contains_pattern(search)))
                    .add(Column::Content.like(contains_pattern(search))),
            );
        }
        select = select
            .order_by_desc(Expr::cust("COALESCE(published_at, created_at)"))
            .order_by_desc(Column::Id);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list posts")
            .await?;
        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_post()).collect(),
            pagination,
        })
    }

    pub async fn update_post_impl(
        &self,
        id: i64,
        req: UpdatePostRequest,
    ) -> Result<Option<BlogPost>> {
        if self.get_post_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(title) = req.title {
            model.title = Set(title);
        }
        if let Some(content) = req.content {
            model.content = Set(content);
        }
        if let Some(excerpt) = req.excerpt {
            model.excerpt = Set(Some(excerpt));
        }
        if let Some(category) = req.category {
            model.category = Set(category.to_string());
        }

        let row = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update post"))?;
        Ok(Some(row.into_post()))
    }

    pub async fn set_post_status_impl(
        &self,
        id: i64,
        status: PostStatus,
    ) -> Result<Option<BlogPost>> {
        let Some(existing) = BlogPosts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query post"))?
        else {
            return Ok(None);
        };

        let now = now_ts();
        let mut model = ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };
        if status == PostStatus::Published && existing.published_at.is_none() {
            model.published_at = Set(Some(now));
        }

        let row = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update post status"))?;
        Ok(Some(row.into_post()))
    }

    pub async fn delete_post_impl(&self, id: i64) -> Result<bool> {
        let result = BlogPosts::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete post"))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn increment_post_views_impl(&self, id: i64) -> Result<()> {
        BlogPosts::update_many()
            .col_expr(Column::ViewCount, Expr::col(Column::ViewCount).add(1))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to count post view"))?;
        Ok(())
    }
}
