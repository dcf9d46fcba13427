use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: String,
    pub status: String,
    pub author_id: i64,
    pub view_count: i64,
    pub published_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_post(self) -> crate::models::blog::entities::BlogPost {
        use crate::models::blog::entities::{BlogPost, PostCategory, PostStatus};

        BlogPost {
            id: self.id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            excerpt: self.excerpt,
            category: self
                .category
                .parse::<PostCategory>()
                .unwrap_or(PostCategory::News),
            status: self.status.parse::<PostStatus>().unwrap_or(PostStatus::Draft),
            author_id: self.author_id,
            view_count: self.view_count,
            published_at: self.published_at.map(super::to_datetime),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
