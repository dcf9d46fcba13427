use serde::Deserialize;
use ts_rs::TS;

use super::entities::{PostCategory, PostStatus};
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "blog.ts")]
pub struct PostListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<PostStatus>,
    pub category: Option<PostCategory>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "blog.ts")]
pub struct PublicPostListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub category: Option<PostCategory>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "blog.ts")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    #[serde(default = "default_category")]
    pub category: PostCategory,
}

fn default_category() -> PostCategory {
    PostCategory::News
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "blog.ts")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<PostCategory>,
}

/// Storage-level post filter.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub category: Option<PostCategory>,
    pub search: Option<String>,
}
