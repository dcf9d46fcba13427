//! Unauthenticated read access to published posts.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BlogService;
use crate::models::blog::entities::{BlogPost, PostStatus};
use crate::models::blog::requests::{PostFilter, PublicPostListParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{found, not_found, respond_on_err, stored};
use crate::storage::Storage;

/// A published post by slug; drafts and archived posts read as missing.
pub(crate) async fn published_post(
    storage: &dyn Storage,
    slug: &str,
) -> Result<BlogPost, HttpResponse> {
    let post = found(
        storage.get_post_by_slug(slug).await,
        ErrorCode::PostNotFound,
        "Post not found",
    )?;
    if post.status != PostStatus::Published {
        return Err(not_found(ErrorCode::PostNotFound, "Post not found"));
    }
    Ok(post)
}

/// Counts the view and returns the post as the reader sees it.
pub(crate) async fn read_post(storage: &dyn Storage, slug: &str) -> Result<BlogPost, HttpResponse> {
    let mut post = published_post(storage, slug).await?;
    stored(storage.increment_post_views(post.id).await)?;
    post.view_count += 1;
    Ok(post)
}

pub(crate) fn published_filter(query: &PublicPostListParams) -> PostFilter {
    PostFilter {
        status: Some(PostStatus::Published),
        category: query.category,
        search: None,
    }
}

impl BlogService {
    pub async fn list_public_posts(
        &self,
        query: PublicPostListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let posts = respond_on_err!(stored(
            storage
                .list_posts(
                    query.pagination.page(),
                    query.pagination.size(),
                    published_filter(&query),
                )
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(posts, "Posts retrieved")))
    }

    pub async fn get_public_post(
        &self,
        slug: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let post = respond_on_err!(read_post(storage.as_ref(), slug).await);
        Ok(HttpResponse::Ok().json(ApiResponse::success(post, "Post retrieved")))
    }
}
