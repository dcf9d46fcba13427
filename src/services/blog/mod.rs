pub mod news;
pub mod public;
pub mod slug;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::blog::entities::PostStatus;
use crate::models::blog::requests::{
    CreatePostRequest, PostFilter, PostListParams, UpdatePostRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, current_user, error_response, found, not_found, respond_on_err, stored,
};

crate::services::lazy_service!(BlogService);

fn check_post(title: Option<&str>, content: Option<&str>) -> Result<(), String> {
    if title.is_some_and(|t| t.trim().is_empty()) {
        return Err("Post title is required".to_string());
    }
    if content.is_some_and(|c| c.trim().is_empty()) {
        return Err("Post content is required".to_string());
    }
    Ok(())
}

impl BlogService {
    pub async fn list_posts(
        &self,
        query: PostListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let filter = PostFilter {
            status: query.status,
            category: query.category,
            search: query.search.filter(|s| !s.trim().is_empty()),
        };
        let posts = respond_on_err!(stored(
            storage
                .list_posts(query.pagination.page(), query.pagination.size(), filter)
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(posts, "Posts retrieved")))
    }

    /// New posts start as drafts with a slug derived from the title.
    pub async fn create_post(
        &self,
        mut req: CreatePostRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        if let Err(msg) = check_post(Some(&req.title), Some(&req.content)) {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }
        req.title = req.title.trim().to_string();

        let storage = self.get_storage(request);
        match slug::create_with_free_slug(storage.as_ref(), req, user.id).await {
            Ok(post) => {
                info!("Post '{}' created by {}", post.slug, user.username);
                Ok(HttpResponse::Created().json(ApiResponse::success(post, "Post created")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn get_post(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let post = respond_on_err!(found(
            storage.get_post(id).await,
            ErrorCode::PostNotFound,
            "Post not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(post, "Post retrieved")))
    }

    /// The slug stays as first assigned, even when the title changes.
    pub async fn update_post(
        &self,
        id: i64,
        req: UpdatePostRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = check_post(req.title.as_deref(), req.content.as_deref()) {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }

        let storage = self.get_storage(request);
        let post = respond_on_err!(found(
            storage.update_post(id, req).await,
            ErrorCode::PostNotFound,
            "Post not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(post, "Post updated")))
    }

    pub async fn publish_post(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        self.change_status(id, PostStatus::Published, request).await
    }

    pub async fn archive_post(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        self.change_status(id, PostStatus::Archived, request).await
    }

    async fn change_status(
        &self,
        id: i64,
        status: PostStatus,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let post = respond_on_err!(found(
            storage.set_post_status(id, status).await,
            ErrorCode::PostNotFound,
            "Post not found",
        ));
        info!("Post '{}' is now {}", post.slug, post.status);
        Ok(HttpResponse::Ok().json(ApiResponse::success(post, format!("Post {status}"))))
    }

    pub async fn delete_post(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.delete_post(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Post deleted"))),
            Ok(false) => Ok(not_found(ErrorCode::PostNotFound, "Post not found")),
            Err(e) => Ok(error_response(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_rejected() {
        assert!(check_post(Some("Open day"), Some("Welcome")).is_ok());
        assert!(check_post(None, None).is_ok());
        assert!(check_post(Some(" "), None).is_err());
        assert!(check_post(None, Some("")).is_err());
    }
}
