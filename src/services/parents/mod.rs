pub mod children;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::parents::requests::{
    CreateParentRequest, ParentListParams, UpdateParentRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, found, not_found, profile_user, respond_on_err, stored};

crate::services::lazy_service!(ParentService);

impl ParentService {
    pub async fn list_parents(
        &self,
        query: ParentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let page = respond_on_err!(stored(
            storage
                .list_parents(query.pagination.page(), query.pagination.size(), query.search)
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Parents retrieved")))
    }

    pub async fn create_parent(
        &self,
        req: CreateParentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let user = respond_on_err!(profile_user(storage.as_ref(), req.user_id, UserRole::Parent).await);

        match storage.create_parent(req).await {
            Ok(parent) => {
                info!("Created parent profile for {}", user.username);
                Ok(HttpResponse::Created().json(ApiResponse::success(parent, "Parent created")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn get_parent(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let parent = respond_on_err!(found(
            storage.get_parent(id).await,
            ErrorCode::NotFound,
            "Parent not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(parent, "Parent retrieved")))
    }

    pub async fn update_parent(
        &self,
        id: i64,
        req: UpdateParentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let parent = respond_on_err!(found(
            storage.update_parent(id, req).await,
            ErrorCode::NotFound,
            "Parent not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(parent, "Parent updated")))
    }

    pub async fn delete_parent(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.soft_delete_parent(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Parent deleted"))),
            Ok(false) => Ok(not_found(ErrorCode::NotFound, "Parent not found")),
            Err(e) => Ok(error_response(&e)),
        }
    }
}
