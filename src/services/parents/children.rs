//! Parent to student links.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ParentService;
use crate::errors::SchoolError;
use crate::models::parents::requests::LinkStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    current_user, error_response, forbidden, found, not_found, reject, respond_on_err, stored,
};

impl ParentService {
    pub async fn link_student(
        &self,
        parent_id: i64,
        req: LinkStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond_on_err!(found(
            storage.get_parent(parent_id).await,
            ErrorCode::NotFound,
            "Parent not found",
        ));
        respond_on_err!(found(
            storage.get_student(req.student_id).await,
            ErrorCode::StudentNotFound,
            "Student not found",
        ));

        match storage.link_parent_student(parent_id, req.student_id).await {
            Ok(()) => {
                info!("Linked parent {} to student {}", parent_id, req.student_id);
                Ok(HttpResponse::Created().json(ApiResponse::success_empty("Student linked")))
            }
            Err(SchoolError::Conflict(_)) => Ok(reject(
                StatusCode::CONFLICT,
                ErrorCode::Conflict,
                "Student is already linked to this parent",
            )),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn unlink_student(
        &self,
        parent_id: i64,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.unlink_parent_student(parent_id, student_id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student unlinked"))),
            Ok(false) => Ok(not_found(
                ErrorCode::ParentLinkNotFound,
                "Student is not linked to this parent",
            )),
            Err(e) => Ok(error_response(&e)),
        }
    }

    /// Staff may list any parent's children; a parent only their own.
    pub async fn list_children(
        &self,
        parent_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);

        let parent = respond_on_err!(found(
            storage.get_parent(parent_id).await,
            ErrorCode::NotFound,
            "Parent not found",
        ));
        if !user.role.is_staff_member() && parent.user_id != user.id {
            return Ok(forbidden("You can only view your own children"));
        }

        let children = respond_on_err!(stored(storage.list_parent_students(parent.id).await));
        Ok(HttpResponse::Ok().json(ApiResponse::success(children, "Children retrieved")))
    }

    pub async fn my_children(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);

        let parent = respond_on_err!(found(
            storage.get_parent_by_user_id(user.id).await,
            ErrorCode::NotFound,
            "No parent profile for this account",
        ));
        let children = respond_on_err!(stored(storage.list_parent_students(parent.id).await));
        Ok(HttpResponse::Ok().json(ApiResponse::success(children, "Children retrieved")))
    }
}
