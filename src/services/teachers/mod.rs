use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, error_response, found, not_found, profile_user, respond_on_err, stored,
};
use crate::utils::validate::validate_required;

crate::services::lazy_service!(TeacherService);

impl TeacherService {
    pub async fn list_teachers(
        &self,
        query: TeacherListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let page = respond_on_err!(stored(
            storage
                .list_teachers(
                    query.pagination.page(),
                    query.pagination.size(),
                    query.is_active,
                    query.search,
                )
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Teachers retrieved")))
    }

    pub async fn create_teacher(
        &self,
        mut req: CreateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = validate_required("employee_number", &req.employee_number) {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }
        req.employee_number = req.employee_number.trim().to_string();

        let storage = self.get_storage(request);
        respond_on_err!(profile_user(storage.as_ref(), req.user_id, UserRole::Teacher).await);

        match storage.create_teacher(req).await {
            Ok(teacher) => {
                info!("Created teacher profile {}", teacher.employee_number);
                Ok(HttpResponse::Created().json(ApiResponse::success(teacher, "Teacher created")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn get_teacher(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let teacher = respond_on_err!(found(
            storage.get_teacher(id).await,
            ErrorCode::NotFound,
            "Teacher not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(teacher, "Teacher retrieved")))
    }

    pub async fn update_teacher(
        &self,
        id: i64,
        req: UpdateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let teacher = respond_on_err!(found(
            storage.update_teacher(id, req).await,
            ErrorCode::NotFound,
            "Teacher not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(teacher, "Teacher updated")))
    }

    pub async fn delete_teacher(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.soft_delete_teacher(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deleted"))),
            Ok(false) => Ok(not_found(ErrorCode::NotFound, "Teacher not found")),
            Err(e) => Ok(error_response(&e)),
        }
    }
}
