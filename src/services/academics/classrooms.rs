use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AcademicsService;
use crate::models::academics::requests::{
    ClassroomListParams, CreateClassroomRequest, UpdateClassroomRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, found, not_found, respond_on_err, stored};
use crate::storage::Storage;
use crate::utils::validate::validate_required;

/// Grade level and class teacher references must point at real rows.
async fn check_references(
    storage: &dyn Storage,
    grade_level_id: Option<i64>,
    class_teacher_id: Option<i64>,
) -> Result<(), HttpResponse> {
    if let Some(id) = grade_level_id {
        found(
            storage.get_grade_level(id).await,
            ErrorCode::NotFound,
            "Grade level not found",
        )?;
    }
    if let Some(id) = class_teacher_id {
        let user = found(
            storage.get_user_by_id(id).await,
            ErrorCode::UserNotFound,
            "Class teacher not found",
        )?;
        if user.role != UserRole::Teacher {
            return Err(bad_request(
                ErrorCode::ProfileRoleMismatch,
                "Class teacher must have the teacher role",
            ));
        }
    }
    Ok(())
}

impl AcademicsService {
    pub async fn list_classrooms(
        &self,
        query: ClassroomListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let page = respond_on_err!(stored(
            storage
                .list_classrooms(
                    query.pagination.page(),
                    query.pagination.size(),
                    query.grade_level_id,
                )
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Classrooms retrieved")))
    }

    pub async fn create_classroom(
        &self,
        req: CreateClassroomRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        for (field, value) in [("code", &req.code), ("name", &req.name)] {
            if let Err(msg) = validate_required(field, value) {
                return Ok(bad_request(ErrorCode::BadRequest, msg));
            }
        }
        if req.capacity < 1 {
            return Ok(bad_request(ErrorCode::BadRequest, "Capacity must be at least 1"));
        }

        let storage = self.get_storage(request);
        respond_on_err!(
            check_references(storage.as_ref(), req.grade_level_id, req.class_teacher_id).await
        );

        match storage.create_classroom(req).await {
            Ok(classroom) => {
                info!("Created classroom {}", classroom.code);
                Ok(HttpResponse::Created()
                    .json(ApiResponse::success(classroom, "Classroom created")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn get_classroom(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let classroom = respond_on_err!(found(
            storage.get_classroom(id).await,
            ErrorCode::NotFound,
            "Classroom not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(classroom, "Classroom retrieved")))
    }

    pub async fn update_classroom(
        &self,
        id: i64,
        req: UpdateClassroomRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if req.capacity.is_some_and(|c| c < 1) {
            return Ok(bad_request(ErrorCode::BadRequest, "Capacity must be at least 1"));
        }

        let storage = self.get_storage(request);
        respond_on_err!(
            check_references(storage.as_ref(), req.grade_level_id, req.class_teacher_id).await
        );

        let classroom = respond_on_err!(found(
            storage.update_classroom(id, req).await,
            ErrorCode::NotFound,
            "Classroom not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(classroom, "Classroom updated")))
    }

    pub async fn delete_classroom(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.delete_classroom(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Classroom deleted"))),
            Ok(false) => Ok(not_found(ErrorCode::NotFound, "Classroom not found")),
            Err(e) => Ok(error_response(&e)),
        }
    }
}
