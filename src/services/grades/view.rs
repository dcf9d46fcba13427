//! Grade reads. Staff see everything; students and parents only grades
//! of students they may access.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::grades::requests::GradeListParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    accessible_student, bad_request, current_user, found, respond_on_err, stored,
};

impl GradeService {
    pub async fn list_grades(
        &self,
        query: GradeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);

        if !user.role.is_staff_member() {
            let Some(student_id) = query.student_id else {
                return Ok(bad_request(
                    ErrorCode::BadRequest,
                    "student_id is required",
                ));
            };
            respond_on_err!(accessible_student(storage.as_ref(), &user, student_id).await);
        }

        let page = respond_on_err!(stored(
            storage
                .list_grades(
                    query.pagination.page(),
                    query.pagination.size(),
                    query.student_id,
                    query.assessment_id,
                    query.term_id,
                )
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Grades retrieved")))
    }

    pub async fn get_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);

        let grade = respond_on_err!(found(
            storage.get_grade(id).await,
            ErrorCode::NotFound,
            "Grade not found",
        ));
        respond_on_err!(accessible_student(storage.as_ref(), &user, grade.student_id).await);

        Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade retrieved")))
    }
}
