use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::ApiResponse;
use crate::services::{accessible_student, current_user, respond_on_err};

pub async fn get_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let storage = service.get_storage(request);

    let student = respond_on_err!(accessible_student(storage.as_ref(), &user, id).await);
    Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Student retrieved")))
}
