use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, students::requests::StudentListParams};
use crate::services::{respond_on_err, stored};

pub async fn list_students(
    service: &StudentService,
    query: StudentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let page = respond_on_err!(stored(storage.list_students(query.into()).await));
    Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Students retrieved")))
}
