use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::hr::requests::{
    CreateEmployeeRequest, CreateLeaveRequest, EmployeeListParams, LeaveListParams,
    UpdateEmployeeRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::HrService;
use crate::utils::SafeIDI64;

// Lazily initialised global HrService
static HR_SERVICE: Lazy<HrService> = Lazy::new(HrService::new_lazy);

pub async fn list_employees(
    request: HttpRequest,
    query: web::Query<EmployeeListParams>,
) -> ActixResult<HttpResponse> {
    HR_SERVICE.list_employees(query.into_inner(), &request).await
}

pub async fn create_employee(
    request: HttpRequest,
    body: web::Json<CreateEmployeeRequest>,
) -> ActixResult<HttpResponse> {
    HR_SERVICE.create_employee(body.into_inner(), &request).await
}

pub async fn get_employee(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    HR_SERVICE.get_employee(id.0, &request).await
}

pub async fn update_employee(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateEmployeeRequest>,
) -> ActixResult<HttpResponse> {
    HR_SERVICE
        .update_employee(id.0, body.into_inner(), &request)
        .await
}

pub async fn terminate_employee(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    HR_SERVICE.terminate_employee(id.0, &request).await
}

pub async fn list_leave_requests(
    request: HttpRequest,
    query: web::Query<LeaveListParams>,
) -> ActixResult<HttpResponse> {
    HR_SERVICE
        .list_leave_requests(query.into_inner(), &request)
        .await
}

pub async fn create_leave_request(
    request: HttpRequest,
    body: web::Json<CreateLeaveRequest>,
) -> ActixResult<HttpResponse> {
    HR_SERVICE
        .create_leave_request(body.into_inner(), &request)
        .await
}

pub async fn approve_leave(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    HR_SERVICE.approve_leave(id.0, &request).await
}

pub async fn reject_leave(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    HR_SERVICE.reject_leave(id.0, &request).await
}

pub fn configure_hr_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/hr")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/employees")
                    .route(web::get().to(list_employees))
                    .route(web::post().to(create_employee)),
            )
            .service(
                web::resource("/employees/{id}")
                    .route(web::get().to(get_employee))
                    .route(web::put().to(update_employee))
                    .route(web::delete().to(terminate_employee)),
            )
            .service(
                web::resource("/leave-requests")
                    .route(web::get().to(list_leave_requests))
                    .route(web::post().to(create_leave_request)),
            )
            .service(
                web::resource("/leave-requests/{id}/approve").route(web::post().to(approve_leave)),
            )
            .service(
                web::resource("/leave-requests/{id}/reject").route(web::post().to(reject_leave)),
            ),
    );
}
