use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::admissions::requests::{
    ApplicationListParams, EnrollApplicationRequest, SubmitApplicationRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AdmissionService;
use crate::utils::SafeIDI64;

// Lazily initialised global AdmissionService
static ADMISSION_SERVICE: Lazy<AdmissionService> = Lazy::new(AdmissionService::new_lazy);

pub async fn submit_application(
    request: HttpRequest,
    body: web::Json<SubmitApplicationRequest>,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE
        .submit_application(body.into_inner(), &request)
        .await
}

pub async fn list_applications(
    request: HttpRequest,
    query: web::Query<ApplicationListParams>,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE
        .list_applications(query.into_inner(), &request)
        .await
}

pub async fn get_application(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.get_application(id.0, &request).await
}

pub async fn start_review(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.start_review(id.0, &request).await
}

pub async fn approve_application(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.approve(id.0, &request).await
}

pub async fn reject_application(request: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.reject(id.0, &request).await
}

pub async fn enroll_application(
    request: HttpRequest,
    id: SafeIDI64,
    body: web::Json<EnrollApplicationRequest>,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE
        .enroll(id.0, body.into_inner(), &request)
        .await
}

pub fn configure_admission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admissions")
            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::get().to(list_applications)))
            .service(web::resource("/{id}").route(web::get().to(get_application)))
            .service(web::resource("/{id}/review").route(web::post().to(start_review)))
            // decisions and enrollment are for administrators only
            .service(
                web::resource("/{id}/approve").route(
                    web::post()
                        .to(approve_application)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/{id}/reject").route(
                    web::post()
                        .to(reject_application)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/{id}/enroll").route(
                    web::post()
                        .to(enroll_application)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            ),
    )
    .service(
        web::scope("/api/v1/public/admissions")
            .route("", web::post().to(submit_application)),
    );
}
