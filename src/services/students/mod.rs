pub mod attendance_summary;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod report;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::students::requests::{
    AttendanceSummaryParams, CreateStudentRequest, ReportCardParams, StudentListParams,
    UpdateStudentRequest,
};

crate::services::lazy_service!(StudentService);

impl StudentService {
    pub async fn list_students(
        &self,
        query: StudentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    pub async fn create_student(
        &self,
        req: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, req, request).await
    }

    pub async fn get_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_student(self, id, request).await
    }

    pub async fn update_student(
        &self,
        id: i64,
        req: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, id, req, request).await
    }

    pub async fn delete_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_student(self, id, request).await
    }

    pub async fn report_card(
        &self,
        id: i64,
        query: ReportCardParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report::report_card(self, id, query, request).await
    }

    pub async fn attendance_summary(
        &self,
        id: i64,
        query: AttendanceSummaryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance_summary::attendance_summary(self, id, query, request).await
    }
}
