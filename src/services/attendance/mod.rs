pub mod mark;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::attendance::requests::{
    AttendanceFilter, AttendanceListParams, AttendanceSummaryQuery, UpdateAttendanceRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, found, not_found, respond_on_err, stored};

crate::services::lazy_service!(AttendanceService);

impl AttendanceService {
    pub async fn list_attendance(
        &self,
        query: AttendanceListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let filter = AttendanceFilter {
            classroom_id: query.classroom_id,
            student_id: query.student_id,
            status: query.status,
            from: query.from,
            to: query.to,
        };
        let page = respond_on_err!(stored(
            storage
                .list_attendance(query.pagination.page(), query.pagination.size(), filter)
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Attendance retrieved")))
    }

    /// Counts over any combination of student, classroom and date range.
    pub async fn summary(
        &self,
        query: AttendanceSummaryQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let (Some(from), Some(to)) = (query.from, query.to)
            && to < from
        {
            return Ok(bad_request(
                ErrorCode::AttendanceInvalid,
                "'to' must not be before 'from'",
            ));
        }

        let storage = self.get_storage(request);
        let counts = respond_on_err!(stored(
            storage
                .count_attendance(AttendanceFilter {
                    classroom_id: query.classroom_id,
                    student_id: query.student_id,
                    status: None,
                    from: query.from,
                    to: query.to,
                })
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary::summarize(counts, query.from, query.to),
            "Attendance summary retrieved",
        )))
    }

    pub async fn update_attendance(
        &self,
        id: i64,
        req: UpdateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let record = respond_on_err!(found(
            storage.update_attendance(id, req).await,
            ErrorCode::NotFound,
            "Attendance record not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(record, "Attendance updated")))
    }

    pub async fn delete_attendance(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.delete_attendance(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Attendance deleted"))),
            Ok(false) => Ok(not_found(ErrorCode::NotFound, "Attendance record not found")),
            Err(e) => Ok(error_response(&e)),
        }
    }
}
