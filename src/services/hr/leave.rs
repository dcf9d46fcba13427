//! Leave requests and their approval.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use tracing::info;

use super::HrService;
use crate::errors::SchoolError;
use crate::models::hr::entities::{EmploymentStatus, LeaveStatus};
use crate::models::hr::requests::{CreateLeaveRequest, LeaveListParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, current_user, error_response, found, not_found, respond_on_err, stored,
};

pub(crate) fn check_period(start: NaiveDate, end: NaiveDate) -> Result<(), String> {
    if end < start {
        return Err("Leave cannot end before it starts".to_string());
    }
    Ok(())
}

impl HrService {
    pub async fn create_leave_request(
        &self,
        mut req: CreateLeaveRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = check_period(req.start_date, req.end_date) {
            return Ok(bad_request(ErrorCode::LeaveInvalid, msg));
        }
        req.reason = req.reason.trim().to_string();
        if req.reason.is_empty() {
            return Ok(bad_request(ErrorCode::LeaveInvalid, "A reason is required"));
        }

        let storage = self.get_storage(request);
        let employee = respond_on_err!(found(
            storage.get_employee(req.employee_id).await,
            ErrorCode::NotFound,
            "Employee not found",
        ));
        if employee.status == EmploymentStatus::Terminated {
            return Ok(bad_request(
                ErrorCode::LeaveInvalid,
                "Terminated employees cannot request leave",
            ));
        }

        match storage.create_leave_request(req).await {
            Ok(leave) => {
                info!(
                    "Leave request {} for employee {}: {} days",
                    leave.id, employee.employee_number, leave.days
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(leave, "Leave requested")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn list_leave_requests(
        &self,
        query: LeaveListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let requests = respond_on_err!(stored(
            storage
                .list_leave_requests(
                    query.pagination.page(),
                    query.pagination.size(),
                    query.employee_id,
                    query.status,
                )
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(requests, "Leave requests retrieved")))
    }

    pub async fn approve_leave(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        self.decide(id, LeaveStatus::Approved, request).await
    }

    pub async fn reject_leave(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        self.decide(id, LeaveStatus::Rejected, request).await
    }

    async fn decide(
        &self,
        id: i64,
        status: LeaveStatus,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);
        match storage.decide_leave_request(id, status, user.id).await {
            Ok(Some(leave)) => {
                info!("Leave request {} {} by {}", id, status, user.username);
                Ok(HttpResponse::Ok().json(ApiResponse::success(leave, format!("Leave {status}"))))
            }
            Ok(None) => Ok(not_found(ErrorCode::NotFound, "Leave request not found")),
            Err(SchoolError::Validation(msg)) => Ok(bad_request(ErrorCode::LeaveInvalid, msg)),
            Err(e) => Ok(error_response(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_period() {
        let day = |d| NaiveDate::from_ymd_opt(2025, 4, d).expect("valid date");
        assert!(check_period(day(7), day(11)).is_ok());
        assert!(check_period(day(7), day(7)).is_ok());
        assert!(check_period(day(7), day(6)).is_err());
    }
}
