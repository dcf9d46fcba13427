use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::HrService;
use crate::errors::SchoolError;
use crate::models::hr::requests::{
    CreateEmployeeRequest, EmployeeFilter, EmployeeListParams, UpdateEmployeeRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, error_response, found, not_found, reject, respond_on_err, stored,
};
use crate::utils::validate::validate_required;

fn check_employee(req: &CreateEmployeeRequest) -> Result<(), String> {
    validate_required("Employee number", &req.employee_number)?;
    validate_required("First name", &req.first_name)?;
    validate_required("Last name", &req.last_name)?;
    validate_required("Department", &req.department)?;
    validate_required("Position", &req.position)?;
    if req.salary_cents.is_some_and(|s| s < 0) {
        return Err("Salary cannot be negative".to_string());
    }
    Ok(())
}

impl HrService {
    pub async fn list_employees(
        &self,
        query: EmployeeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let filter = EmployeeFilter {
            department: query.department.filter(|d| !d.trim().is_empty()),
            status: query.status,
            search: query.search.filter(|s| !s.trim().is_empty()),
        };
        let employees = respond_on_err!(stored(
            storage
                .list_employees(query.pagination.page(), query.pagination.size(), filter)
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(employees, "Employees retrieved")))
    }

    pub async fn create_employee(
        &self,
        req: CreateEmployeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = check_employee(&req) {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }

        let storage = self.get_storage(request);
        if let Some(user_id) = req.user_id {
            respond_on_err!(found(
                storage.get_user_by_id(user_id).await,
                ErrorCode::UserNotFound,
                "Linked user not found",
            ));
        }

        match storage.create_employee(req).await {
            Ok(employee) => {
                info!(
                    "Employee {} ({} {}) created",
                    employee.employee_number, employee.first_name, employee.last_name
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(employee, "Employee created")))
            }
            Err(SchoolError::Conflict(_)) => Ok(reject(
                StatusCode::CONFLICT,
                ErrorCode::Conflict,
                "Employee number already exists",
            )),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn get_employee(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let employee = respond_on_err!(found(
            storage.get_employee(id).await,
            ErrorCode::NotFound,
            "Employee not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(employee, "Employee retrieved")))
    }

    pub async fn update_employee(
        &self,
        id: i64,
        req: UpdateEmployeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if req.salary_cents.is_some_and(|s| s < 0) {
            return Ok(bad_request(ErrorCode::BadRequest, "Salary cannot be negative"));
        }

        let storage = self.get_storage(request);
        let employee = respond_on_err!(found(
            storage.update_employee(id, req).await,
            ErrorCode::NotFound,
            "Employee not found",
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(employee, "Employee updated")))
    }

    /// Employees are never removed, only terminated.
    pub async fn terminate_employee(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.terminate_employee(id).await {
            Ok(true) => {
                info!("Employee {} terminated", id);
                Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Employee terminated")))
            }
            Ok(false) => Ok(not_found(ErrorCode::NotFound, "Employee not found")),
            Err(e) => Ok(error_response(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(number: &str, salary: Option<i64>) -> CreateEmployeeRequest {
        CreateEmployeeRequest {
            employee_number: number.to_string(),
            user_id: None,
            first_name: "Rudo".to_string(),
            last_name: "Moyo".to_string(),
            department: "Administration".to_string(),
            position: "Bursar".to_string(),
            salary_cents: salary,
            hire_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date"),
        }
    }

    #[test]
    fn test_employee_checks() {
        assert!(check_employee(&employee("EMP-001", Some(120_000))).is_ok());
        assert!(check_employee(&employee("", None)).is_err());
        assert!(check_employee(&employee("EMP-001", Some(-1))).is_err());
    }
}
