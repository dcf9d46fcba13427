use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::{employees, leave_requests};
use crate::errors::{Result, SchoolError};
use crate::models::PaginatedResponse;
use crate::models::hr::{
    entities::{Employee, EmploymentStatus, LeaveRequest, LeaveStatus},
    requests::{CreateEmployeeRequest, CreateLeaveRequest, EmployeeFilter, UpdateEmployeeRequest},
};
use crate::utils::contains_pattern;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_employee_impl(&self, req: CreateEmployeeRequest) -> Result<Employee> {
        let now = now_ts();
        let model = employees::ActiveModel {
            employee_number: Set(req.employee_number),
            user_id: Set(req.user_id),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            department: Set(req.department),
            position: Set(req.position),
            salary_cents: Set(req.salary_cents),
            hire_date: Set(req.hire_date),
            status: Set(EmploymentStatus::Active.to_string()),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let row = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create employee"))?;
        Ok(row.into_employee())
    }

    /// Terminated employees stay reachable by id so their leave history can
    /// still be read.
    pub async fn get_employee_impl(&self, id: i64) -> Result<Option<Employee>> {
        let row = employees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query employee"))?;
        Ok(row.map(|m| m.into_employee()))
    }

    /// Terminated employees are listed only when asked for explicitly.
    pub async fn list_employees_impl(
        &self,
        page: i64,
        size: i64,
        filter: EmployeeFilter,
    ) -> Result<PaginatedResponse<Employee>> {
        let mut select = employees::Entity::find();
        match filter.status {
            Some(status) => {
                select = select.filter(employees::Column::Status.eq(status.as_str()));
            }
            None => {
                select = select.filter(employees::Column::DeletedAt.is_null());
            }
        }
        if let Some(ref department) = filter.department
            && !department.trim().is_empty()
        {
            select = select.filter(employees::Column::Department.eq(department.trim()));
        }
        if let Some(ref search) = filter.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(employees::Column::EmployeeNumber.like(contains_pattern(search)))
                    .add(employees::Column::FirstName.like(contains_pattern(search)))
                    .add(employees::Column::LastName.like(contains_pattern(search))),
            );
        }
        select = select.order_by_asc(employees::Column::EmployeeNumber);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list employees")
            .await?;
        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_employee()).collect(),
            pagination,
        })
    }

    pub async fn update_employee_impl(
        &self,
        id: i64,
        req: UpdateEmployeeRequest,
    ) -> Result<Option<Employee>> {
        if self.get_employee_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = employees::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(first_name) = req.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = req.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(department) = req.department {
            model.department = Set(department);
        }
        if let Some(position) = req.position {
            model.position = Set(position);
        }
        if let Some(salary_cents) = req.salary_cents {
            model.salary_cents = Set(Some(salary_cents));
        }
        if let Some(status) = req.status {
            model.status = Set(status.to_string());
        }

        let row = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update employee"))?;
        Ok(Some(row.into_employee()))
    }

    pub async fn terminate_employee_impl(&self, id: i64) -> Result<bool> {
        let now = now_ts();
        let result = employees::Entity::update_many()
            .col_expr(
                employees::Column::Status,
                Expr::value(EmploymentStatus::Terminated.as_str()),
            )
            .col_expr(employees::Column::DeletedAt, Expr::value(now))
            .col_expr(employees::Column::UpdatedAt, Expr::value(now))
            .filter(employees::Column::Id.eq(id))
            .filter(employees::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to terminate employee"))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn create_leave_request_impl(&self, req: CreateLeaveRequest) -> Result<LeaveRequest> {
        let model = leave_requests::ActiveModel {
            employee_id: Set(req.employee_id),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            reason: Set(req.reason),
            status: Set(LeaveStatus::Pending.to_string()),
            decided_by: Set(None),
            decided_at: Set(None),
            created_at: Set(now_ts()),
            ..Default::default()
        };

        let row = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create leave request"))?;
        Ok(row.into_leave_request())
    }

    pub async fn get_leave_request_impl(&self, id: i64) -> Result<Option<LeaveRequest>> {
        let row = leave_requests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query leave request"))?;
        Ok(row.map(|m| m.into_leave_request()))
    }

    pub async fn list_leave_requests_impl(
        &self,
        page: i64,
        size: i64,
        employee_id: Option<i64>,
        status: Option<LeaveStatus>,
    ) -> Result<PaginatedResponse<LeaveRequest>> {
        let mut select = leave_requests::Entity::find();
        if let Some(employee_id) = employee_id {
            select = select.filter(leave_requests::Column::EmployeeId.eq(employee_id));
        }
        if let Some(status) = status {
            select = select.filter(leave_requests::Column::Status.eq(status.as_str()));
        }
        select = select
            .order_by_desc(leave_requests::Column::StartDate)
            .order_by_desc(leave_requests::Column::Id);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list leave requests")
            .await?;
        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_leave_request()).collect(),
            pagination,
        })
    }

    /// Only pending requests can be decided; the update is conditional on
    /// the current status so two deciders cannot both win.
    pub async fn decide_leave_request_impl(
        &self,
        id: i64,
        status: LeaveStatus,
        decided_by: i64,
    ) -> Result<Option<LeaveRequest>> {
        let result = leave_requests::Entity::update_many()
            .col_expr(leave_requests::Column::Status, Expr::value(status.as_str()))
            .col_expr(leave_requests::Column::DecidedBy, Expr::value(decided_by))
            .col_expr(leave_requests::Column::DecidedAt, Expr::value(now_ts()))
            .filter(leave_requests::Column::Id.eq(id))
            .filter(leave_requests::Column::Status.eq(LeaveStatus::Pending.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to decide leave request"))?;

        let current = self.get_leave_request_impl(id).await?;
        match current {
            None => Ok(None),
            Some(_) if result.rows_affected == 0 => Err(SchoolError::validation(
                "Only pending leave requests can be approved or rejected",
            )),
            Some(request) => Ok(Some(request)),
        }
    }
}
