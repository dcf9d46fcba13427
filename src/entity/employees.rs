use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub employee_number: String,
    #[sea_orm(unique)]
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub position: String,
    pub salary_cents: Option<i64>,
    pub hire_date: Date,
    pub status: String,
    pub deleted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::leave_requests::Entity")]
    LeaveRequests,
}

impl Related<super::leave_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_employee(self) -> crate::models::hr::entities::Employee {
        use crate::models::hr::entities::{Employee, EmploymentStatus};

        Employee {
            id: self.id,
            employee_number: self.employee_number,
            user_id: self.user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            department: self.department,
            position: self.position,
            salary_cents: self.salary_cents,
            hire_date: self.hire_date,
            status: self
                .status
                .parse::<EmploymentStatus>()
                .unwrap_or(EmploymentStatus::Active),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
