use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "leave_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub employee_id: i64,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: String,
    pub status: String,
    pub decided_by: Option<i64>,
    pub decided_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_leave_request(self) -> crate::models::hr::entities::LeaveRequest {
        use crate::models::hr::entities::{LeaveRequest, LeaveStatus};

        LeaveRequest {
            id: self.id,
            employee_id: self.employee_id,
            start_date: self.start_date,
            end_date: self.end_date,
            days: (self.end_date - self.start_date).num_days() + 1,
            reason: self.reason,
            status: self.status.parse::<LeaveStatus>().unwrap_or(LeaveStatus::Pending),
            decided_by: self.decided_by,
            decided_at: self.decided_at.map(super::to_datetime),
            created_at: super::to_datetime(self.created_at),
        }
    }
}
