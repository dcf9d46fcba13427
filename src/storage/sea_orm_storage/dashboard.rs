use super::{SeaOrmStorage, db_error};
use crate::entity::{classrooms, inventory_items, parents, student_profiles, teacher_profiles};
use crate::errors::Result;
use crate::models::attendance::requests::AttendanceFilter;
use crate::models::dashboard::DashboardStats;
use crate::models::students::entities::AcademicStatus;
use crate::services::attendance::summary::attendance_percentage;
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    pub async fn dashboard_stats_impl(&self, today: NaiveDate) -> Result<DashboardStats> {
        let ctx = "Failed to compute dashboard statistics";

        let total_students = student_profiles::Entity::find()
            .filter(student_profiles::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(db_error(ctx))?;
        let active_students = student_profiles::Entity::find()
            .filter(student_profiles::Column::DeletedAt.is_null())
            .filter(student_profiles::Column::AcademicStatus.eq(AcademicStatus::Active.as_str()))
            .count(&self.db)
            .await
            .map_err(db_error(ctx))?;
        let total_teachers = teacher_profiles::Entity::find()
            .filter(teacher_profiles::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(db_error(ctx))?;
        let active_teachers = teacher_profiles::Entity::find()
            .filter(teacher_profiles::Column::DeletedAt.is_null())
            .filter(teacher_profiles::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error(ctx))?;
        let total_parents = parents::Entity::find()
            .filter(parents::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(db_error(ctx))?;
        let total_classrooms = classrooms::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_error(ctx))?;
        let low_stock_items = inventory_items::Entity::find()
            .filter(inventory_items::Column::IsActive.eq(true))
            .filter(
                Expr::col(inventory_items::Column::CurrentStock)
                    .lte(Expr::col(inventory_items::Column::MinimumStock)),
            )
            .count(&self.db)
            .await
            .map_err(db_error(ctx))?;

        let fees = self.fee_summary_impl(None).await?;
        let attendance = self
            .count_attendance_impl(AttendanceFilter {
                from: Some(today),
                to: Some(today),
                ..Default::default()
            })
            .await?;

        Ok(DashboardStats {
            total_students: total_students as i64,
            active_students: active_students as i64,
            total_teachers: total_teachers as i64,
            active_teachers: active_teachers as i64,
            total_parents: total_parents as i64,
            total_classrooms: total_classrooms as i64,
            invoices_by_status: fees.by_status,
            invoiced_cents: fees.invoiced_cents,
            collected_cents: fees.collected_cents,
            outstanding_cents: fees.outstanding_cents,
            attendance_marked_today: attendance.total(),
            attendance_rate_today: attendance_percentage(&attendance),
            low_stock_items: low_stock_items as i64,
            generated_at: chrono::Utc::now(),
        })
    }
}
