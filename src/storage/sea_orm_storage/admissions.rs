use super::{SeaOrmStorage, db_error, now_ts, today};
use crate::entity::{applications, enrollments, student_profiles};
use crate::errors::{Result, SchoolError};
use crate::models::PaginatedResponse;
use crate::models::admissions::{
    entities::{Application, ApplicationStatus, Enrollment},
    requests::{ApplicationFilter, EnrollApplicationRequest, SubmitApplicationRequest},
    responses::{ApplicationDetail, EnrollmentResponse},
};
use crate::models::students::entities::AcademicStatus;
use crate::utils::contains_pattern;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};
use tracing::info;

impl SeaOrmStorage {
    pub async fn submit_application_impl(
        &self,
        req: SubmitApplicationRequest,
    ) -> Result<Application> {
        let now = now_ts();
        let model = applications::ActiveModel {
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            date_of_birth: Set(req.date_of_birth),
            gender: Set(req.gender.to_string()),
            grade_level_id: Set(req.grade_level_id),
            guardian_name: Set(req.guardian_name),
            guardian_phone: Set(req.guardian_phone),
            guardian_email: Set(req.guardian_email),
            address: Set(req.address),
            previous_school: Set(req.previous_school),
            notes: Set(req.notes),
            status: Set(ApplicationStatus::New.to_string()),
            submitted_at: Set(now),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            updated_at: Set(now),
            ..Default::default()
        };

        let row = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to submit application"))?;
        Ok(row.into_application())
    }

    pub async fn get_application_impl(&self, id: i64) -> Result<Option<Application>> {
        let row = applications::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query application"))?;
        Ok(row.map(|m| m.into_application()))
    }

    pub async fn get_application_detail_impl(&self, id: i64) -> Result<Option<ApplicationDetail>> {
        let Some(application) = self.get_application_impl(id).await? else {
            return Ok(None);
        };
        let enrollment = self.get_enrollment_impl(id).await?;
        Ok(Some(ApplicationDetail {
            application,
            enrollment,
        }))
    }

    /// Oldest first so the admissions office works through the queue in
    /// submission order.
    pub async fn list_applications_impl(
        &self,
        page: i64,
        size: i64,
        filter: ApplicationFilter,
    ) -> Result<PaginatedResponse<Application>> {
        let mut select = applications::Entity::find();
        if let Some(status) = filter.status {
            select = select.filter(applications::Column::Status.eq(status.as_str()));
        }
        if let Some(grade_level_id) = filter.grade_level_id {
            select = select.filter(applications::Column::GradeLevelId.eq(grade_level_id));
        }
        if let Some(ref search) = filter.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(applications::Column::FirstName.like(contains_pattern(search)))
                    .add(applications::Column::LastName.like(contains_pattern(search)))
                    .add(applications::Column::GuardianName.like(contains_pattern(search))),
            );
        }
        select = select
            .order_by_asc(applications::Column::SubmittedAt)
            .order_by_asc(applications::Column::Id);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list applications")
            .await?;
        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_application()).collect(),
            pagination,
        })
    }

    /// Moves an application to `target` only from a status that allows it.
    /// The update is conditional on the current status so two reviewers
    /// cannot both decide the same application.
    pub async fn set_application_status_impl(
        &self,
        id: i64,
        target: ApplicationStatus,
        reviewed_by: i64,
    ) -> Result<Option<Application>> {
        let sources: Vec<&'static str> = ApplicationStatus::sources_of(target)
            .iter()
            .map(|status| status.as_str())
            .collect();
        let now = now_ts();
        let result = applications::Entity::update_many()
            .col_expr(applications::Column::Status, Expr::value(target.as_str()))
            .col_expr(applications::Column::ReviewedBy, Expr::value(reviewed_by))
            .col_expr(applications::Column::ReviewedAt, Expr::value(now))
            .col_expr(applications::Column::UpdatedAt, Expr::value(now))
            .filter(applications::Column::Id.eq(id))
            .filter(applications::Column::Status.is_in(sources))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to update application"))?;

        match self.get_application_impl(id).await? {
            None => Ok(None),
            Some(current) if result.rows_affected == 0 => Err(SchoolError::validation(format!(
                "A {} application cannot be moved to {}",
                current.status, target
            ))),
            Some(application) => Ok(Some(application)),
        }
    }

    /// Creates the student profile, the enrollment record and marks the
    /// application enrolled, all in one transaction.
    pub async fn enroll_application_impl(
        &self,
        id: i64,
        req: EnrollApplicationRequest,
    ) -> Result<Option<EnrollmentResponse>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let Some(application) = applications::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_error("Failed to query application"))?
        else {
            return Ok(None);
        };
        let status = application
            .status
            .parse::<ApplicationStatus>()
            .map_err(SchoolError::validation)?;
        if !status.can_move_to(ApplicationStatus::Enrolled) {
            return Err(SchoolError::validation(format!(
                "Only approved applications can be enrolled, this one is {status}"
            )));
        }

        let now = now_ts();
        let enrollment_date = req.enrollment_date.unwrap_or_else(today);
        let student = student_profiles::ActiveModel {
            user_id: Set(req.user_id),
            admission_number: Set(req.admission_number.clone()),
            grade_level_id: Set(application.grade_level_id),
            classroom_id: Set(req.classroom_id),
            gender: Set(Some(application.gender.clone())),
            date_of_birth: Set(Some(application.date_of_birth)),
            enrollment_date: Set(enrollment_date),
            academic_status: Set(AcademicStatus::Active.to_string()),
            is_boarder: Set(req.is_boarder),
            medical_notes: Set(None),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("Failed to create student"))?;

        let enrollment = enrollments::ActiveModel {
            application_id: Set(application.id),
            student_id: Set(Some(student.id)),
            admission_number: Set(req.admission_number),
            enrollment_date: Set(enrollment_date),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("Failed to record enrollment"))?;

        let application = applications::ActiveModel {
            id: Set(application.id),
            status: Set(ApplicationStatus::Enrolled.to_string()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(db_error("Failed to update application"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        info!(
            "Application {} enrolled as student {} ({})",
            application.id, student.id, enrollment.admission_number
        );

        let student = self
            .get_student_impl(student.id)
            .await?
            .ok_or_else(|| SchoolError::not_found("Student user not found"))?;
        Ok(Some(EnrollmentResponse {
            application: application.into_application(),
            enrollment: enrollment.into_enrollment(),
            student,
        }))
    }

    pub async fn get_enrollment_impl(&self, application_id: i64) -> Result<Option<Enrollment>> {
        let row = enrollments::Entity::find()
            .filter(enrollments::Column::ApplicationId.eq(application_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query enrollment"))?;
        Ok(row.map(|m| m.into_enrollment()))
    }
}
