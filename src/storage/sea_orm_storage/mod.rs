//! SeaORM storage backend for SQLite, PostgreSQL and MySQL.

mod academics;
mod admissions;
mod assessments;
mod attendance;
mod blog;
mod dashboard;
mod fees;
mod grades;
mod hr;
mod inventory;
mod messaging;
mod parents;
mod students;
mod teachers;
mod users;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ColumnTrait, ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, Select, SqlErr,
};
use tracing::info;

use crate::config::AppConfig;
use crate::entity::users as user_rows;
use crate::errors::{Result, SchoolError};
use crate::models::common::pagination::MAX_PAGE_SIZE;
use crate::models::{PaginatedResponse, PaginationInfo};
use crate::models::academics::{
    entities::{Classroom, GradeLevel, Subject, Term},
    requests::{
        CreateClassroomRequest, CreateGradeLevelRequest, CreateSubjectRequest, CreateTermRequest,
        UpdateClassroomRequest, UpdateGradeLevelRequest, UpdateSubjectRequest, UpdateTermRequest,
    },
};
use crate::models::admissions::{
    entities::{Application, ApplicationStatus, Enrollment},
    requests::{ApplicationFilter, EnrollApplicationRequest, SubmitApplicationRequest},
    responses::{ApplicationDetail, EnrollmentResponse},
};
use crate::models::assessments::{
    entities::Assessment,
    requests::{CreateAssessmentRequest, UpdateAssessmentRequest},
};
use crate::models::attendance::{
    entities::{AttendanceCounts, AttendanceRecord},
    requests::{AttendanceFilter, MarkAttendanceRequest, UpdateAttendanceRequest},
    responses::MarkAttendanceResponse,
};
use crate::models::blog::{
    entities::{BlogPost, PostStatus},
    requests::{CreatePostRequest, PostFilter, UpdatePostRequest},
};
use crate::models::dashboard::DashboardStats;
use crate::models::fees::{
    entities::{FeeStructure, Invoice, NewPayment, Payment},
    requests::{
        CreateFeeStructureRequest, CreateInvoiceRequest, GenerateInvoicesRequest, InvoiceFilter,
        UpdateFeeStructureRequest,
    },
    responses::{FeeSummary, GenerateInvoicesResponse, InvoiceDetail},
};
use crate::models::grades::{
    entities::{Grade, ReportEntry},
    requests::{CreateGradeRequest, UpdateGradeRequest},
};
use crate::models::hr::{
    entities::{Employee, LeaveRequest, LeaveStatus},
    requests::{CreateEmployeeRequest, CreateLeaveRequest, EmployeeFilter, UpdateEmployeeRequest},
};
use crate::models::inventory::{
    entities::{InventoryItem, InventoryTransaction},
    requests::{CreateItemRequest, ItemFilter, StockMovementRequest, UpdateItemRequest},
    responses::StockMovementResponse,
};
use crate::models::messaging::{
    entities::{Message, Thread, ThreadSummary},
    requests::CreateThreadRequest,
};
use crate::models::parents::{
    entities::Parent,
    requests::{CreateParentRequest, UpdateParentRequest},
};
use crate::models::students::{
    entities::Student,
    requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
};
use crate::models::teachers::{
    entities::Teacher,
    requests::{CreateTeacherRequest, UpdateTeacherRequest},
};
use crate::models::users::{
    entities::User,
    requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    responses::UserListResponse,
};
use crate::storage::Storage;

#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::with_connection(db).await?;
        info!("SeaORM storage ready, database: {}", db_url);
        Ok(storage)
    }

    /// Wraps an existing connection and brings its schema up to date.
    pub async fn with_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("Migration failed: {e}")))?;
        Ok(Self { db })
    }

    /// SQLite with WAL and tuned pragmas.
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| {
                SchoolError::database_connection(format!("SQLite connection failed: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("Database connection failed: {e}")))
    }

    /// Infers the backend from the URL; bare `.db`/`.sqlite` paths become SQLite URLs.
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite path"
            )))
        }
    }

    /// One page of `select` plus the pagination block for the filtered total.
    pub(crate) async fn fetch_page<E>(
        &self,
        select: Select<E>,
        page: i64,
        size: i64,
        context: &'static str,
    ) -> Result<(Vec<E::Model>, PaginationInfo)>
    where
        E: EntityTrait,
        E::Model: FromQueryResult + Send + Sync,
    {
        let page = page.max(1);
        let size = size.clamp(1, MAX_PAGE_SIZE);

        let paginator = select.paginate(&self.db, size as u64);
        let total = paginator.num_items().await.map_err(db_error(context))?;
        // Pages past the end (including ones whose offset would overflow)
        // are empty without touching the database again.
        let in_range = (page - 1)
            .checked_mul(size)
            .is_some_and(|offset| (offset as u64) < total);
        let items = if in_range {
            paginator
                .fetch_page((page - 1) as u64)
                .await
                .map_err(db_error(context))?
        } else {
            Vec::new()
        };

        Ok((items, PaginationInfo::new(page, size, total as i64)))
    }

    /// User rows keyed by id, for joining profile tables in memory.
    pub(crate) async fn load_user_rows(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, user_rows::Model>> {
        let ids: Vec<i64> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = user_rows::Entity::find()
            .filter(user_rows::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load users"))?;
        Ok(rows.into_iter().map(|u| (u.id, u)).collect())
    }
}

/// Maps a `DbErr` into a `SchoolError` with context. Unique violations become
/// `Conflict`; foreign key violations become `Conflict` as well since the
/// row is still referenced or references something missing.
pub(crate) fn db_error(context: &'static str) -> impl Fn(DbErr) -> SchoolError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            SchoolError::conflict(format!("{context}: duplicate value ({detail})"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            SchoolError::conflict(format!("{context}: related record constraint ({detail})"))
        }
        _ => SchoolError::database_operation(format!("{context}: {e}")),
    }
}

pub(crate) fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn create_grade_level(&self, req: CreateGradeLevelRequest) -> Result<GradeLevel> {
        self.create_grade_level_impl(req).await
    }

    async fn get_grade_level(&self, id: i64) -> Result<Option<GradeLevel>> {
        self.get_grade_level_impl(id).await
    }

    async fn list_grade_levels(
        &self,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse<GradeLevel>> {
        self.list_grade_levels_impl(page, size).await
    }

    async fn update_grade_level(
        &self,
        id: i64,
        req: UpdateGradeLevelRequest,
    ) -> Result<Option<GradeLevel>> {
        self.update_grade_level_impl(id, req).await
    }

    async fn delete_grade_level(&self, id: i64) -> Result<bool> {
        self.delete_grade_level_impl(id).await
    }

    async fn create_classroom(&self, req: CreateClassroomRequest) -> Result<Classroom> {
        self.create_classroom_impl(req).await
    }

    async fn get_classroom(&self, id: i64) -> Result<Option<Classroom>> {
        self.get_classroom_impl(id).await
    }

    async fn list_classrooms(
        &self,
        page: i64,
        size: i64,
        grade_level_id: Option<i64>,
    ) -> Result<PaginatedResponse<Classroom>> {
        self.list_classrooms_impl(page, size, grade_level_id).await
    }

    async fn update_classroom(
        &self,
        id: i64,
        req: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>> {
        self.update_classroom_impl(id, req).await
    }

    async fn delete_classroom(&self, id: i64) -> Result<bool> {
        self.delete_classroom_impl(id).await
    }

    async fn create_term(&self, req: CreateTermRequest) -> Result<Term> {
        self.create_term_impl(req).await
    }

    async fn get_term(&self, id: i64) -> Result<Option<Term>> {
        self.get_term_impl(id).await
    }

    async fn list_terms(
        &self,
        page: i64,
        size: i64,
        academic_year: Option<String>,
    ) -> Result<PaginatedResponse<Term>> {
        self.list_terms_impl(page, size, academic_year).await
    }

    async fn update_term(&self, id: i64, req: UpdateTermRequest) -> Result<Option<Term>> {
        self.update_term_impl(id, req).await
    }

    async fn delete_term(&self, id: i64) -> Result<bool> {
        self.delete_term_impl(id).await
    }

    async fn set_current_term(&self, id: i64) -> Result<Option<Term>> {
        self.set_current_term_impl(id).await
    }

    async fn get_current_term(&self) -> Result<Option<Term>> {
        self.get_current_term_impl().await
    }

    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(req).await
    }

    async fn get_subject(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_impl(id).await
    }

    async fn list_subjects(
        &self,
        page: i64,
        size: i64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<Subject>> {
        self.list_subjects_impl(page, size, search).await
    }

    async fn update_subject(&self, id: i64, req: UpdateSubjectRequest) -> Result<Option<Subject>> {
        self.update_subject_impl(id, req).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_impl(id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn list_students(&self, query: StudentListQuery) -> Result<PaginatedResponse<Student>> {
        self.list_students_impl(query).await
    }

    async fn update_student(&self, id: i64, req: UpdateStudentRequest) -> Result<Option<Student>> {
        self.update_student_impl(id, req).await
    }

    async fn soft_delete_student(&self, id: i64) -> Result<bool> {
        self.soft_delete_student_impl(id).await
    }

    async fn existing_student_ids(&self, ids: &[i64]) -> Result<Vec<i64>> {
        self.existing_student_ids_impl(ids).await
    }

    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(req).await
    }

    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_impl(id).await
    }

    async fn list_teachers(
        &self,
        page: i64,
        size: i64,
        is_active: Option<bool>,
        search: Option<String>,
    ) -> Result<PaginatedResponse<Teacher>> {
        self.list_teachers_impl(page, size, is_active, search).await
    }

    async fn update_teacher(&self, id: i64, req: UpdateTeacherRequest) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, req).await
    }

    async fn soft_delete_teacher(&self, id: i64) -> Result<bool> {
        self.soft_delete_teacher_impl(id).await
    }

    async fn create_parent(&self, req: CreateParentRequest) -> Result<Parent> {
        self.create_parent_impl(req).await
    }

    async fn get_parent(&self, id: i64) -> Result<Option<Parent>> {
        self.get_parent_impl(id).await
    }

    async fn get_parent_by_user_id(&self, user_id: i64) -> Result<Option<Parent>> {
        self.get_parent_by_user_id_impl(user_id).await
    }

    async fn list_parents(
        &self,
        page: i64,
        size: i64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<Parent>> {
        self.list_parents_impl(page, size, search).await
    }

    async fn update_parent(&self, id: i64, req: UpdateParentRequest) -> Result<Option<Parent>> {
        self.update_parent_impl(id, req).await
    }

    async fn soft_delete_parent(&self, id: i64) -> Result<bool> {
        self.soft_delete_parent_impl(id).await
    }

    async fn link_parent_student(&self, parent_id: i64, student_id: i64) -> Result<()> {
        self.link_parent_student_impl(parent_id, student_id).await
    }

    async fn unlink_parent_student(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        self.unlink_parent_student_impl(parent_id, student_id).await
    }

    async fn list_parent_students(&self, parent_id: i64) -> Result<Vec<Student>> {
        self.list_parent_students_impl(parent_id).await
    }

    async fn is_parent_of(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        self.is_parent_of_impl(parent_id, student_id).await
    }

    async fn create_assessment(
        &self,
        req: CreateAssessmentRequest,
        created_by: i64,
    ) -> Result<Assessment> {
        self.create_assessment_impl(req, created_by).await
    }

    async fn get_assessment(&self, id: i64) -> Result<Option<Assessment>> {
        self.get_assessment_impl(id).await
    }

    async fn list_assessments(
        &self,
        page: i64,
        size: i64,
        term_id: Option<i64>,
        subject_id: Option<i64>,
        classroom_id: Option<i64>,
    ) -> Result<PaginatedResponse<Assessment>> {
        self.list_assessments_impl(page, size, term_id, subject_id, classroom_id).await
    }

    async fn update_assessment(
        &self,
        id: i64,
        req: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        self.update_assessment_impl(id, req).await
    }

    async fn delete_assessment(&self, id: i64) -> Result<bool> {
        self.delete_assessment_impl(id).await
    }

    async fn max_recorded_score(&self, assessment_id: i64) -> Result<Option<f64>> {
        self.max_recorded_score_impl(assessment_id).await
    }

    async fn create_grade(&self, req: CreateGradeRequest, graded_by: i64) -> Result<Grade> {
        self.create_grade_impl(req, graded_by).await
    }

    async fn get_grade(&self, id: i64) -> Result<Option<Grade>> {
        self.get_grade_impl(id).await
    }

    async fn list_grades(
        &self,
        page: i64,
        size: i64,
        student_id: Option<i64>,
        assessment_id: Option<i64>,
        term_id: Option<i64>,
    ) -> Result<PaginatedResponse<Grade>> {
        self.list_grades_impl(page, size, student_id, assessment_id, term_id).await
    }

    async fn update_grade(&self, id: i64, req: UpdateGradeRequest) -> Result<Option<Grade>> {
        self.update_grade_impl(id, req).await
    }

    async fn delete_grade(&self, id: i64) -> Result<bool> {
        self.delete_grade_impl(id).await
    }

    async fn list_report_entries(&self, student_id: i64, term_id: i64) -> Result<Vec<ReportEntry>> {
        self.list_report_entries_impl(student_id, term_id).await
    }

    async fn mark_attendance(
        &self,
        req: MarkAttendanceRequest,
        recorded_by: i64,
    ) -> Result<MarkAttendanceResponse> {
        self.mark_attendance_impl(req, recorded_by).await
    }

    async fn get_attendance(&self, id: i64) -> Result<Option<AttendanceRecord>> {
        self.get_attendance_impl(id).await
    }

    async fn list_attendance(
        &self,
        page: i64,
        size: i64,
        filter: AttendanceFilter,
    ) -> Result<PaginatedResponse<AttendanceRecord>> {
        self.list_attendance_impl(page, size, filter).await
    }

    async fn update_attendance(
        &self,
        id: i64,
        req: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>> {
        self.update_attendance_impl(id, req).await
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    async fn count_attendance(&self, filter: AttendanceFilter) -> Result<AttendanceCounts> {
        self.count_attendance_impl(filter).await
    }

    async fn create_fee_structure(&self, req: CreateFeeStructureRequest) -> Result<FeeStructure> {
        self.create_fee_structure_impl(req).await
    }

    async fn get_fee_structure(&self, id: i64) -> Result<Option<FeeStructure>> {
        self.get_fee_structure_impl(id).await
    }

    async fn list_fee_structures(
        &self,
        page: i64,
        size: i64,
        grade_level_id: Option<i64>,
        term_id: Option<i64>,
    ) -> Result<PaginatedResponse<FeeStructure>> {
        self.list_fee_structures_impl(page, size, grade_level_id, term_id).await
    }

    async fn update_fee_structure(
        &self,
        id: i64,
        req: UpdateFeeStructureRequest,
    ) -> Result<Option<FeeStructure>> {
        self.update_fee_structure_impl(id, req).await
    }

    async fn delete_fee_structure(&self, id: i64) -> Result<bool> {
        self.delete_fee_structure_impl(id).await
    }

    async fn create_invoice(
        &self,
        req: CreateInvoiceRequest,
        created_by: i64,
    ) -> Result<InvoiceDetail> {
        self.create_invoice_impl(req, created_by).await
    }

    async fn generate_invoices(
        &self,
        req: GenerateInvoicesRequest,
        created_by: i64,
    ) -> Result<GenerateInvoicesResponse> {
        self.generate_invoices_impl(req, created_by).await
    }

    async fn get_invoice(&self, id: i64) -> Result<Option<Invoice>> {
        self.get_invoice_impl(id).await
    }

    async fn get_invoice_detail(&self, id: i64) -> Result<Option<InvoiceDetail>> {
        self.get_invoice_detail_impl(id).await
    }

    async fn list_invoices(
        &self,
        page: i64,
        size: i64,
        filter: InvoiceFilter,
    ) -> Result<PaginatedResponse<Invoice>> {
        self.list_invoices_impl(page, size, filter).await
    }

    async fn cancel_invoice(&self, id: i64) -> Result<Option<Invoice>> {
        self.cancel_invoice_impl(id).await
    }

    async fn delete_invoice(&self, id: i64) -> Result<bool> {
        self.delete_invoice_impl(id).await
    }

    async fn record_payment(&self, payment: NewPayment) -> Result<Payment> {
        self.record_payment_impl(payment).await
    }

    async fn get_payment(&self, id: i64) -> Result<Option<Payment>> {
        self.get_payment_impl(id).await
    }

    async fn list_payments(&self, invoice_id: i64) -> Result<Vec<Payment>> {
        self.list_payments_impl(invoice_id).await
    }

    async fn fee_summary(&self, term_id: Option<i64>) -> Result<FeeSummary> {
        self.fee_summary_impl(term_id).await
    }

    async fn create_thread(&self, req: CreateThreadRequest, created_by: i64) -> Result<Thread> {
        self.create_thread_impl(req, created_by).await
    }

    async fn get_thread(&self, id: i64) -> Result<Option<Thread>> {
        self.get_thread_impl(id).await
    }

    async fn is_thread_participant(&self, thread_id: i64, user_id: i64) -> Result<bool> {
        self.is_thread_participant_impl(thread_id, user_id).await
    }

    async fn list_threads_for_user(
        &self,
        user_id: i64,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse<ThreadSummary>> {
        self.list_threads_for_user_impl(user_id, page, size).await
    }

    async fn list_messages(
        &self,
        thread_id: i64,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse<Message>> {
        self.list_messages_impl(thread_id, page, size).await
    }

    async fn send_message(
        &self,
        thread_id: i64,
        sender_id: i64,
        content: String,
    ) -> Result<Message> {
        self.send_message_impl(thread_id, sender_id, content).await
    }

    async fn mark_thread_read(&self, thread_id: i64, user_id: i64) -> Result<bool> {
        self.mark_thread_read_impl(thread_id, user_id).await
    }

    async fn create_post(
        &self,
        req: CreatePostRequest,
        slug: String,
        author_id: i64,
    ) -> Result<BlogPost> {
        self.create_post_impl(req, slug, author_id).await
    }

    async fn get_post(&self, id: i64) -> Result<Option<BlogPost>> {
        self.get_post_impl(id).await
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        self.get_post_by_slug_impl(slug).await
    }

    async fn list_slugs_like(&self, base: &str) -> Result<Vec<String>> {
        self.list_slugs_like_impl(base).await
    }

    async fn list_posts(
        &self,
        page: i64,
        size: i64,
        filter: PostFilter,
    ) -> Result<PaginatedResponse<BlogPost>> {
        self.list_posts_impl(page, size, filter).await
    }

    async fn update_post(&self, id: i64, req: UpdatePostRequest) -> Result<Option<BlogPost>> {
        self.update_post_impl(id, req).await
    }

    async fn set_post_status(&self, id: i64, status: PostStatus) -> Result<Option<BlogPost>> {
        self.set_post_status_impl(id, status).await
    }

    async fn delete_post(&self, id: i64) -> Result<bool> {
        self.delete_post_impl(id).await
    }

    async fn increment_post_views(&self, id: i64) -> Result<()> {
        self.increment_post_views_impl(id).await
    }

    async fn create_item(&self, req: CreateItemRequest) -> Result<InventoryItem> {
        self.create_item_impl(req).await
    }

    async fn get_item(&self, id: i64) -> Result<Option<InventoryItem>> {
        self.get_item_impl(id).await
    }

    async fn list_items(
        &self,
        page: i64,
        size: i64,
        filter: ItemFilter,
    ) -> Result<PaginatedResponse<InventoryItem>> {
        self.list_items_impl(page, size, filter).await
    }

    async fn update_item(&self, id: i64, req: UpdateItemRequest) -> Result<Option<InventoryItem>> {
        self.update_item_impl(id, req).await
    }

    async fn soft_delete_item(&self, id: i64) -> Result<bool> {
        self.soft_delete_item_impl(id).await
    }

    async fn record_stock_movement(
        &self,
        item_id: i64,
        req: StockMovementRequest,
        processed_by: i64,
    ) -> Result<StockMovementResponse> {
        self.record_stock_movement_impl(item_id, req, processed_by).await
    }

    async fn list_item_transactions(
        &self,
        item_id: i64,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse<InventoryTransaction>> {
        self.list_item_transactions_impl(item_id, page, size).await
    }

    async fn create_employee(&self, req: CreateEmployeeRequest) -> Result<Employee> {
        self.create_employee_impl(req).await
    }

    async fn get_employee(&self, id: i64) -> Result<Option<Employee>> {
        self.get_employee_impl(id).await
    }

    async fn list_employees(
        &self,
        page: i64,
        size: i64,
        filter: EmployeeFilter,
    ) -> Result<PaginatedResponse<Employee>> {
        self.list_employees_impl(page, size, filter).await
    }

    async fn update_employee(
        &self,
        id: i64,
        req: UpdateEmployeeRequest,
    ) -> Result<Option<Employee>> {
        self.update_employee_impl(id, req).await
    }

    async fn terminate_employee(&self, id: i64) -> Result<bool> {
        self.terminate_employee_impl(id).await
    }

    async fn create_leave_request(&self, req: CreateLeaveRequest) -> Result<LeaveRequest> {
        self.create_leave_request_impl(req).await
    }

    async fn get_leave_request(&self, id: i64) -> Result<Option<LeaveRequest>> {
        self.get_leave_request_impl(id).await
    }

    async fn list_leave_requests(
        &self,
        page: i64,
        size: i64,
        employee_id: Option<i64>,
        status: Option<LeaveStatus>,
    ) -> Result<PaginatedResponse<LeaveRequest>> {
        self.list_leave_requests_impl(page, size, employee_id, status).await
    }

    async fn decide_leave_request(
        &self,
        id: i64,
        status: LeaveStatus,
        decided_by: i64,
    ) -> Result<Option<LeaveRequest>> {
        self.decide_leave_request_impl(id, status, decided_by).await
    }

    async fn submit_application(&self, req: SubmitApplicationRequest) -> Result<Application> {
        self.submit_application_impl(req).await
    }

    async fn get_application(&self, id: i64) -> Result<Option<Application>> {
        self.get_application_impl(id).await
    }

    async fn get_application_detail(&self, id: i64) -> Result<Option<ApplicationDetail>> {
        self.get_application_detail_impl(id).await
    }

    async fn list_applications(
        &self,
        page: i64,
        size: i64,
        filter: ApplicationFilter,
    ) -> Result<PaginatedResponse<Application>> {
        self.list_applications_impl(page, size, filter).await
    }

    async fn set_application_status(
        &self,
        id: i64,
        target: ApplicationStatus,
        reviewed_by: i64,
    ) -> Result<Option<Application>> {
        self.set_application_status_impl(id, target, reviewed_by).await
    }

    async fn enroll_application(
        &self,
        id: i64,
        req: EnrollApplicationRequest,
    ) -> Result<Option<EnrollmentResponse>> {
        self.enroll_application_impl(id, req).await
    }

    async fn get_enrollment(&self, application_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(application_id).await
    }

    async fn dashboard_stats(&self, today: NaiveDate) -> Result<DashboardStats> {
        self.dashboard_stats_impl(today).await
    }
}
