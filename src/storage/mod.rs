//! Persistence seam. Services only talk to [`Storage`]; the SeaORM backend
//! is the single implementation.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::errors::Result;
use crate::models::PaginatedResponse;
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

pub mod sea_orm_storage;

/// Lookups return `Ok(None)` and deletes `Ok(false)` when the row does not
/// exist. Multi-row writes are transactional and report rule violations as
/// `Validation` or `NotFound` errors; unique violations surface as `Conflict`.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // Users
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    // Grade levels
    async fn create_grade_level(&self, req: CreateGradeLevelRequest) -> Result<GradeLevel>;
    async fn get_grade_level(&self, id: i64) -> Result<Option<GradeLevel>>;
    async fn list_grade_levels(&self, page: i64, size: i64)
    -> Result<PaginatedResponse<GradeLevel>>;
    async fn update_grade_level(
        &self,
        id: i64,
        req: UpdateGradeLevelRequest,
    ) -> Result<Option<GradeLevel>>;
    async fn delete_grade_level(&self, id: i64) -> Result<bool>;

    // Classrooms
    async fn create_classroom(&self, req: CreateClassroomRequest) -> Result<Classroom>;
    async fn get_classroom(&self, id: i64) -> Result<Option<Classroom>>;
    async fn list_classrooms(
        &self,
        page: i64,
        size: i64,
        grade_level_id: Option<i64>,
    ) -> Result<PaginatedResponse<Classroom>>;
    async fn update_classroom(
        &self,
        id: i64,
        req: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>>;
    async fn delete_classroom(&self, id: i64) -> Result<bool>;

    // Terms
    async fn create_term(&self, req: CreateTermRequest) -> Result<Term>;
    async fn get_term(&self, id: i64) -> Result<Option<Term>>;
    async fn list_terms(
        &self,
        page: i64,
        size: i64,
        academic_year: Option<String>,
    ) -> Result<PaginatedResponse<Term>>;
    async fn update_term(&self, id: i64, req: UpdateTermRequest) -> Result<Option<Term>>;
    async fn delete_term(&self, id: i64) -> Result<bool>;
    /// Marks `id` current and clears the flag everywhere else.
    async fn set_current_term(&self, id: i64) -> Result<Option<Term>>;
    async fn get_current_term(&self) -> Result<Option<Term>>;

    // Subjects
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(
        &self,
        page: i64,
        size: i64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<Subject>>;
    async fn update_subject(&self, id: i64, req: UpdateSubjectRequest) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    // Students
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    async fn list_students(&self, query: StudentListQuery) -> Result<PaginatedResponse<Student>>;
    async fn update_student(&self, id: i64, req: UpdateStudentRequest) -> Result<Option<Student>>;
    async fn soft_delete_student(&self, id: i64) -> Result<bool>;
    /// Ids from `ids` that belong to non-deleted students.
    async fn existing_student_ids(&self, ids: &[i64]) -> Result<Vec<i64>>;

    // Teachers
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers(
        &self,
        page: i64,
        size: i64,
        is_active: Option<bool>,
        search: Option<String>,
    ) -> Result<PaginatedResponse<Teacher>>;
    async fn update_teacher(&self, id: i64, req: UpdateTeacherRequest) -> Result<Option<Teacher>>;
    async fn soft_delete_teacher(&self, id: i64) -> Result<bool>;

    // Parents
    async fn create_parent(&self, req: CreateParentRequest) -> Result<Parent>;
    async fn get_parent(&self, id: i64) -> Result<Option<Parent>>;
    async fn get_parent_by_user_id(&self, user_id: i64) -> Result<Option<Parent>>;
    async fn list_parents(
        &self,
        page: i64,
        size: i64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<Parent>>;
    async fn update_parent(&self, id: i64, req: UpdateParentRequest) -> Result<Option<Parent>>;
    async fn soft_delete_parent(&self, id: i64) -> Result<bool>;
    async fn link_parent_student(&self, parent_id: i64, student_id: i64) -> Result<()>;
    async fn unlink_parent_student(&self, parent_id: i64, student_id: i64) -> Result<bool>;
    async fn list_parent_students(&self, parent_id: i64) -> Result<Vec<Student>>;
    async fn is_parent_of(&self, parent_id: i64, student_id: i64) -> Result<bool>;

    // Assessments
    async fn create_assessment(
        &self,
        req: CreateAssessmentRequest,
        created_by: i64,
    ) -> Result<Assessment>;
    async fn get_assessment(&self, id: i64) -> Result<Option<Assessment>>;
    async fn list_assessments(
        &self,
        page: i64,
        size: i64,
        term_id: Option<i64>,
        subject_id: Option<i64>,
        classroom_id: Option<i64>,
    ) -> Result<PaginatedResponse<Assessment>>;
    async fn update_assessment(
        &self,
        id: i64,
        req: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>>;
    /// Deletes the assessment together with its grades.
    async fn delete_assessment(&self, id: i64) -> Result<bool>;
    async fn max_recorded_score(&self, assessment_id: i64) -> Result<Option<f64>>;

    // Grades
    async fn create_grade(&self, req: CreateGradeRequest, graded_by: i64) -> Result<Grade>;
    async fn get_grade(&self, id: i64) -> Result<Option<Grade>>;
    async fn list_grades(
        &self,
        page: i64,
        size: i64,
        student_id: Option<i64>,
        assessment_id: Option<i64>,
        term_id: Option<i64>,
    ) -> Result<PaginatedResponse<Grade>>;
    async fn update_grade(&self, id: i64, req: UpdateGradeRequest) -> Result<Option<Grade>>;
    async fn delete_grade(&self, id: i64) -> Result<bool>;
    /// Every grade of a student in a term joined with its assessment and subject.
    async fn list_report_entries(&self, student_id: i64, term_id: i64) -> Result<Vec<ReportEntry>>;

    // Attendance
    async fn mark_attendance(
        &self,
        req: MarkAttendanceRequest,
        recorded_by: i64,
    ) -> Result<MarkAttendanceResponse>;
    async fn get_attendance(&self, id: i64) -> Result<Option<AttendanceRecord>>;
    async fn list_attendance(
        &self,
        page: i64,
        size: i64,
        filter: AttendanceFilter,
    ) -> Result<PaginatedResponse<AttendanceRecord>>;
    async fn update_attendance(
        &self,
        id: i64,
        req: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;
    async fn count_attendance(&self, filter: AttendanceFilter) -> Result<AttendanceCounts>;

    // Fee structures
    async fn create_fee_structure(&self, req: CreateFeeStructureRequest) -> Result<FeeStructure>;
    async fn get_fee_structure(&self, id: i64) -> Result<Option<FeeStructure>>;
    async fn list_fee_structures(
        &self,
        page: i64,
        size: i64,
        grade_level_id: Option<i64>,
        term_id: Option<i64>,
    ) -> Result<PaginatedResponse<FeeStructure>>;
    async fn update_fee_structure(
        &self,
        id: i64,
        req: UpdateFeeStructureRequest,
    ) -> Result<Option<FeeStructure>>;
    async fn delete_fee_structure(&self, id: i64) -> Result<bool>;

    // Invoices and payments
    async fn create_invoice(&self, req: CreateInvoiceRequest, created_by: i64)
    -> Result<InvoiceDetail>;
    async fn generate_invoices(
        &self,
        req: GenerateInvoicesRequest,
        created_by: i64,
    ) -> Result<GenerateInvoicesResponse>;
    async fn get_invoice(&self, id: i64) -> Result<Option<Invoice>>;
    async fn get_invoice_detail(&self, id: i64) -> Result<Option<InvoiceDetail>>;
    async fn list_invoices(
        &self,
        page: i64,
        size: i64,
        filter: InvoiceFilter,
    ) -> Result<PaginatedResponse<Invoice>>;
    async fn cancel_invoice(&self, id: i64) -> Result<Option<Invoice>>;
    async fn delete_invoice(&self, id: i64) -> Result<bool>;
    /// Inserts the payment, assigns its receipt number and recomputes the
    /// invoice status, all in one transaction.
    async fn record_payment(&self, payment: NewPayment) -> Result<Payment>;
    async fn get_payment(&self, id: i64) -> Result<Option<Payment>>;
    async fn list_payments(&self, invoice_id: i64) -> Result<Vec<Payment>>;
    async fn fee_summary(&self, term_id: Option<i64>) -> Result<FeeSummary>;

    // Messaging
    async fn create_thread(&self, req: CreateThreadRequest, created_by: i64) -> Result<Thread>;
    async fn get_thread(&self, id: i64) -> Result<Option<Thread>>;
    async fn is_thread_participant(&self, thread_id: i64, user_id: i64) -> Result<bool>;
    async fn list_threads_for_user(
        &self,
        user_id: i64,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse<ThreadSummary>>;
    async fn list_messages(
        &self,
        thread_id: i64,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse<Message>>;
    async fn send_message(&self, thread_id: i64, sender_id: i64, content: String)
    -> Result<Message>;
    async fn mark_thread_read(&self, thread_id: i64, user_id: i64) -> Result<bool>;

    // Blog
    async fn create_post(
        &self,
        req: CreatePostRequest,
        slug: String,
        author_id: i64,
    ) -> Result<BlogPost>;
    async fn get_post(&self, id: i64) -> Result<Option<BlogPost>>;
    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>>;
    /// Slugs equal to `base` or of the form `base-N`.
    async fn list_slugs_like(&self, base: &str) -> Result<Vec<String>>;
    async fn list_posts(
        &self,
        page: i64,
        size: i64,
        filter: PostFilter,
    ) -> Result<PaginatedResponse<BlogPost>>;
    async fn update_post(&self, id: i64, req: UpdatePostRequest) -> Result<Option<BlogPost>>;
    /// Changes the status; `published_at` is only set the first time.
    async fn set_post_status(&self, id: i64, status: PostStatus) -> Result<Option<BlogPost>>;
    async fn delete_post(&self, id: i64) -> Result<bool>;
    async fn increment_post_views(&self, id: i64) -> Result<()>;

    // Inventory
    async fn create_item(&self, req: CreateItemRequest) -> Result<InventoryItem>;
    async fn get_item(&self, id: i64) -> Result<Option<InventoryItem>>;
    async fn list_items(
        &self,
        page: i64,
        size: i64,
        filter: ItemFilter,
    ) -> Result<PaginatedResponse<InventoryItem>>;
    async fn update_item(&self, id: i64, req: UpdateItemRequest) -> Result<Option<InventoryItem>>;
    async fn soft_delete_item(&self, id: i64) -> Result<bool>;
    async fn record_stock_movement(
        &self,
        item_id: i64,
        req: StockMovementRequest,
        processed_by: i64,
    ) -> Result<StockMovementResponse>;
    async fn list_item_transactions(
        &self,
        item_id: i64,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse<InventoryTransaction>>;

    // HR
    async fn create_employee(&self, req: CreateEmployeeRequest) -> Result<Employee>;
    async fn get_employee(&self, id: i64) -> Result<Option<Employee>>;
    async fn list_employees(
        &self,
        page: i64,
        size: i64,
        filter: EmployeeFilter,
    ) -> Result<PaginatedResponse<Employee>>;
    async fn update_employee(
        &self,
        id: i64,
        req: UpdateEmployeeRequest,
    ) -> Result<Option<Employee>>;
    /// Soft delete: status becomes terminated.
    async fn terminate_employee(&self, id: i64) -> Result<bool>;
    async fn create_leave_request(&self, req: CreateLeaveRequest) -> Result<LeaveRequest>;
    async fn get_leave_request(&self, id: i64) -> Result<Option<LeaveRequest>>;
    async fn list_leave_requests(
        &self,
        page: i64,
        size: i64,
        employee_id: Option<i64>,
        status: Option<LeaveStatus>,
    ) -> Result<PaginatedResponse<LeaveRequest>>;
    async fn decide_leave_request(
        &self,
        id: i64,
        status: LeaveStatus,
        decided_by: i64,
    ) -> Result<Option<LeaveRequest>>;

    // Admissions
    async fn submit_application(&self, req: SubmitApplicationRequest) -> Result<Application>;
    async fn get_application(&self, id: i64) -> Result<Option<Application>>;
    async fn get_application_detail(&self, id: i64) -> Result<Option<ApplicationDetail>>;
    async fn list_applications(
        &self,
        page: i64,
        size: i64,
        filter: ApplicationFilter,
    ) -> Result<PaginatedResponse<Application>>;
    /// Fails with `Validation` when the current status does not lead to
    /// `target`.
    async fn set_application_status(
        &self,
        id: i64,
        target: ApplicationStatus,
        reviewed_by: i64,
    ) -> Result<Option<Application>>;
    /// Approved applications only. Creates the student profile and the
    /// enrollment record together.
    async fn enroll_application(
        &self,
        id: i64,
        req: EnrollApplicationRequest,
    ) -> Result<Option<EnrollmentResponse>>;
    async fn get_enrollment(&self, application_id: i64) -> Result<Option<Enrollment>>;

    // Dashboard
    async fn dashboard_stats(&self, today: NaiveDate) -> Result<DashboardStats>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
