//! Short aliases for entities, active models and models.

pub use super::applications::{
    ActiveModel as ApplicationActiveModel, Entity as Applications, Model as ApplicationModel,
};
pub use super::assessments::{
    ActiveModel as AssessmentActiveModel, Entity as Assessments, Model as AssessmentModel,
};
pub use super::attendance_records::{
    ActiveModel as AttendanceRecordActiveModel, Entity as AttendanceRecords, Model as AttendanceRecordModel,
};
pub use super::blog_posts::{
    ActiveModel as BlogPostActiveModel, Entity as BlogPosts, Model as BlogPostModel,
};
pub use super::classrooms::{
    ActiveModel as ClassroomActiveModel, Entity as Classrooms, Model as ClassroomModel,
};
pub use super::employees::{
    ActiveModel as EmployeeActiveModel, Entity as Employees, Model as EmployeeModel,
};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::fee_structures::{
    ActiveModel as FeeStructureActiveModel, Entity as FeeStructures, Model as FeeStructureModel,
};
pub use super::grade_levels::{
    ActiveModel as GradeLevelActiveModel, Entity as GradeLevels, Model as GradeLevelModel,
};
pub use super::grades::{
    ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel,
};
pub use super::inventory_items::{
    ActiveModel as InventoryItemActiveModel, Entity as InventoryItems, Model as InventoryItemModel,
};
pub use super::inventory_transactions::{
    ActiveModel as InventoryTransactionActiveModel, Entity as InventoryTransactions, Model as InventoryTransactionModel,
};
pub use super::invoice_lines::{
    ActiveModel as InvoiceLineActiveModel, Entity as InvoiceLines, Model as InvoiceLineModel,
};
pub use super::invoices::{
    ActiveModel as InvoiceActiveModel, Entity as Invoices, Model as InvoiceModel,
};
pub use super::leave_requests::{
    ActiveModel as LeaveRequestActiveModel, Entity as LeaveRequests, Model as LeaveRequestModel,
};
pub use super::messages::{
    ActiveModel as MessageActiveModel, Entity as Messages, Model as MessageModel,
};
pub use super::parent_students::{
    ActiveModel as ParentStudentActiveModel, Entity as ParentStudents, Model as ParentStudentModel,
};
pub use super::parents::{
    ActiveModel as ParentActiveModel, Entity as Parents, Model as ParentModel,
};
pub use super::payments::{
    ActiveModel as PaymentActiveModel, Entity as Payments, Model as PaymentModel,
};
pub use super::student_profiles::{
    ActiveModel as StudentProfileActiveModel, Entity as StudentProfiles, Model as StudentProfileModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teacher_profiles::{
    ActiveModel as TeacherProfileActiveModel, Entity as TeacherProfiles, Model as TeacherProfileModel,
};
pub use super::terms::{
    ActiveModel as TermActiveModel, Entity as Terms, Model as TermModel,
};
pub use super::thread_participants::{
    ActiveModel as ThreadParticipantActiveModel, Entity as ThreadParticipants, Model as ThreadParticipantModel,
};
pub use super::threads::{
    ActiveModel as ThreadActiveModel, Entity as Threads, Model as ThreadModel,
};
pub use super::users::{
    ActiveModel as UserActiveModel, Entity as Users, Model as UserModel,
};
