use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn timestamp<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).big_integer().not_null().to_owned()
}

fn unique_index(name: &str, table: impl IntoIden, cols: Vec<DynIden>) -> IndexCreateStatement {
    let mut index = Index::create();
    index.name(name).table(table).unique().if_not_exists();
    for col in cols {
        index.col(col);
    }
    index.to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Accounts
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk(Users::Id))
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::Phone).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(timestamp(Users::CreatedAt))
                    .col(timestamp(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Academic structure
        manager
            .create_table(
                Table::create()
                    .table(GradeLevels::Table)
                    .if_not_exists()
                    .col(pk(GradeLevels::Id))
                    .col(
                        ColumnDef::new(GradeLevels::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(GradeLevels::Level).integer().not_null())
                    .col(ColumnDef::new(GradeLevels::Description).text().null())
                    .col(timestamp(GradeLevels::CreatedAt))
                    .col(timestamp(GradeLevels::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Classrooms::Table)
                    .if_not_exists()
                    .col(pk(Classrooms::Id))
                    .col(
                        ColumnDef::new(Classrooms::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Classrooms::Name).string().not_null())
                    .col(ColumnDef::new(Classrooms::GradeLevelId).big_integer().null())
                    .col(ColumnDef::new(Classrooms::ClassTeacherId).big_integer().null())
                    .col(ColumnDef::new(Classrooms::Capacity).integer().not_null())
                    .col(timestamp(Classrooms::CreatedAt))
                    .col(timestamp(Classrooms::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classrooms::Table, Classrooms::GradeLevelId)
                            .to(GradeLevels::Table, GradeLevels::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classrooms::Table, Classrooms::ClassTeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Terms::Table)
                    .if_not_exists()
                    .col(pk(Terms::Id))
                    .col(ColumnDef::new(Terms::Name).string().not_null())
                    .col(ColumnDef::new(Terms::AcademicYear).string().not_null())
                    .col(ColumnDef::new(Terms::StartDate).date().not_null())
                    .col(ColumnDef::new(Terms::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Terms::IsCurrent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp(Terms::CreatedAt))
                    .col(timestamp(Terms::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "uk_terms_name_year",
                Terms::Table,
                vec![Terms::Name.into_iden(), Terms::AcademicYear.into_iden()],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(pk(Subjects::Id))
                    .col(
                        ColumnDef::new(Subjects::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(ColumnDef::new(Subjects::Description).text().null())
                    .col(
                        ColumnDef::new(Subjects::CreditHours)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(timestamp(Subjects::CreatedAt))
                    .col(timestamp(Subjects::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Profiles
        manager
            .create_table(
                Table::create()
                    .table(StudentProfiles::Table)
                    .if_not_exists()
                    .col(pk(StudentProfiles::Id))
                    .col(
                        ColumnDef::new(StudentProfiles::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::AdmissionNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::GradeLevelId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::ClassroomId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(StudentProfiles::Gender).string().null())
                    .col(ColumnDef::new(StudentProfiles::DateOfBirth).date().null())
                    .col(
                        ColumnDef::new(StudentProfiles::EnrollmentDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::AcademicStatus)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::IsBoarder)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::MedicalNotes)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::DeletedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(timestamp(StudentProfiles::CreatedAt))
                    .col(timestamp(StudentProfiles::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentProfiles::Table, StudentProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentProfiles::Table, StudentProfiles::GradeLevelId)
                            .to(GradeLevels::Table, GradeLevels::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentProfiles::Table, StudentProfiles::ClassroomId)
                            .to(Classrooms::Table, Classrooms::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TeacherProfiles::Table)
                    .if_not_exists()
                    .col(pk(TeacherProfiles::Id))
                    .col(
                        ColumnDef::new(TeacherProfiles::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherProfiles::EmployeeNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherProfiles::Qualification)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TeacherProfiles::Specialization)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(TeacherProfiles::HireDate).date().null())
                    .col(
                        ColumnDef::new(TeacherProfiles::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(TeacherProfiles::DeletedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(timestamp(TeacherProfiles::CreatedAt))
                    .col(timestamp(TeacherProfiles::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherProfiles::Table, TeacherProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Parents::Table)
                    .if_not_exists()
                    .col(pk(Parents::Id))
                    .col(
                        ColumnDef::new(Parents::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Parents::Relationship).string().not_null())
                    .col(ColumnDef::new(Parents::Phone).string().null())
                    .col(ColumnDef::new(Parents::Address).text().null())
                    .col(ColumnDef::new(Parents::Occupation).string().null())
                    .col(
                        ColumnDef::new(Parents::IsPrimaryContact)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Parents::DeletedAt).big_integer().null())
                    .col(timestamp(Parents::CreatedAt))
                    .col(timestamp(Parents::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Parents::Table, Parents::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ParentStudents::Table)
                    .if_not_exists()
                    .col(pk(ParentStudents::Id))
                    .col(
                        ColumnDef::new(ParentStudents::ParentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParentStudents::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(timestamp(ParentStudents::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(ParentStudents::Table, ParentStudents::ParentId)
                            .to(Parents::Table, Parents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ParentStudents::Table, ParentStudents::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "uk_parent_students_pair",
                ParentStudents::Table,
                vec![
                    ParentStudents::ParentId.into_iden(),
                    ParentStudents::StudentId.into_iden(),
                ],
            ))
            .await?;

        // Assessments and grades
        manager
            .create_table(
                Table::create()
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(pk(Assessments::Id))
                    .col(ColumnDef::new(Assessments::Name).string().not_null())
                    .col(ColumnDef::new(Assessments::Kind).string().not_null())
                    .col(ColumnDef::new(Assessments::TermId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Assessments::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::ClassroomId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Assessments::MaxScore).double().not_null())
                    .col(
                        ColumnDef::new(Assessments::Weight)
                            .double()
                            .not_null()
                            .default(1.0),
                    )
                    .col(ColumnDef::new(Assessments::HeldOn).date().null())
                    .col(ColumnDef::new(Assessments::Description).text().null())
                    .col(
                        ColumnDef::new(Assessments::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(timestamp(Assessments::CreatedAt))
                    .col(timestamp(Assessments::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assessments::Table, Assessments::TermId)
                            .to(Terms::Table, Terms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assessments::Table, Assessments::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assessments::Table, Assessments::ClassroomId)
                            .to(Classrooms::Table, Classrooms::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(pk(Grades::Id))
                    .col(ColumnDef::new(Grades::StudentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Grades::AssessmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Grades::Score).double().not_null())
                    .col(ColumnDef::new(Grades::Comments).text().null())
                    .col(ColumnDef::new(Grades::GradedBy).big_integer().not_null())
                    .col(timestamp(Grades::CreatedAt))
                    .col(timestamp(Grades::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::AssessmentId)
                            .to(Assessments::Table, Assessments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "uk_grades_student_assessment",
                Grades::Table,
                vec![Grades::StudentId.into_iden(), Grades::AssessmentId.into_iden()],
            ))
            .await?;

        // Attendance
        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecords::Table)
                    .if_not_exists()
                    .col(pk(AttendanceRecords::Id))
                    .col(
                        ColumnDef::new(AttendanceRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::ClassroomId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceRecords::Date).date().not_null())
                    .col(ColumnDef::new(AttendanceRecords::Status).string().not_null())
                    .col(ColumnDef::new(AttendanceRecords::Notes).text().null())
                    .col(
                        ColumnDef::new(AttendanceRecords::RecordedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(timestamp(AttendanceRecords::CreatedAt))
                    .col(timestamp(AttendanceRecords::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceRecords::Table, AttendanceRecords::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceRecords::Table, AttendanceRecords::ClassroomId)
                            .to(Classrooms::Table, Classrooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "uk_attendance_student_date",
                AttendanceRecords::Table,
                vec![
                    AttendanceRecords::StudentId.into_iden(),
                    AttendanceRecords::Date.into_iden(),
                ],
            ))
            .await?;

        // Fees
        manager
            .create_table(
                Table::create()
                    .table(FeeStructures::Table)
                    .if_not_exists()
                    .col(pk(FeeStructures::Id))
                    .col(
                        ColumnDef::new(FeeStructures::GradeLevelId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeeStructures::TermId).big_integer().not_null())
                    .col(ColumnDef::new(FeeStructures::FeeType).string().not_null())
                    .col(
                        ColumnDef::new(FeeStructures::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeeStructures::Description).text().null())
                    .col(
                        ColumnDef::new(FeeStructures::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp(FeeStructures::CreatedAt))
                    .col(timestamp(FeeStructures::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeeStructures::Table, FeeStructures::GradeLevelId)
                            .to(GradeLevels::Table, GradeLevels::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeeStructures::Table, FeeStructures::TermId)
                            .to(Terms::Table, Terms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "uk_fee_structures_level_term_type",
                FeeStructures::Table,
                vec![
                    FeeStructures::GradeLevelId.into_iden(),
                    FeeStructures::TermId.into_iden(),
                    FeeStructures::FeeType.into_iden(),
                ],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(pk(Invoices::Id))
                    .col(
                        ColumnDef::new(Invoices::InvoiceNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Invoices::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Invoices::TermId).big_integer().not_null())
                    .col(ColumnDef::new(Invoices::Status).string().not_null())
                    .col(ColumnDef::new(Invoices::IssueDate).date().not_null())
                    .col(ColumnDef::new(Invoices::DueDate).date().null())
                    .col(
                        ColumnDef::new(Invoices::TotalCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Invoices::Notes).text().null())
                    .col(ColumnDef::new(Invoices::CreatedBy).big_integer().not_null())
                    .col(timestamp(Invoices::CreatedAt))
                    .col(timestamp(Invoices::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Invoices::Table, Invoices::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Invoices::Table, Invoices::TermId)
                            .to(Terms::Table, Terms::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InvoiceLines::Table)
                    .if_not_exists()
                    .col(pk(InvoiceLines::Id))
                    .col(
                        ColumnDef::new(InvoiceLines::InvoiceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InvoiceLines::Description).string().not_null())
                    .col(
                        ColumnDef::new(InvoiceLines::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvoiceLines::FeeStructureId)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(InvoiceLines::Table, InvoiceLines::InvoiceId)
                            .to(Invoices::Table, Invoices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(pk(Payments::Id))
                    .col(ColumnDef::new(Payments::InvoiceId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Payments::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Payments::Method).string().not_null())
                    .col(ColumnDef::new(Payments::Reference).string().null())
                    .col(ColumnDef::new(Payments::TransactionId).string().null())
                    .col(
                        ColumnDef::new(Payments::ReceiptNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Payments::PaidOn).date().not_null())
                    .col(ColumnDef::new(Payments::ReceivedBy).big_integer().null())
                    .col(timestamp(Payments::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::InvoiceId)
                            .to(Invoices::Table, Invoices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Messaging
        manager
            .create_table(
                Table::create()
                    .table(Threads::Table)
                    .if_not_exists()
                    .col(pk(Threads::Id))
                    .col(ColumnDef::new(Threads::Title).string().not_null())
                    .col(ColumnDef::new(Threads::Kind).string().not_null())
                    .col(ColumnDef::new(Threads::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Threads::LastMessageAt).big_integer().null())
                    .col(timestamp(Threads::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Threads::Table, Threads::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ThreadParticipants::Table)
                    .if_not_exists()
                    .col(pk(ThreadParticipants::Id))
                    .col(
                        ColumnDef::new(ThreadParticipants::ThreadId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ThreadParticipants::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(timestamp(ThreadParticipants::JoinedAt))
                    .col(
                        ColumnDef::new(ThreadParticipants::LastReadAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ThreadParticipants::LastReadMessageId)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ThreadParticipants::Table, ThreadParticipants::ThreadId)
                            .to(Threads::Table, Threads::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ThreadParticipants::Table, ThreadParticipants::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "uk_thread_participants_pair",
                ThreadParticipants::Table,
                vec![
                    ThreadParticipants::ThreadId.into_iden(),
                    ThreadParticipants::UserId.into_iden(),
                ],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(pk(Messages::Id))
                    .col(ColumnDef::new(Messages::ThreadId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::SenderId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::Content).text().not_null())
                    .col(timestamp(Messages::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::ThreadId)
                            .to(Threads::Table, Threads::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::SenderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Blog
        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(pk(BlogPosts::Id))
                    .col(ColumnDef::new(BlogPosts::Title).string().not_null())
                    .col(
                        ColumnDef::new(BlogPosts::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(BlogPosts::Content).text().not_null())
                    .col(ColumnDef::new(BlogPosts::Excerpt).text().null())
                    .col(ColumnDef::new(BlogPosts::Category).string().not_null())
                    .col(ColumnDef::new(BlogPosts::Status).string().not_null())
                    .col(ColumnDef::new(BlogPosts::AuthorId).big_integer().not_null())
                    .col(
                        ColumnDef::new(BlogPosts::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(BlogPosts::PublishedAt).big_integer().null())
                    .col(timestamp(BlogPosts::CreatedAt))
                    .col(timestamp(BlogPosts::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(BlogPosts::Table, BlogPosts::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Inventory
        manager
            .create_table(
                Table::create()
                    .table(InventoryItems::Table)
                    .if_not_exists()
                    .col(pk(InventoryItems::Id))
                    .col(
                        ColumnDef::new(InventoryItems::ItemCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(InventoryItems::Name).string().not_null())
                    .col(ColumnDef::new(InventoryItems::Category).string().not_null())
                    .col(ColumnDef::new(InventoryItems::Description).text().null())
                    .col(
                        ColumnDef::new(InventoryItems::UnitPriceCents)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::CurrentStock)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::MinimumStock)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(InventoryItems::Location).string().null())
                    .col(
                        ColumnDef::new(InventoryItems::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp(InventoryItems::CreatedAt))
                    .col(timestamp(InventoryItems::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InventoryTransactions::Table)
                    .if_not_exists()
                    .col(pk(InventoryTransactions::Id))
                    .col(
                        ColumnDef::new(InventoryTransactions::ItemId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InventoryTransactions::Kind).string().not_null())
                    .col(
                        ColumnDef::new(InventoryTransactions::Quantity)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryTransactions::StockAfter)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryTransactions::Reference)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(InventoryTransactions::Notes).text().null())
                    .col(
                        ColumnDef::new(InventoryTransactions::ProcessedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(timestamp(InventoryTransactions::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(InventoryTransactions::Table, InventoryTransactions::ItemId)
                            .to(InventoryItems::Table, InventoryItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // HR
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(pk(Employees::Id))
                    .col(
                        ColumnDef::new(Employees::EmployeeNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::UserId)
                            .big_integer()
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::FirstName).string().not_null())
                    .col(ColumnDef::new(Employees::LastName).string().not_null())
                    .col(ColumnDef::new(Employees::Department).string().not_null())
                    .col(ColumnDef::new(Employees::Position).string().not_null())
                    .col(ColumnDef::new(Employees::SalaryCents).big_integer().null())
                    .col(ColumnDef::new(Employees::HireDate).date().not_null())
                    .col(ColumnDef::new(Employees::Status).string().not_null())
                    .col(ColumnDef::new(Employees::DeletedAt).big_integer().null())
                    .col(timestamp(Employees::CreatedAt))
                    .col(timestamp(Employees::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Employees::Table, Employees::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaveRequests::Table)
                    .if_not_exists()
                    .col(pk(LeaveRequests::Id))
                    .col(
                        ColumnDef::new(LeaveRequests::EmployeeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeaveRequests::StartDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::EndDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::Reason).text().not_null())
                    .col(ColumnDef::new(LeaveRequests::Status).string().not_null())
                    .col(ColumnDef::new(LeaveRequests::DecidedBy).big_integer().null())
                    .col(ColumnDef::new(LeaveRequests::DecidedAt).big_integer().null())
                    .col(timestamp(LeaveRequests::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(LeaveRequests::Table, LeaveRequests::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let tables: Vec<DynIden> = vec![
            LeaveRequests::Table.into_iden(),
            Employees::Table.into_iden(),
            InventoryTransactions::Table.into_iden(),
            InventoryItems::Table.into_iden(),
            BlogPosts::Table.into_iden(),
            Messages::Table.into_iden(),
            ThreadParticipants::Table.into_iden(),
            Threads::Table.into_iden(),
            Payments::Table.into_iden(),
            InvoiceLines::Table.into_iden(),
            Invoices::Table.into_iden(),
            FeeStructures::Table.into_iden(),
            AttendanceRecords::Table.into_iden(),
            Grades::Table.into_iden(),
            Assessments::Table.into_iden(),
            ParentStudents::Table.into_iden(),
            Parents::Table.into_iden(),
            TeacherProfiles::Table.into_iden(),
            StudentProfiles::Table.into_iden(),
            Subjects::Table.into_iden(),
            Terms::Table.into_iden(),
            Classrooms::Table.into_iden(),
            GradeLevels::Table.into_iden(),
            Users::Table.into_iden(),
        ];
        for table in tables {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    FirstName,
    LastName,
    Phone,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GradeLevels {
    #[sea_orm(iden = "grade_levels")]
    Table,
    Id,
    Name,
    Level,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Classrooms {
    #[sea_orm(iden = "classrooms")]
    Table,
    Id,
    Code,
    Name,
    GradeLevelId,
    ClassTeacherId,
    Capacity,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Terms {
    #[sea_orm(iden = "terms")]
    Table,
    Id,
    Name,
    AcademicYear,
    StartDate,
    EndDate,
    IsCurrent,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Code,
    Name,
    Description,
    CreditHours,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentProfiles {
    #[sea_orm(iden = "student_profiles")]
    Table,
    Id,
    UserId,
    AdmissionNumber,
    GradeLevelId,
    ClassroomId,
    Gender,
    DateOfBirth,
    EnrollmentDate,
    AcademicStatus,
    IsBoarder,
    MedicalNotes,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeacherProfiles {
    #[sea_orm(iden = "teacher_profiles")]
    Table,
    Id,
    UserId,
    EmployeeNumber,
    Qualification,
    Specialization,
    HireDate,
    IsActive,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Parents {
    #[sea_orm(iden = "parents")]
    Table,
    Id,
    UserId,
    Relationship,
    Phone,
    Address,
    Occupation,
    IsPrimaryContact,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ParentStudents {
    #[sea_orm(iden = "parent_students")]
    Table,
    Id,
    ParentId,
    StudentId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Assessments {
    #[sea_orm(iden = "assessments")]
    Table,
    Id,
    Name,
    Kind,
    TermId,
    SubjectId,
    ClassroomId,
    MaxScore,
    Weight,
    HeldOn,
    Description,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    StudentId,
    AssessmentId,
    Score,
    Comments,
    GradedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttendanceRecords {
    #[sea_orm(iden = "attendance_records")]
    Table,
    Id,
    StudentId,
    ClassroomId,
    Date,
    Status,
    Notes,
    RecordedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FeeStructures {
    #[sea_orm(iden = "fee_structures")]
    Table,
    Id,
    GradeLevelId,
    TermId,
    FeeType,
    AmountCents,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Invoices {
    #[sea_orm(iden = "invoices")]
    Table,
    Id,
    InvoiceNumber,
    StudentId,
    TermId,
    Status,
    IssueDate,
    DueDate,
    TotalCents,
    Notes,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InvoiceLines {
    #[sea_orm(iden = "invoice_lines")]
    Table,
    Id,
    InvoiceId,
    Description,
    AmountCents,
    FeeStructureId,
}

#[derive(DeriveIden)]
enum Payments {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
    InvoiceId,
    AmountCents,
    Method,
    Reference,
    TransactionId,
    ReceiptNumber,
    PaidOn,
    ReceivedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Threads {
    #[sea_orm(iden = "threads")]
    Table,
    Id,
    Title,
    Kind,
    CreatedBy,
    LastMessageAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ThreadParticipants {
    #[sea_orm(iden = "thread_participants")]
    Table,
    Id,
    ThreadId,
    UserId,
    JoinedAt,
    LastReadAt,
    LastReadMessageId,
}

#[derive(DeriveIden)]
enum Messages {
    #[sea_orm(iden = "messages")]
    Table,
    Id,
    ThreadId,
    SenderId,
    Content,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BlogPosts {
    #[sea_orm(iden = "blog_posts")]
    Table,
    Id,
    Title,
    Slug,
    Content,
    Excerpt,
    Category,
    Status,
    AuthorId,
    ViewCount,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InventoryItems {
    #[sea_orm(iden = "inventory_items")]
    Table,
    Id,
    ItemCode,
    Name,
    Category,
    Description,
    UnitPriceCents,
    CurrentStock,
    MinimumStock,
    Location,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InventoryTransactions {
    #[sea_orm(iden = "inventory_transactions")]
    Table,
    Id,
    ItemId,
    Kind,
    Quantity,
    StockAfter,
    Reference,
    Notes,
    ProcessedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Employees {
    #[sea_orm(iden = "employees")]
    Table,
    Id,
    EmployeeNumber,
    UserId,
    FirstName,
    LastName,
    Department,
    Position,
    SalaryCents,
    HireDate,
    Status,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LeaveRequests {
    #[sea_orm(iden = "leave_requests")]
    Table,
    Id,
    EmployeeId,
    StartDate,
    EndDate,
    Reason,
    Status,
    DecidedBy,
    DecidedAt,
    CreatedAt,
}
