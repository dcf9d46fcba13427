use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Applications
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Applications::FirstName).string().not_null())
                    .col(ColumnDef::new(Applications::LastName).string().not_null())
                    .col(ColumnDef::new(Applications::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Applications::Gender).string().not_null())
                    .col(
                        ColumnDef::new(Applications::GradeLevelId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Applications::GuardianName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Applications::GuardianPhone)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::GuardianEmail).string().null())
                    .col(ColumnDef::new(Applications::Address).text().null())
                    .col(ColumnDef::new(Applications::PreviousSchool).string().null())
                    .col(ColumnDef::new(Applications::Notes).text().null())
                    .col(ColumnDef::new(Applications::Status).string().not_null())
                    .col(
                        ColumnDef::new(Applications::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::ReviewedBy).big_integer().null())
                    .col(ColumnDef::new(Applications::ReviewedAt).big_integer().null())
                    .col(
                        ColumnDef::new(Applications::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Applications::Table, Applications::GradeLevelId)
                            .to(GradeLevels::Table, GradeLevels::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Applications::Table, Applications::ReviewedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_status")
                    .table(Applications::Table)
                    .col(Applications::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Enrollments
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::ApplicationId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::StudentId)
                            .big_integer()
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::AdmissionNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::EnrollmentDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::ApplicationId)
                            .to(Applications::Table, Applications::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Enrollments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Applications::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Applications {
    #[sea_orm(iden = "applications")]
    Table,
    Id,
    FirstName,
    LastName,
    DateOfBirth,
    Gender,
    GradeLevelId,
    GuardianName,
    GuardianPhone,
    GuardianEmail,
    Address,
    PreviousSchool,
    Notes,
    Status,
    SubmittedAt,
    ReviewedBy,
    ReviewedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    #[sea_orm(iden = "enrollments")]
    Table,
    Id,
    ApplicationId,
    StudentId,
    AdmissionNumber,
    EnrollmentDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GradeLevels {
    #[sea_orm(iden = "grade_levels")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum StudentProfiles {
    #[sea_orm(iden = "student_profiles")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}
