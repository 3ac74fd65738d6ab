use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_tables::{AcademicYears, Students, Subjects, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 科目作业表 ====================
        manager
            .create_table(
                Table::create()
                    .table(SubjectAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubjectAssignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubjectAssignments::Title).string().not_null())
                    .col(ColumnDef::new(SubjectAssignments::Description).text().null())
                    .col(
                        ColumnDef::new(SubjectAssignments::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectAssignments::AssignmentType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectAssignments::DueDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectAssignments::MaxPoints)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectAssignments::Attachment)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubjectAssignments::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectAssignments::AcademicYearId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectAssignments::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubjectAssignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectAssignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubjectAssignments::Table, SubjectAssignments::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubjectAssignments::Table, SubjectAssignments::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                SubjectAssignments::Table,
                                SubjectAssignments::AcademicYearId,
                            )
                            .to(AcademicYears::Table, AcademicYears::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 作业提交表 ====================
        manager
            .create_table(
                Table::create()
                    .table(AssignmentSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentSubmissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::SubmittedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::FilePath)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::SubmissionText)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(AssignmentSubmissions::Grade).double().null())
                    .col(ColumnDef::new(AssignmentSubmissions::Feedback).text().null())
                    .col(
                        ColumnDef::new(AssignmentSubmissions::IsGraded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::GradedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::GradedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AssignmentSubmissions::Table,
                                AssignmentSubmissions::AssignmentId,
                            )
                            .to(SubjectAssignments::Table, SubjectAssignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AssignmentSubmissions::Table,
                                AssignmentSubmissions::StudentId,
                            )
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 学生联系人表 ====================
        manager
            .create_table(
                Table::create()
                    .table(StudentContacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentContacts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentContacts::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentContacts::ClassLevel)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentContacts::ChildFirstName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentContacts::ChildLastName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentContacts::ParentName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentContacts::ParentPhone)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentContacts::ParentEmail).string().null())
                    .col(
                        ColumnDef::new(StudentContacts::Relationship)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(StudentContacts::Notes).text().null())
                    .col(
                        ColumnDef::new(StudentContacts::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentContacts::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentContacts::Table, StudentContacts::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 索引 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subject_assignments_subject_id")
                    .table(SubjectAssignments::Table)
                    .col(SubjectAssignments::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subject_assignments_created_by")
                    .table(SubjectAssignments::Table)
                    .col(SubjectAssignments::CreatedBy)
                    .to_owned(),
            )
            .await?;

        // 每个学生对同一作业只允许一次提交
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignment_submissions_unique_student")
                    .table(AssignmentSubmissions::Table)
                    .col(AssignmentSubmissions::AssignmentId)
                    .col(AssignmentSubmissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_contacts_teacher_level")
                    .table(StudentContacts::Table)
                    .col(StudentContacts::TeacherId)
                    .col(StudentContacts::ClassLevel)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentContacts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssignmentSubmissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubjectAssignments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum SubjectAssignments {
    #[sea_orm(iden = "subject_assignments")]
    Table,
    Id,
    Title,
    Description,
    SubjectId,
    AssignmentType,
    DueDate,
    MaxPoints,
    Attachment,
    CreatedBy,
    AcademicYearId,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AssignmentSubmissions {
    #[sea_orm(iden = "assignment_submissions")]
    Table,
    Id,
    AssignmentId,
    StudentId,
    SubmittedBy,
    FilePath,
    SubmissionText,
    Grade,
    Feedback,
    IsGraded,
    GradedBy,
    GradedAt,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum StudentContacts {
    #[sea_orm(iden = "student_contacts")]
    Table,
    Id,
    TeacherId,
    ClassLevel,
    ChildFirstName,
    ChildLastName,
    ParentName,
    ParentPhone,
    ParentEmail,
    Relationship,
    Notes,
    CreatedAt,
    UpdatedAt,
}
