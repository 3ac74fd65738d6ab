use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().null())
                    .col(ColumnDef::new(Users::PhoneNumber).string().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学年表
        manager
            .create_table(
                Table::create()
                    .table(AcademicYears::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AcademicYears::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AcademicYears::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(AcademicYears::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 当前学年指针表：主键固定为 1，天然保证至多一行
        manager
            .create_table(
                Table::create()
                    .table(CurrentAcademicYear::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CurrentAcademicYear::Slot)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CurrentAcademicYear::AcademicYearId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CurrentAcademicYear::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                CurrentAcademicYear::Table,
                                CurrentAcademicYear::AcademicYearId,
                            )
                            .to(AcademicYears::Table, AcademicYears::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(
                        ColumnDef::new(Subjects::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建班级表
        manager
            .create_table(
                Table::create()
                    .table(SchoolClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolClasses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SchoolClasses::Name).string().not_null())
                    .col(
                        ColumnDef::new(SchoolClasses::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchoolClasses::AcademicYearId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchoolClasses::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchoolClasses::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SchoolClasses::Table, SchoolClasses::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SchoolClasses::Table, SchoolClasses::AcademicYearId)
                            .to(AcademicYears::Table, AcademicYears::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::StudentId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(ColumnDef::new(Students::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Students::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Students::ParentId).big_integer().null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::ClassId)
                            .to(SchoolClasses::Table, SchoolClasses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::ParentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估结果表
        manager
            .create_table(
                Table::create()
                    .table(AssessmentResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssessmentResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssessmentResults::Term).integer().not_null())
                    .col(
                        ColumnDef::new(AssessmentResults::AcademicYearId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::PerformanceLevel)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::TeacherComment)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::RecordedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssessmentResults::Table, AssessmentResults::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssessmentResults::Table, AssessmentResults::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssessmentResults::Table, AssessmentResults::AcademicYearId)
                            .to(AcademicYears::Table, AcademicYears::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评语模板表
        manager
            .create_table(
                Table::create()
                    .table(ReportComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReportComments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ReportComments::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReportComments::PerformanceLevel)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReportComments::TemplateComment)
                            .text()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReportComments::Table, ReportComments::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 同一学年内班级名唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_school_classes_name_year")
                    .table(SchoolClasses::Table)
                    .col(SchoolClasses::Name)
                    .col(SchoolClasses::AcademicYearId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_school_classes_teacher_id")
                    .table(SchoolClasses::Table)
                    .col(SchoolClasses::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_class_id")
                    .table(Students::Table)
                    .col(Students::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_parent_id")
                    .table(Students::Table)
                    .col(Students::ParentId)
                    .to_owned(),
            )
            .await?;

        // 每个学生每科每学期每学年只允许一条结果
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessment_results_unique_entry")
                    .table(AssessmentResults::Table)
                    .col(AssessmentResults::StudentId)
                    .col(AssessmentResults::SubjectId)
                    .col(AssessmentResults::Term)
                    .col(AssessmentResults::AcademicYearId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_report_comments_subject_level")
                    .table(ReportComments::Table)
                    .col(ReportComments::SubjectId)
                    .col(ReportComments::PerformanceLevel)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ReportComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssessmentResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SchoolClasses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CurrentAcademicYear::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AcademicYears::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Role,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum AcademicYears {
    #[sea_orm(iden = "academic_years")]
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CurrentAcademicYear {
    #[sea_orm(iden = "current_academic_year")]
    Table,
    Slot,
    AcademicYearId,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Name,
    Code,
}

#[derive(DeriveIden)]
enum SchoolClasses {
    #[sea_orm(iden = "school_classes")]
    Table,
    Id,
    Name,
    TeacherId,
    AcademicYearId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    StudentId,
    FirstName,
    LastName,
    ClassId,
    DateOfBirth,
    ParentId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AssessmentResults {
    #[sea_orm(iden = "assessment_results")]
    Table,
    Id,
    StudentId,
    SubjectId,
    Term,
    AcademicYearId,
    PerformanceLevel,
    TeacherComment,
    RecordedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ReportComments {
    #[sea_orm(iden = "report_comments")]
    Table,
    Id,
    SubjectId,
    PerformanceLevel,
    TemplateComment,
}
