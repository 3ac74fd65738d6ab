//! 访问控制
//!
//! 所有读写在进入存储层之前都经过 [`authorize`]。规则只依赖调用者与目标记录之间的
//! 归属关系（班级→教师、学生→家长、作业→作者、联系人→教师），不查询数据库；
//! 服务层负责先把目标记录及其所属班级加载出来。

use crate::models::{
    assignments::entities::SubjectAssignment,
    classes::entities::SchoolClass,
    contacts::entities::StudentContact,
    students::entities::Student,
    users::entities::{User, UserRole},
};

pub const TEACHER_LANDING: &str = "/api/v1/dashboard/teacher";
pub const PARENT_LANDING: &str = "/api/v1/dashboard/parent";
pub const DEFAULT_LANDING: &str = "/api/v1/dashboard";

pub const RECORD_RESULT_DENIED: &str = "You can only add results for students in your classes.";
pub const ACCESS_DENIED: &str = "Access denied.";

/// 角色对应的落地页
pub fn landing_page(role: UserRole) -> &'static str {
    match role {
        UserRole::Teacher => TEACHER_LANDING,
        UserRole::Parent => PARENT_LANDING,
        UserRole::Admin => DEFAULT_LANDING,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    View,
    Modify,
    RecordResult,
    Submit,
    Grade,
}

/// 被访问的记录，连同判断归属所需的上级记录
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Class(&'a SchoolClass),
    Student {
        student: &'a Student,
        class: &'a SchoolClass,
    },
    /// 评估结果通过其学生判断归属
    Result {
        student: &'a Student,
        class: &'a SchoolClass,
    },
    Assignment(&'a SubjectAssignment),
    Submission {
        assignment: &'a SubjectAssignment,
        student: &'a Student,
    },
    Contact(&'a StudentContact),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    pub message: String,
    pub redirect_to: &'static str,
}

impl Denial {
    pub fn new(actor_role: UserRole, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect_to: landing_page(actor_role),
        }
    }
}

impl std::fmt::Display for Denial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (redirect: {})", self.message, self.redirect_to)
    }
}

pub fn authorize(actor: &User, target: &Target<'_>, operation: Operation) -> Result<(), Denial> {
    let allowed = match actor.role {
        UserRole::Admin => admin_allows(target, operation),
        UserRole::Teacher => teacher_allows(actor.id, target, operation),
        UserRole::Parent => parent_allows(actor.id, target, operation),
    };

    if allowed {
        return Ok(());
    }

    let message = match operation {
        Operation::RecordResult => RECORD_RESULT_DENIED,
        _ => ACCESS_DENIED,
    };
    Err(Denial::new(actor.role, message))
}

/// 只允许特定角色进入的区域（仪表盘等）
pub fn require_area(actor: &User, role: UserRole) -> Result<(), Denial> {
    if actor.role == role {
        return Ok(());
    }
    let message = match role {
        UserRole::Teacher => "Access denied. Teacher area only.",
        UserRole::Parent => "Access denied. Parent area only.",
        UserRole::Admin => "Access denied. Administrator area only.",
    };
    Err(Denial::new(actor.role, message))
}

fn admin_allows(target: &Target<'_>, operation: Operation) -> bool {
    match operation {
        Operation::View => true,
        Operation::Modify => matches!(target, Target::Class(_)),
        Operation::RecordResult | Operation::Submit | Operation::Grade => false,
    }
}

fn teacher_allows(actor_id: i64, target: &Target<'_>, operation: Operation) -> bool {
    match (target, operation) {
        (_, Operation::Submit) => false,
        (Target::Class(class), Operation::View | Operation::Modify) => class.teacher_id == actor_id,
        (
            Target::Student { class, .. },
            Operation::View | Operation::Modify | Operation::RecordResult,
        ) => class.teacher_id == actor_id,
        (Target::Result { class, .. }, Operation::View | Operation::Modify) => {
            class.teacher_id == actor_id
        }
        (Target::Assignment(assignment), Operation::View) => assignment.is_visible_to(actor_id),
        (Target::Assignment(assignment), Operation::Modify) => assignment.created_by == actor_id,
        (Target::Submission { assignment, .. }, Operation::View | Operation::Grade) => {
            assignment.created_by == actor_id
        }
        (Target::Contact(contact), Operation::View | Operation::Modify) => {
            contact.teacher_id == actor_id
        }
        _ => false,
    }
}

fn parent_allows(actor_id: i64, target: &Target<'_>, operation: Operation) -> bool {
    let is_parent_of = |student: &Student| student.parent_id == Some(actor_id);

    match (target, operation) {
        (Target::Student { student, .. } | Target::Result { student, .. }, Operation::View) => {
            is_parent_of(student)
        }
        (Target::Assignment(assignment), Operation::View) => assignment.is_published,
        (Target::Submission { student, .. }, Operation::View | Operation::Submit) => {
            is_parent_of(student)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::AssignmentType;
    use crate::models::contacts::entities::ClassLevel;
    use chrono::{NaiveDate, Utc};

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{id}"),
            role,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            phone_number: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn class(teacher_id: i64) -> SchoolClass {
        SchoolClass {
            id: 1,
            name: "Grade 5A".to_string(),
            teacher_id,
            academic_year_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn student(parent_id: Option<i64>) -> Student {
        Student {
            id: 10,
            student_id: "S001".to_string(),
            first_name: "Amani".to_string(),
            last_name: "Otieno".to_string(),
            class_id: 1,
            date_of_birth: NaiveDate::from_ymd_opt(2014, 3, 2).unwrap(),
            parent_id,
            created_at: Utc::now(),
        }
    }

    fn assignment(created_by: i64, is_published: bool) -> SubjectAssignment {
        SubjectAssignment {
            id: 5,
            title: "Fractions".to_string(),
            description: None,
            subject_id: 1,
            assignment_type: AssignmentType::Homework,
            due_date: Utc::now(),
            max_points: 10.0,
            attachment: None,
            created_by,
            academic_year_id: 1,
            is_published,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn contact(teacher_id: i64) -> StudentContact {
        StudentContact {
            id: 3,
            teacher_id,
            class_level: ClassLevel::Grade2,
            child_first_name: "Zuri".to_string(),
            child_last_name: "Njeri".to_string(),
            parent_name: "Grace".to_string(),
            parent_phone: "+254700000000".to_string(),
            parent_email: None,
            relationship: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    const TEACHER: i64 = 1;
    const OTHER_TEACHER: i64 = 2;
    const PARENT: i64 = 3;
    const OTHER_PARENT: i64 = 4;
    const ADMIN: i64 = 5;

    #[test]
    fn test_teacher_records_results_only_for_own_class() {
        let c = class(TEACHER);
        let s = student(Some(PARENT));
        let target = Target::Student {
            student: &s,
            class: &c,
        };

        assert!(authorize(&user(TEACHER, UserRole::Teacher), &target, Operation::RecordResult).is_ok());

        let denial =
            authorize(&user(OTHER_TEACHER, UserRole::Teacher), &target, Operation::RecordResult)
                .unwrap_err();
        assert_eq!(denial.message, RECORD_RESULT_DENIED);
        assert_eq!(denial.redirect_to, TEACHER_LANDING);
    }

    #[test]
    fn test_parent_sees_only_own_child() {
        let c = class(TEACHER);
        let mine = student(Some(PARENT));
        let theirs = student(Some(OTHER_PARENT));
        let parent = user(PARENT, UserRole::Parent);

        let ok = Target::Result {
            student: &mine,
            class: &c,
        };
        assert!(authorize(&parent, &ok, Operation::View).is_ok());

        let other = Target::Student {
            student: &theirs,
            class: &c,
        };
        let denial = authorize(&parent, &other, Operation::View).unwrap_err();
        assert_eq!(denial.message, ACCESS_DENIED);
        assert_eq!(denial.redirect_to, PARENT_LANDING);

        // 家长不能修改
        assert!(authorize(&parent, &ok, Operation::Modify).is_err());
    }

    #[test]
    fn test_unlinked_student_is_not_any_parents() {
        let c = class(TEACHER);
        let orphan = student(None);
        let target = Target::Student {
            student: &orphan,
            class: &c,
        };
        assert!(authorize(&user(PARENT, UserRole::Parent), &target, Operation::View).is_err());
    }

    #[test]
    fn test_admin_views_all_but_never_records_or_grades() {
        let admin = user(ADMIN, UserRole::Admin);
        let c = class(TEACHER);
        let s = student(Some(PARENT));
        let a = assignment(TEACHER, false);
        let student_target = Target::Student {
            student: &s,
            class: &c,
        };
        let submission = Target::Submission {
            assignment: &a,
            student: &s,
        };

        assert!(authorize(&admin, &student_target, Operation::View).is_ok());
        assert!(authorize(&admin, &Target::Assignment(&a), Operation::View).is_ok());
        assert!(authorize(&admin, &Target::Class(&c), Operation::Modify).is_ok());

        assert!(authorize(&admin, &student_target, Operation::RecordResult).is_err());
        assert!(authorize(&admin, &submission, Operation::Grade).is_err());
        assert!(authorize(&admin, &submission, Operation::Submit).is_err());
        let denial = authorize(&admin, &Target::Assignment(&a), Operation::Modify).unwrap_err();
        assert_eq!(denial.redirect_to, DEFAULT_LANDING);
    }

    #[test]
    fn test_assignment_visibility_and_authorship() {
        let draft = assignment(TEACHER, false);
        let published = assignment(TEACHER, true);
        let colleague = user(OTHER_TEACHER, UserRole::Teacher);
        let author = user(TEACHER, UserRole::Teacher);
        let parent = user(PARENT, UserRole::Parent);

        assert!(authorize(&author, &Target::Assignment(&draft), Operation::View).is_ok());
        assert!(authorize(&colleague, &Target::Assignment(&draft), Operation::View).is_err());
        assert!(authorize(&parent, &Target::Assignment(&draft), Operation::View).is_err());

        assert!(authorize(&colleague, &Target::Assignment(&published), Operation::View).is_ok());
        assert!(authorize(&parent, &Target::Assignment(&published), Operation::View).is_ok());
        assert!(authorize(&colleague, &Target::Assignment(&published), Operation::Modify).is_err());
    }

    #[test]
    fn test_submit_and_grade() {
        let a = assignment(TEACHER, true);
        let s = student(Some(PARENT));
        let target = Target::Submission {
            assignment: &a,
            student: &s,
        };

        assert!(authorize(&user(PARENT, UserRole::Parent), &target, Operation::Submit).is_ok());
        assert!(authorize(&user(OTHER_PARENT, UserRole::Parent), &target, Operation::Submit).is_err());
        assert!(authorize(&user(TEACHER, UserRole::Teacher), &target, Operation::Submit).is_err());

        assert!(authorize(&user(TEACHER, UserRole::Teacher), &target, Operation::Grade).is_ok());
        assert!(authorize(&user(OTHER_TEACHER, UserRole::Teacher), &target, Operation::Grade).is_err());
        assert!(authorize(&user(PARENT, UserRole::Parent), &target, Operation::Grade).is_err());
    }

    #[test]
    fn test_contacts_are_private() {
        let c = contact(TEACHER);
        assert!(authorize(&user(TEACHER, UserRole::Teacher), &Target::Contact(&c), Operation::Modify).is_ok());
        assert!(
            authorize(&user(OTHER_TEACHER, UserRole::Teacher), &Target::Contact(&c), Operation::View)
                .is_err()
        );
        assert!(authorize(&user(PARENT, UserRole::Parent), &Target::Contact(&c), Operation::View).is_err());
    }

    #[test]
    fn test_area_checks() {
        let parent = user(PARENT, UserRole::Parent);
        let denial = require_area(&parent, UserRole::Teacher).unwrap_err();
        assert_eq!(denial.message, "Access denied. Teacher area only.");
        assert_eq!(denial.redirect_to, PARENT_LANDING);
        assert!(require_area(&parent, UserRole::Parent).is_ok());
    }
}
