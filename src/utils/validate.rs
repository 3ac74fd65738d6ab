use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 允许国际区号、空格与连字符
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 -]{6,18}[0-9]$").expect("Invalid phone regex"));

static STUDENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9/-]+$").expect("Invalid student id regex"));

const MAX_NAME_LEN: usize = 100;

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone.trim()) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

/// 姓名、标题等必填文本
pub fn validate_required(value: &str, field: &'static str) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} is required"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(format!("{field} must be at most {MAX_NAME_LEN} characters"));
    }
    Ok(())
}

pub fn validate_student_id(student_id: &str) -> Result<(), &'static str> {
    if student_id.is_empty() || student_id.len() > 20 {
        return Err("Student ID length must be between 1 and 20 characters");
    }
    if !STUDENT_ID_RE.is_match(student_id) {
        return Err("Student ID must contain only letters, numbers, '/' or '-'");
    }
    Ok(())
}

pub fn validate_max_points(max_points: f64) -> Result<(), &'static str> {
    if !max_points.is_finite() || max_points <= 0.0 {
        return Err("Max points must be a positive number");
    }
    Ok(())
}

/// 分数必须落在 [0, max_points]
pub fn validate_grade(grade: f64, max_points: f64) -> Result<(), String> {
    if !grade.is_finite() || grade < 0.0 || grade > max_points {
        return Err(format!("Grade must be between 0 and {max_points}"));
    }
    Ok(())
}

/// 提交至少包含文件或文本之一
pub fn validate_submission_content(
    file_path: Option<&str>,
    text: Option<&str>,
) -> Result<(), &'static str> {
    let has_file = file_path.is_some_and(|p| !p.trim().is_empty());
    let has_text = text.is_some_and(|t| !t.trim().is_empty());
    if !has_file && !has_text {
        return Err("Please provide either a file or text submission");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username() {
        assert!(validate_username("mrs.otieno").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_email_and_phone() {
        assert!(validate_email("parent@example.co.ke").is_ok());
        assert!(validate_email("parent@").is_err());
        assert!(validate_phone("+254 712 345 678").is_ok());
        assert!(validate_phone("0712-345678").is_ok());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required("Amani", "First name").is_ok());
        assert_eq!(
            validate_required("   ", "First name").unwrap_err(),
            "First name is required"
        );
        assert!(validate_required(&"x".repeat(101), "Title").is_err());
    }

    #[test]
    fn test_student_id() {
        assert!(validate_student_id("ADM-2024/017").is_ok());
        assert!(validate_student_id("").is_err());
        assert!(validate_student_id("S 01").is_err());
    }

    #[test]
    fn test_grade_bounds() {
        assert!(validate_grade(0.0, 20.0).is_ok());
        assert!(validate_grade(20.0, 20.0).is_ok());
        assert!(validate_grade(20.5, 20.0).is_err());
        assert!(validate_grade(-1.0, 20.0).is_err());
        assert!(validate_grade(f64::NAN, 20.0).is_err());
        assert!(validate_max_points(0.0).is_err());
    }

    #[test]
    fn test_submission_needs_file_or_text() {
        assert!(validate_submission_content(Some("uploads/essay.pdf"), None).is_ok());
        assert!(validate_submission_content(None, Some("My answer")).is_ok());
        assert!(validate_submission_content(Some(" "), Some("")).is_err());
        assert!(validate_submission_content(None, None).is_err());
    }
}
