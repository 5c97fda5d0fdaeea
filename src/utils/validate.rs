use once_cell::sync::Lazy;
use regex::Regex;

static NETID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("Invalid netid regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_netid(netid: &str) -> Result<(), &'static str> {
    // netid 长度校验：1 <= x <= 32
    if netid.is_empty() || netid.len() > 32 {
        return Err("Netid length must be between 1 and 32 characters");
    }
    // netid 格式校验：只能包含字母、数字、点、下划线或连字符
    if !NETID_RE.is_match(netid) {
        return Err("Netid must contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 学期名只要求非空，季节无法识别的学期仍然合法（只是没有上一学期）
pub fn validate_semester(semester: &str) -> Result<(), &'static str> {
    if semester.trim().is_empty() {
        return Err("Semester is required");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_netids() {
        assert!(validate_netid("abc123456").is_ok());
        assert!(validate_netid("111").is_ok());
        assert!(validate_netid("j.doe-2").is_ok());
    }

    #[test]
    fn test_invalid_netids() {
        assert!(validate_netid("").is_err());
        assert!(validate_netid("has space").is_err());
        assert!(validate_netid(&"x".repeat(33)).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("prof@utdallas.edu").is_ok());
        assert!(validate_email("prof@utdallas").is_err());
    }

    #[test]
    fn test_semester_required() {
        assert!(validate_semester("Spring 2025").is_ok());
        assert!(validate_semester("Summer 2025").is_ok());
        assert_eq!(validate_semester("   "), Err("Semester is required"));
    }
}
