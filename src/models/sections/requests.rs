use serde::Deserialize;

use super::entities::Instructor;
use crate::errors::{AllocatorError, Result};
use crate::utils::validate::{validate_email, validate_netid, validate_semester};

// 创建课程分组请求（由外部导入层提供）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSectionRequest {
    pub course_id: String,
    pub section_number: String,
    pub instructor: Instructor,
    pub required_graders: u32,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub requested_netids: Vec<String>,
    pub semester: String,
}

impl CreateSectionRequest {
    pub fn validate(&self) -> Result<()> {
        if self.course_id.trim().is_empty() || self.section_number.trim().is_empty() {
            return Err(AllocatorError::validation(
                "Course id and section number are required",
            ));
        }
        validate_semester(&self.semester).map_err(AllocatorError::validation)?;
        // 助教人数必须为正整数
        if self.required_graders == 0 {
            return Err(AllocatorError::validation(format!(
                "Section {}.{} must require at least one grader",
                self.course_id, self.section_number
            )));
        }
        if !self.instructor.email.is_empty() {
            validate_email(&self.instructor.email).map_err(AllocatorError::validation)?;
        }
        for netid in &self.requested_netids {
            validate_netid(netid).map_err(AllocatorError::validation)?;
        }
        Ok(())
    }
}

// 课程分组查询条件（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct SectionQuery {
    pub semester: Option<String>,
    pub course_id: Option<String>,
}

impl SectionQuery {
    pub fn semester(semester: &str) -> Self {
        Self {
            semester: Some(semester.to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(required_graders: u32) -> CreateSectionRequest {
        CreateSectionRequest {
            course_id: "CS1337".to_string(),
            section_number: "001".to_string(),
            instructor: Instructor {
                name: "Jane Doe".to_string(),
                email: "jane.doe@example.edu".to_string(),
            },
            required_graders,
            keywords: vec!["java".to_string()],
            requested_netids: vec!["abc123".to_string()],
            semester: "Spring 2025".to_string(),
        }
    }

    #[test]
    fn test_valid_section() {
        assert!(request(2).validate().is_ok());
    }

    #[test]
    fn test_zero_graders_rejected() {
        let err = request(0).validate().unwrap_err();
        assert_eq!(err.code(), "E006");
        assert!(err.message().contains("CS1337.001"));
    }

    #[test]
    fn test_bad_instructor_email_rejected() {
        let mut req = request(1);
        req.instructor.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_missing_semester_rejected() {
        let mut req = request(1);
        req.semester = "  ".to_string();
        assert!(req.validate().is_err());
    }
}
