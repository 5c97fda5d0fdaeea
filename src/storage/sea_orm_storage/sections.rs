//! 课程分组存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::Sections;
use crate::entity::sections::{ActiveModel, Column};
use crate::errors::{AllocatorError, Result};
use crate::models::sections::{
    entities::Section,
    requests::{CreateSectionRequest, SectionQuery},
};
use crate::utils::keywords::keywords_to_json;
use crate::utils::normalize_keywords;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建课程分组
    pub async fn create_section_impl(&self, req: CreateSectionRequest) -> Result<Section> {
        req.validate()?;

        let now = chrono::Utc::now().timestamp();
        let keywords = keywords_to_json(&normalize_keywords(&req.keywords))?;
        let requested: Vec<String> = req
            .requested_netids
            .iter()
            .map(|id| id.trim().to_string())
            .collect();
        let requested = serde_json::to_string(&requested)?;

        let required_graders = i32::try_from(req.required_graders).map_err(|_| {
            AllocatorError::validation(format!(
                "Required grader count too large: {}",
                req.required_graders
            ))
        })?;

        let model = ActiveModel {
            course_id: Set(req.course_id.trim().to_string()),
            section_number: Set(req.section_number.trim().to_string()),
            instructor_name: Set(req.instructor.name),
            instructor_email: Set(req.instructor.email),
            required_graders: Set(required_graders),
            keywords: Set(keywords),
            requested_netids: Set(requested),
            semester: Set(req.semester.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("创建课程分组失败: {e}")))?;

        Ok(result.into_section())
    }

    /// 通过 ID 获取课程分组
    pub async fn get_section_by_id_impl(&self, id: i64) -> Result<Option<Section>> {
        let result = Sections::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("查询课程分组失败: {e}")))?;

        Ok(result.map(|m| m.into_section()))
    }

    /// 按条件列出课程分组
    pub async fn list_sections_impl(&self, query: SectionQuery) -> Result<Vec<Section>> {
        let mut select = Sections::find();

        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let sections = select
            .order_by_asc(Column::CourseId)
            .order_by_asc(Column::SectionNumber)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                AllocatorError::database_operation(format!("查询课程分组列表失败: {e}"))
            })?;

        Ok(sections.into_iter().map(|m| m.into_section()).collect())
    }

    /// 删除课程分组
    pub async fn delete_section_impl(&self, id: i64) -> Result<bool> {
        let result = Sections::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("删除课程分组失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 分组表中的全部学期
    pub async fn list_section_semesters_impl(&self) -> Result<Vec<String>> {
        let semesters: Vec<String> = Sections::find()
            .select_only()
            .column(Column::Semester)
            .distinct()
            .order_by_asc(Column::Semester)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("查询学期列表失败: {e}")))?;

        Ok(semesters)
    }
}
