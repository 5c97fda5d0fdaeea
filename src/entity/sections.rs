//! 课程分组实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: String,
    pub section_number: String,
    pub instructor_name: String,
    pub instructor_email: String,
    pub required_graders: i32,
    // JSON 数组
    #[sea_orm(column_type = "Text")]
    pub keywords: String,
    // JSON 数组，保留推荐顺序
    #[sea_orm(column_type = "Text")]
    pub requested_netids: String,
    pub semester: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_section(self) -> crate::models::sections::entities::Section {
        use crate::models::sections::entities::{Instructor, Section};
        use crate::utils::keywords::list_from_json;
        use crate::utils::normalize_keywords;
        use chrono::{DateTime, Utc};

        // 推荐列表去除空白项，保持原有顺序
        let requested_netids = list_from_json(
            &self.requested_netids,
            &format!("section {} requested_netids", self.id),
        )
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();

        Section {
            id: self.id,
            course_id: self.course_id,
            section_number: self.section_number,
            instructor: Instructor {
                name: self.instructor_name,
                email: self.instructor_email,
            },
            required_graders: self.required_graders.max(0) as u32,
            keywords: normalize_keywords(list_from_json(
                &self.keywords,
                &format!("section {} keywords", self.id),
            )),
            requested_netids,
            semester: self.semester,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
