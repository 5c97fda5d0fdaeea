//! 候选人实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "candidates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub netid: String,
    pub name: String,
    pub gpa: f64,
    pub major: String,
    pub seniority: String,
    pub has_experience: bool,
    // JSON 数组
    #[sea_orm(column_type = "Text")]
    pub keywords: String,
    pub fully_qualified: bool,
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
    pub fn into_candidate(self) -> crate::models::candidates::entities::Candidate {
        use crate::models::candidates::entities::{Candidate, Seniority};
        use crate::utils::keywords::list_from_json;
        use crate::utils::normalize_keywords;
        use chrono::{DateTime, Utc};

        Candidate {
            id: self.id,
            netid: self.netid,
            name: self.name,
            gpa: self.gpa,
            major: self.major,
            seniority: Seniority::parse_lenient(&self.seniority),
            has_experience: self.has_experience,
            keywords: normalize_keywords(list_from_json(
                &self.keywords,
                &format!("candidate {} keywords", self.id),
            )),
            fully_qualified: self.fully_qualified,
            semester: self.semester,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
