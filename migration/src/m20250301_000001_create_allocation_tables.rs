use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建候选人表
        manager
            .create_table(
                Table::create()
                    .table(Candidates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Candidates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // (netid, semester) 不设唯一约束，由导入方保证
                    .col(ColumnDef::new(Candidates::Netid).string().not_null())
                    .col(ColumnDef::new(Candidates::Name).string().not_null())
                    .col(ColumnDef::new(Candidates::Gpa).double().not_null())
                    .col(ColumnDef::new(Candidates::Major).string().not_null())
                    .col(ColumnDef::new(Candidates::Seniority).string().not_null())
                    .col(
                        ColumnDef::new(Candidates::HasExperience)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Candidates::Keywords).text().not_null())
                    .col(
                        ColumnDef::new(Candidates::FullyQualified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Candidates::Semester).string().not_null())
                    .col(
                        ColumnDef::new(Candidates::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Candidates::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程分组表
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::CourseId).string().not_null())
                    .col(ColumnDef::new(Sections::SectionNumber).string().not_null())
                    .col(ColumnDef::new(Sections::InstructorName).string().not_null())
                    .col(ColumnDef::new(Sections::InstructorEmail).string().not_null())
                    .col(
                        ColumnDef::new(Sections::RequiredGraders)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Sections::Keywords).text().not_null())
                    .col(ColumnDef::new(Sections::RequestedNetids).text().not_null())
                    .col(ColumnDef::new(Sections::Semester).string().not_null())
                    .col(ColumnDef::new(Sections::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Sections::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建分配槽位表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::SectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Semester).string().not_null())
                    .col(
                        ColumnDef::new(Assignments::CandidateId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Assignments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Assignments::Score)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Assignments::ManuallyAssigned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::CandidateId)
                            .to(Candidates::Table, Candidates::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 候选人表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_candidates_semester")
                    .table(Candidates::Table)
                    .col(Candidates::Semester)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_candidates_netid")
                    .table(Candidates::Table)
                    .col(Candidates::Netid)
                    .to_owned(),
            )
            .await?;

        // 课程分组表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sections_semester")
                    .table(Sections::Table)
                    .col(Sections::Semester)
                    .to_owned(),
            )
            .await?;

        // 分配槽位表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_section_semester")
                    .table(Assignments::Table)
                    .col(Assignments::SectionId)
                    .col(Assignments::Semester)
                    .to_owned(),
            )
            .await?;

        // 同一学期内一个候选人最多占用一个槽位（空槽位 candidate_id 为 NULL，不受约束）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_candidate_semester")
                    .table(Assignments::Table)
                    .col(Assignments::CandidateId)
                    .col(Assignments::Semester)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Candidates::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Candidates {
    #[sea_orm(iden = "candidates")]
    Table,
    Id,
    Netid,
    Name,
    Gpa,
    Major,
    Seniority,
    HasExperience,
    Keywords,
    FullyQualified,
    Semester,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Sections {
    #[sea_orm(iden = "sections")]
    Table,
    Id,
    CourseId,
    SectionNumber,
    InstructorName,
    InstructorEmail,
    RequiredGraders,
    Keywords,
    RequestedNetids,
    Semester,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    SectionId,
    Semester,
    CandidateId,
    Status,
    Score,
    ManuallyAssigned,
    CreatedAt,
    UpdatedAt,
}
