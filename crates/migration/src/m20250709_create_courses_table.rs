use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::CourseNumber)
                            .string_len(45)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Dept).string_len(25).not_null())
                    .col(ColumnDef::new(Courses::Level).integer())
                    .col(ColumnDef::new(Courses::Hours).integer())
                    .col(ColumnDef::new(Courses::Name).string_len(45).not_null())
                    .col(ColumnDef::new(Courses::Description).string_len(255))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await
    }
}

// Column names keep the casing of the existing `courses` table
#[derive(Iden)]
enum Courses {
    Table,
    #[iden = "Course_Number"]
    CourseNumber,
    #[iden = "Dept"]
    Dept,
    #[iden = "Level"]
    Level,
    #[iden = "Hours"]
    Hours,
    #[iden = "Name"]
    Name,
    #[iden = "Description"]
    Description,
}
