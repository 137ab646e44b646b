use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "Course_Number")]
    pub course_number: String,
    #[sea_orm(column_name = "Dept")]
    pub dept: String,
    #[sea_orm(column_name = "Level")]
    pub level: Option<i32>,
    #[sea_orm(column_name = "Hours")]
    pub hours: Option<i32>,
    #[sea_orm(column_name = "Name")]
    pub name: String,
    #[sea_orm(column_name = "Description")]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
