pub use sea_orm_migration::prelude::*;

mod m20250709_create_courses_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250709_create_courses_table::Migration)]
    }
}
