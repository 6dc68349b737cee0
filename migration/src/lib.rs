pub use sea_orm_migration::prelude::*;

mod m20251020_090000_create_table_account;
mod m20251020_090100_create_table_tenant;
mod m20251020_090200_create_table_teacher;
mod m20251020_090300_create_table_student;
mod m20251020_090400_create_table_id_sequence;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_090000_create_table_account::Migration),
            Box::new(m20251020_090100_create_table_tenant::Migration),
            Box::new(m20251020_090200_create_table_teacher::Migration),
            Box::new(m20251020_090300_create_table_student::Migration),
            Box::new(m20251020_090400_create_table_id_sequence::Migration),
        ]
    }
}
