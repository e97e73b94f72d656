pub use sea_orm_migration::prelude::*;

mod m20261019_000001_create_tenancy_tables;
mod m20261019_000002_create_project_tables;
mod m20261019_000003_create_catalog_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_tenancy_tables::Migration),
            Box::new(m20261019_000002_create_project_tables::Migration),
            Box::new(m20261019_000003_create_catalog_tables::Migration),
        ]
    }
}
