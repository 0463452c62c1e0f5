//! Schema migrations for the Chronicle blog backend.

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_posts;
mod m20250301_000003_create_comments;
mod m20250301_000004_create_tags;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_posts::Migration),
            Box::new(m20250301_000003_create_comments::Migration),
            Box::new(m20250301_000004_create_tags::Migration),
        ]
    }
}
