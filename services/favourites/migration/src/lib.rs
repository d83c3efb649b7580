use sea_orm_migration::prelude::*;

mod m20250301_000001_create_favourites;
mod m20250301_000002_add_favourites_product_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_favourites::Migration),
            Box::new(m20250301_000002_add_favourites_product_index::Migration),
        ]
    }
}
