pub use sea_orm_migration::prelude::*;

mod m0000010_create_user;
mod m0000020_create_deviation;
mod m0000030_create_action;
mod m0000040_create_action_responsible;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m0000010_create_user::Migration),
            Box::new(m0000020_create_deviation::Migration),
            Box::new(m0000030_create_action::Migration),
            Box::new(m0000040_create_action_responsible::Migration),
        ]
    }
}
