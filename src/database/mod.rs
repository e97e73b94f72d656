pub mod connection;
pub mod entities;
pub mod migrations;
pub mod seed_data;
pub mod test_utils;

pub use connection::*;
pub use entities::*;

use clap::Subcommand;
use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrations::Migrator;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

/// Bring the schema up to date.
pub async fn setup_database(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;
    info!("Database migrations completed");
    Ok(())
}

pub async fn migrate_database(
    db: &DatabaseConnection,
    direction: MigrateDirection,
) -> Result<(), DbErr> {
    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(db, None).await?;
            Migrator::up(db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}
