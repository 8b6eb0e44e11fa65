//! PostgreSQL connection and schema control.

use sea_orm::{Database as SeaDatabase, DatabaseConnection, DbErr};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

pub mod migrations;

pub use migrations::Migrator;

/// Schema change applied by `Database::migrate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStep {
    /// Apply everything pending
    Up,
    /// Revert the most recent migration
    Down,
    /// Drop all tables and reapply from scratch
    Fresh,
}

/// Shared handle to the users database.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection and bring the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let db = Self::open(database_url).await?;
        db.migrate(MigrationStep::Up).await?;
        tracing::info!("Database ready");
        Ok(db)
    }

    /// Open a connection, leaving the schema untouched.
    pub async fn open(database_url: &str) -> Result<Self, DbErr> {
        Ok(Self {
            connection: SeaDatabase::connect(database_url).await?,
        })
    }

    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn migrate(&self, step: MigrationStep) -> Result<(), DbErr> {
        match step {
            MigrationStep::Up => Migrator::up(&self.connection, None).await,
            MigrationStep::Down => Migrator::down(&self.connection, Some(1)).await,
            MigrationStep::Fresh => Migrator::fresh(&self.connection).await,
        }
    }

    /// Every known migration paired with whether it has been applied.
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        Ok(Migrator::get_migration_with_status(&self.connection)
            .await?
            .iter()
            .map(|m| {
                let applied = matches!(m.status(), MigrationStatus::Applied);
                (m.name().to_string(), applied)
            })
            .collect())
    }

    /// Round trip used by the health endpoint.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection.ping().await
    }
}
