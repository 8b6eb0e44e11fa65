//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, MigrationStep};

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::open(&config.database_url).await?;

    let step = match args.action {
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                println!("{}: {}", name, if applied { "applied" } else { "pending" });
            }
            return Ok(());
        }
        MigrateAction::Up => MigrationStep::Up,
        MigrateAction::Down => MigrationStep::Down,
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables before reapplying migrations");
            MigrationStep::Fresh
        }
    };

    db.migrate(step).await?;
    tracing::info!(?step, "Migration finished");
    Ok(())
}
