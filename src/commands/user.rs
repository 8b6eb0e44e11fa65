//! User command - Seeds user records for local development.
//!
//! Signup is handled elsewhere; this only exists so the dashboard can be
//! exercised against a fresh database.

use crate::cli::args::{UserAction, UserArgs};
use crate::config::{Config, MSG_NAME_REQUIRED};
use crate::domain::Password;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, UserRepository, UserStore};
use crate::services::{AuthService, Authenticator};

/// Execute the user command
pub async fn execute(args: UserArgs, config: Config) -> AppResult<()> {
    match args.action {
        UserAction::Create {
            email,
            name,
            password,
        } => create(config, email, name, password).await,
    }
}

async fn create(config: Config, email: String, name: String, password: String) -> AppResult<()> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation(MSG_NAME_REQUIRED));
    }
    if password.is_empty() {
        return Err(AppError::validation("Password is required"));
    }

    let db = Database::connect(&config.database_url).await?;
    let repo = UserStore::new(db.get_connection());

    let hash = Password::new(&password, &config.hashing)?;
    let user = repo.create(email, hash.into_string(), name).await?;
    tracing::info!(user_id = %user.id, "User created");

    let token = Authenticator::new(config).issue_token(&user)?;
    println!("id: {}", user.id);
    println!("token: {}", token.access_token);

    Ok(())
}
