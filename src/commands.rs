use crate::cli::{AddUserArgs, TokenArgs};
use crate::config::Config;
use crate::database::{Database, DatabaseLock};
use crate::http;
use anyhow::{Context, Result};
use log::info;
use std::fs::create_dir_all;

/// Open the configured database, creating its parent directory if necessary
fn open_database(config: &Config) -> Result<Database> {
    if let Some(parent) = config.database.parent() {
        create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Database::open(&config.database)
}

/// Implementation for the `serve` CLI command
pub async fn serve(config: Config) -> Result<()> {
    let keys = config.token_keys()?;
    let db = open_database(&config)?;
    info!("Opened database {}", config.database.display());

    http::start_server(DatabaseLock::new(db), keys, &config.host, config.port)
        .await
        .context("Failed to run HTTP server")
}

/// Implementation for the `add-user` CLI command
pub fn add_user(config: Config, args: AddUserArgs) -> Result<()> {
    let AddUserArgs {
        username,
        first_name,
        last_name,
        phone,
    } = args;

    let mut db = open_database(&config)?;
    let user = db.create_user(&username, &first_name, &last_name, &phone)?;
    info!("Added user {}", user.username);
    Ok(())
}

/// Implementation for the `token` CLI command
pub fn token(config: Config, args: TokenArgs) -> Result<()> {
    let keys = config.token_keys()?;
    let mut db = open_database(&config)?;
    let user = db.get_user(&args.username)?;
    println!("{}", keys.issue(&user.username)?);
    Ok(())
}
