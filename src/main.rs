#[macro_use]
extern crate diesel;

mod auth;
mod cli;
mod commands;
mod config;
mod database;
mod http;
mod message;
mod message_access;
mod principal;
mod schema;
mod store;
mod sync_ext;

use crate::cli::{Cli, Command};
use crate::config::{Config, Overrides};
use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    simple_logger::SimpleLogger::new()
        .with_module_level("actix_server", LevelFilter::Off)
        .with_module_level("mio", LevelFilter::Off)
        .with_level(if cli.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Debug
        })
        .init()?;

    let (host, port) = match &cli.command {
        Command::Serve(args) => (args.host.clone(), args.port),
        Command::AddUser(_) | Command::Token(_) => (None, None),
    };
    let config = Config::load(
        cli.config.as_deref(),
        Overrides {
            host,
            port,
            database: cli.database,
            secret_key: cli.secret_key,
        },
    )?;

    match cli.command {
        Command::Serve(_) => commands::serve(config).await,
        Command::AddUser(args) => commands::add_user(config, args),
        Command::Token(args) => commands::token(config, args),
    }
}
