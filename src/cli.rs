use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(about, version, author)]
pub struct Cli {
    /// Path to a TOML config file
    #[clap(short = 'c', long, env = "MESSAGELY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database
    #[clap(short = 'd', long, env = "DATABASE_PATH", global = true)]
    pub database: Option<PathBuf>,

    /// Secret used to sign and verify bearer tokens
    #[clap(long, env = "SECRET_KEY", hide_env_values = true, global = true)]
    pub secret_key: Option<String>,

    /// Log fewer messages
    #[clap(short = 'q', long, global = true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Register a new user
    AddUser(AddUserArgs),

    /// Print a bearer token for an existing user
    Token(TokenArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// HTTP server port
    #[clap(short = 'p', long, env = "PORT")]
    pub port: Option<u16>,

    /// HTTP server address
    #[clap(long, env = "HOST")]
    pub host: Option<String>,
}

#[derive(Args)]
pub struct AddUserArgs {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Args)]
pub struct TokenArgs {
    /// The user that the token identifies
    pub username: String,
}
