//! Operator tooling for the catalog database.
//!
//! `gamics-admin migrate` applies pending schema migrations and
//! `gamics-admin set-password` creates an admin account or resets its
//! password.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use tokio::runtime::Builder;
use zeroize::Zeroizing;

use gamics::domain::ports::{AdminRepository, PasswordHasher};
use gamics::outbound::persistence::{
    DbPool, DieselAdminRepository, PoolConfig, run_pending_migrations,
};
use gamics::outbound::security::Argon2PasswordHasher;

/// `gamics-admin` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "gamics-admin",
    about = "Maintain the Gamics catalog database",
    version
)]
struct CliArgs {
    /// SQLite database file.
    #[arg(long, value_name = "path", default_value = "gamics.db", global = true)]
    database: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Create an admin account or replace its password.
    SetPassword {
        #[arg(long, value_name = "name")]
        username: String,
        #[arg(long, value_name = "secret")]
        password: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build admin runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: CliArgs) -> Result<()> {
    let database_url = args.database.to_string_lossy().into_owned();
    let applied = run_pending_migrations(&database_url)
        .await
        .with_context(|| format!("failed to migrate {database_url}"))?;

    match args.command {
        Command::Migrate => {
            println!("applied {applied} migration(s) to {database_url}");
            Ok(())
        }
        Command::SetPassword { username, password } => {
            let password = Zeroizing::new(password);
            set_password(&database_url, username.trim(), &password).await
        }
    }
}

async fn set_password(database_url: &str, username: &str, password: &str) -> Result<()> {
    if username.is_empty() {
        return Err(eyre!("username must not be empty"));
    }
    if password.is_empty() {
        return Err(eyre!("password must not be empty"));
    }

    let hash = Argon2PasswordHasher::new()
        .hash(password)
        .wrap_err("failed to hash password")?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(1))
        .await
        .wrap_err("failed to open database pool")?;
    let id = DieselAdminRepository::new(pool)
        .upsert(username, &hash, Utc::now())
        .await
        .wrap_err("failed to store admin account")?;
    println!("admin {username} saved with id {id}");
    Ok(())
}
