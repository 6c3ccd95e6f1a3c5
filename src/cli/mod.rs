//! Command-line interface.
//!
//! `serve` is the default command; `migrate` and `seed` are one-shot
//! administrative commands that exit when done.

use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::config::{ConfigLoader, Settings};
use crate::db::{establish_async_connection_pool, run_migrations};
use crate::logger::init_logger;
use crate::models::{NewCategory, NewUser};
use crate::repositories::Repositories;
use crate::server::Server;
use crate::utils::password::hash_password;

/// Environment variable consulted for the seeded admin password.
const SEED_PASSWORD_VAR: &str = "PUSTAKA_SEED_PASSWORD";

const SEED_ADMIN_NAME: &str = "Administrator";
const SEED_ADMIN_EMAIL: &str = "admin@pustaka.local";

/// Starter categories inserted by `seed` when missing.
const SEED_CATEGORIES: &[&str] = &["Fiction", "Non-fiction", "Science", "Technology", "History"];

#[derive(Parser)]
#[command(name = "pustaka", version, about = "Library catalog admin service")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Apply pending database migrations and exit.
    Migrate,
    /// Insert the admin user and starter categories, skipping existing rows.
    Seed,
}

/// Parses arguments, loads configuration and dispatches the command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = ConfigLoader::new().load()?;
    init_logger(&settings.logger)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => Server::new(settings).run().await,
        Command::Migrate => {
            run_migrations(&settings.database.url).await?;
            Ok(())
        }
        Command::Seed => seed(settings).await,
    }
}

/// Provisions the admin user and starter categories.
///
/// Safe to run repeatedly: the user insert skips on email conflict and
/// categories are only inserted when no row with that name exists.
async fn seed(settings: Settings) -> anyhow::Result<()> {
    let pool = establish_async_connection_pool(&settings.database).await?;
    let repos = Repositories::new(pool);

    let password = match std::env::var(SEED_PASSWORD_VAR) {
        Ok(value) if !value.is_empty() => value,
        _ => anyhow::bail!("{} must be set to seed the admin user", SEED_PASSWORD_VAR),
    };

    let inserted = repos
        .users
        .insert_if_absent(NewUser {
            name: SEED_ADMIN_NAME.to_string(),
            email: SEED_ADMIN_EMAIL.to_string(),
            password: hash_password(&password)?,
        })
        .await?;
    match inserted {
        Some(user) => tracing::info!(email = %user.email, "Admin user created"),
        None => tracing::info!(email = SEED_ADMIN_EMAIL, "Admin user already present"),
    }

    let mut created = 0usize;
    for name in SEED_CATEGORIES {
        if repos.categories.find_by_name(name).await?.is_some() {
            continue;
        }
        repos
            .categories
            .insert(NewCategory {
                id: Uuid::new_v4(),
                name: (*name).to_string(),
            })
            .await?;
        created += 1;
    }
    tracing::info!(
        created,
        skipped = SEED_CATEGORIES.len() - created,
        "Starter categories seeded"
    );

    Ok(())
}
