//! # Command Line Interface
//!
//! `cfgplane` starts the API server by default; the other commands manage
//! the database schema.

use crate::config::{load_config, AppConfig, DatabaseConfig};
use crate::storage::{
    create_pool, get_migration_version, list_applied_migrations, run_migrations,
    validate_migrations, MigrationInfo,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "cfgplane")]
#[command(about = "Cluster configuration management API")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path (TOML, YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Database URL override
    #[arg(long)]
    pub database_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Apply pending migrations and exit
    Migrate,

    /// Database inspection commands
    Database {
        #[command(subcommand)]
        command: DatabaseCommands,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum DatabaseCommands {
    /// Show migration status
    Status,

    /// List all applied migrations
    List,
}

impl Cli {
    /// Load configuration and apply command line overrides
    pub fn resolve_config(&self) -> crate::Result<AppConfig> {
        let mut config = load_config(self.config.as_deref())?;

        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if self.verbose {
            config.observability.log_level = "debug".to_string();
        }
        if let Some(Commands::Serve { port, host }) = &self.command {
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(host) = host {
                config.server.host = host.clone();
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config().context("Failed to load configuration")?;

    match cli.command {
        Some(Commands::Migrate) => {
            crate::observability::init_logging(&config.observability)?;
            let pool = create_pool(&DatabaseConfig { auto_migrate: false, ..config.database })
                .await?;
            println!("Running database migrations...");
            run_migrations(&pool).await?;
            println!("Migrations completed successfully!");
        }

        Some(Commands::Database { command }) => {
            crate::observability::init_logging(&config.observability)?;
            handle_database_command(command, &config.database).await?;
        }

        Some(Commands::Serve { .. }) | None => {
            crate::run_server(config).await?;
        }
    }

    Ok(())
}

/// Handle database inspection commands
async fn handle_database_command(
    command: DatabaseCommands,
    config: &DatabaseConfig,
) -> anyhow::Result<()> {
    let pool = create_pool(&DatabaseConfig { auto_migrate: false, ..config.clone() }).await?;

    match command {
        DatabaseCommands::Status => {
            let version = get_migration_version(&pool).await.ok().flatten();
            if validate_migrations(&pool).await? {
                println!("Database schema is up to date (version {})", version.unwrap_or(0));
            } else {
                println!("Database schema has pending migrations");
                process::exit(1);
            }
        }

        DatabaseCommands::List => {
            let migrations = list_applied_migrations(&pool).await?;
            if migrations.is_empty() {
                println!("No migrations have been applied");
            } else {
                println!("Applied migrations:");
                print_migrations_table(&migrations);
            }
        }
    }

    Ok(())
}

/// Print migrations in a formatted table
fn print_migrations_table(migrations: &[MigrationInfo]) {
    println!();
    println!("{:<15} {:<50} {:<25} {:<10}", "Version", "Description", "Applied On", "Time (ms)");
    println!("{}", "-".repeat(100));

    for migration in migrations {
        println!(
            "{:<15} {:<50} {:<25} {:<10}",
            migration.version,
            truncate_string(&migration.description, 48),
            migration.installed_on.format("%Y-%m-%d %H:%M:%S"),
            migration.execution_time / 1_000_000
        );
    }
    println!();
}

/// Truncate string to fit in table column
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["cfgplane", "database", "status"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Database { command: DatabaseCommands::Status }));

        let cli = Cli::try_parse_from(["cfgplane", "migrate"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Migrate));

        let cli = Cli::try_parse_from(["cfgplane"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from([
            "cfgplane",
            "--database-url",
            "sqlite::memory:",
            "-v",
            "serve",
            "--port",
            "9999",
            "--host",
            "0.0.0.0",
        ])
        .unwrap();

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("this is a very long string", 10), "this is...");
    }
}
