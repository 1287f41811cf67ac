use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use meetman_notify::{Notifier, SmtpMailer};

/// Maintenance commands for the videoconference meetings store.
#[derive(Parser)]
#[command(name = "meetman", version, about)]
struct Cli {
    /// Path to the meetings SQLite file. Falls back to `database.path`
    /// from the config when omitted.
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn resolve_store_path(cli_arg: Option<PathBuf>, config: &meetman_core::MeetmanConfig) -> PathBuf {
    cli_arg.unwrap_or_else(|| PathBuf::from(&config.database.path))
}

#[derive(Subcommand)]
enum Command {
    /// Send calendar invitations for meetings not yet notified.
    Mail,
    /// Purge expired meetings and stale participant records.
    Clean,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meetman=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // load config: explicit MEETMAN_CONFIG env > ~/.meetman/meetman.toml
    let config_path = std::env::var("MEETMAN_CONFIG").ok();
    let config = meetman_core::MeetmanConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        meetman_core::MeetmanConfig::default()
    });
    let tz = config.tz()?;

    let store_path = resolve_store_path(cli.store_path, &config);
    let mut conn = meetman_store::db::open(&store_path)?;

    match cli.command {
        Command::Mail => {
            let mailer = SmtpMailer::new(
                &config.mail.host,
                config.mail.port,
                &config.mail.sender,
            );
            let outcome = Notifier::new(mailer, tz).send_unsent(&conn)?;
            info!(
                notified = outcome.notified,
                failed = outcome.failed,
                "notification pass complete"
            );
        }
        Command::Clean => {
            meetman_store::meetings::cleanup(&mut conn, tz)?;
            info!("cleanup pass complete");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_store_path_wins_over_config() {
        let config = meetman_core::MeetmanConfig::default();
        let path = resolve_store_path(Some(PathBuf::from("/var/lib/meetings.db")), &config);
        assert_eq!(path, PathBuf::from("/var/lib/meetings.db"));
    }

    #[test]
    fn omitted_store_path_falls_back_to_config() {
        let config = meetman_core::MeetmanConfig {
            database: meetman_core::config::DatabaseConfig {
                path: "/srv/meetman/meetings.db".to_string(),
            },
            ..Default::default()
        };
        let path = resolve_store_path(None, &config);
        assert_eq!(path, PathBuf::from("/srv/meetman/meetings.db"));
    }

    #[test]
    fn store_path_and_subcommand_parse() {
        let cli = Cli::try_parse_from(["meetman", "/tmp/meetings.db", "clean"]).expect("parse");
        assert_eq!(cli.store_path, Some(PathBuf::from("/tmp/meetings.db")));
        assert!(matches!(cli.command, Command::Clean));
    }
}

