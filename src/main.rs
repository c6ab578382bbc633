//! Ghostpad entrypoint: launches the editor, or manages the local store.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use ghostpad_core::{Config, Database};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ghostpad", about = "Note editor with inline suggestions", version)]
struct Cli {
    /// Store directory (default: GHOSTPAD_DB_PATH or ~/.cache/ghostpad/db)
    #[arg(long, global = true)]
    db_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the desktop editor (the default)
    Gui,
    /// Manage the stored completion API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Erase the stored note, API key and preferences
    Reset {
        /// Confirm the erase
        #[arg(long)]
        yes: bool,
    },
    /// Print the stored note, or write it to a file
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store a key for future sessions
    Set { key: String },
    /// Remove the stored key
    Clear,
    /// Show which key would be used
    Status,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        None | Some(Commands::Gui) => launch_gui(cli.db_path),
        Some(command) => {
            init_tracing();
            let db = open_store(cli.db_path)?;
            let mut stdout = std::io::stdout().lock();
            run_command(&db, &Config::from_env(), command, &mut stdout)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ghostpad=info,ghostpad_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(feature = "gui")]
fn launch_gui(db_path: Option<String>) -> anyhow::Result<()> {
    if let Some(path) = db_path {
        std::env::set_var("GHOSTPAD_DB_PATH", path);
    }
    ghostpad_gui::run().map_err(|err| anyhow::anyhow!("editor failed: {}", err))
}

#[cfg(not(feature = "gui"))]
fn launch_gui(_db_path: Option<String>) -> anyhow::Result<()> {
    bail!("this build has no editor; rebuild with the `gui` feature")
}

fn open_store(db_path: Option<String>) -> anyhow::Result<Database> {
    let path = db_path.unwrap_or_else(|| Config::from_env().db_path);
    Database::open(&path).with_context(|| format!("failed to open store at {}", path))
}

fn run_command(
    db: &Database,
    config: &Config,
    command: Commands,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Commands::Gui => bail!("the editor is launched without a subcommand"),
        Commands::Key { action } => run_key_action(db, config, action, out),
        Commands::Reset { yes } => {
            if !yes {
                bail!("refusing to erase stored data without --yes");
            }
            db.clear_all().context("failed to clear store")?;
            tracing::info!(path = %db.path().display(), "store cleared");
            writeln!(out, "Cleared note, API key and preferences.")?;
            Ok(())
        }
        Commands::Export { output } => {
            let note = db.note().context("failed to read note")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &note)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    writeln!(
                        out,
                        "Wrote {} chars to {}",
                        note.chars().count(),
                        path.display()
                    )?;
                }
                None => write!(out, "{}", note)?,
            }
            Ok(())
        }
    }
}

fn run_key_action(
    db: &Database,
    config: &Config,
    action: KeyAction,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match action {
        KeyAction::Set { key } => {
            let key = key.trim();
            if key.is_empty() {
                bail!("API key must not be empty");
            }
            db.set_api_key(key).context("failed to store API key")?;
            writeln!(out, "Stored API key {}", mask_key(key))?;
        }
        KeyAction::Clear => {
            db.clear_api_key().context("failed to clear API key")?;
            writeln!(out, "Stored API key removed.")?;
        }
        KeyAction::Status => {
            let stored = db.api_key().context("failed to read API key")?;
            let line = match (&config.api_key, &stored) {
                (Some(env_key), _) => {
                    format!("Using {} from GHOSTPAD_API_KEY", mask_key(env_key))
                }
                (None, Some(key)) => format!("Using stored key {}", mask_key(key)),
                (None, None) => "No API key configured; suggestions are disabled.".to_string(),
            };
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Show only the last four chars of a credential.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, Database) {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("db");
        let db = open_store(Some(path.to_string_lossy().to_string())).expect("open store");
        (dir, db)
    }

    fn config_without_env_key() -> Config {
        Config {
            db_path: String::new(),
            auto_save_interval: 2_000,
            api_key: None,
            api_base: ghostpad_core::DEFAULT_API_BASE.to_string(),
            model: ghostpad_core::DEFAULT_MODEL.to_string(),
            request_timeout_secs: 15,
        }
    }

    fn run(db: &Database, config: &Config, args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let command = cli.command.expect("subcommand");
        let mut out = Vec::new();
        run_command(db, config, command, &mut out)?;
        Ok(String::from_utf8(out).expect("utf8 output"))
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
        let cli = Cli::try_parse_from(["ghostpad"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn key_set_status_and_clear_round_through_the_store() {
        let (_dir, db) = temp_store();
        let config = config_without_env_key();

        let status = run(&db, &config, &["ghostpad", "key", "status"]).expect("status");
        assert!(status.contains("No API key configured"));

        let set = run(&db, &config, &["ghostpad", "key", "set", "sk-test-abcd1234"]).expect("set");
        assert_eq!(set.trim(), "Stored API key ****1234");
        assert_eq!(
            db.api_key().expect("key"),
            Some("sk-test-abcd1234".to_string())
        );

        let status = run(&db, &config, &["ghostpad", "key", "status"]).expect("status");
        assert_eq!(status.trim(), "Using stored key ****1234");

        run(&db, &config, &["ghostpad", "key", "clear"]).expect("clear");
        assert_eq!(db.api_key().expect("key"), None);
    }

    #[test]
    fn environment_key_takes_precedence_in_status() {
        let (_dir, db) = temp_store();
        db.set_api_key("stored-key-0000").expect("store key");
        let config = Config {
            api_key: Some("env-key-9999".to_string()),
            ..config_without_env_key()
        };
        let status = run(&db, &config, &["ghostpad", "key", "status"]).expect("status");
        assert_eq!(status.trim(), "Using ****9999 from GHOSTPAD_API_KEY");
    }

    #[test]
    fn blank_key_is_rejected() {
        let (_dir, db) = temp_store();
        let err = run(
            &db,
            &config_without_env_key(),
            &["ghostpad", "key", "set", "   "],
        )
        .expect_err("blank key");
        assert!(err.to_string().contains("must not be empty"));
        assert_eq!(db.api_key().expect("key"), None);
    }

    #[test]
    fn export_prints_or_writes_the_note() {
        let (dir, db) = temp_store();
        db.set_note("line one\nline two").expect("set note");
        let config = config_without_env_key();

        let printed = run(&db, &config, &["ghostpad", "export"]).expect("export");
        assert_eq!(printed, "line one\nline two");

        let target = dir.path().join("note.txt");
        let target_arg = target.to_string_lossy().to_string();
        let written = run(
            &db,
            &config,
            &["ghostpad", "export", "--output", target_arg.as_str()],
        )
        .expect("export to file");
        assert!(written.contains("17 chars"));
        assert_eq!(
            std::fs::read_to_string(&target).expect("read export"),
            "line one\nline two"
        );
    }

    #[test]
    fn reset_requires_confirmation() {
        let (_dir, db) = temp_store();
        db.set_note("keep me").expect("set note");
        let config = config_without_env_key();

        let err = run(&db, &config, &["ghostpad", "reset"]).expect_err("needs --yes");
        assert!(err.to_string().contains("--yes"));
        assert_eq!(db.note().expect("note"), "keep me");

        run(&db, &config, &["ghostpad", "reset", "--yes"]).expect("reset");
        assert_eq!(db.note().expect("note"), "");
        assert_eq!(db.api_key().expect("key"), None);
    }

    #[test]
    fn masking_hides_all_but_the_tail() {
        assert_eq!(mask_key("abc"), "****");
        assert_eq!(mask_key("sk-1234567"), "****4567");
    }
}
