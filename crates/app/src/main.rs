use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use lidwoord_core::model::Dataset;
use services::DrillService;
use storage::Storage;
use storage::dataset_file::load_dataset;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod drill;
mod input;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  lidwoord [play]  [--db <sqlite_url>] [--words <file.json>]");
    eprintln!("  lidwoord status  [--db <sqlite_url>] [--words <file.json>]");
    eprintln!("  lidwoord reset   [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:lidwoord.sqlite3");
    eprintln!("  --words <built-in word list>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LIDWOORD_DB_URL, LIDWOORD_WORDS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Status,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "status" => Some(Self::Status),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    words: Option<PathBuf>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("LIDWOORD_DB_URL").ok().map_or_else(
            || normalize_sqlite_url("sqlite:lidwoord.sqlite3".into()),
            normalize_sqlite_url,
        );
        let mut words = std::env::var_os("LIDWOORD_WORDS").map(PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--words" => {
                    words = Some(PathBuf::from(require_value(args, "--words")?));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, words })
    }

    fn dataset(&self) -> Result<Dataset, Box<dyn std::error::Error>> {
        match &self.words {
            Some(path) => Ok(load_dataset(path)?),
            None => Ok(Dataset::builtin()),
        }
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // stderr, so log lines never land in the middle of the prompt on stdout
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    info!(db = %parsed.db_url, command = ?cmd, "opening session store");
    let storage = Storage::sqlite(&parsed.db_url).await?;
    let store = storage.session_store();

    match cmd {
        Command::Play => {
            let service = DrillService::new(Arc::new(parsed.dataset()?), store);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            drill::run_drill(&service, stdin, &mut stdout).await
        }
        Command::Status => {
            let dataset = parsed.dataset()?;
            match store.try_load().await {
                Ok(Some(state)) => {
                    let service = DrillService::new(Arc::new(dataset), store);
                    let view = service.view(&state);
                    println!(
                        "{} van {} beantwoord ({}%), {} goed{}",
                        view.progress.answered,
                        view.progress.total,
                        view.percent(),
                        state.correct_count(),
                        if state.is_done() { ", klaar" } else { "" }
                    );
                    if let Err(err) = state.check_indices(service.dataset().len()) {
                        println!("let op: {err}; de volgende ronde begint opnieuw");
                    }
                }
                Ok(None) => println!("geen opgeslagen sessie"),
                Err(err) => println!("opgeslagen sessie onbruikbaar: {err}"),
            }
            Ok(())
        }
        Command::Reset => {
            store.clear().await;
            println!("opgeslagen sessie verwijderd");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        error!(%err, "lidwoord failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_urls_become_absolute() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/x.sqlite3".into()),
            "sqlite:///tmp/x.sqlite3"
        );
        assert_eq!(
            normalize_sqlite_url("sqlite:/tmp/x.sqlite3".into()),
            "sqlite:///tmp/x.sqlite3"
        );
        assert!(normalize_sqlite_url("rel.sqlite3".into()).starts_with("sqlite:///"));
    }

    #[test]
    fn parses_flags() {
        let mut args = ["--db", "sqlite:/tmp/l.sqlite3", "--words", "w.json"]
            .into_iter()
            .map(String::from);
        let parsed = Args::parse(&mut args).unwrap();
        assert_eq!(parsed.db_url, "sqlite:///tmp/l.sqlite3");
        assert_eq!(parsed.words, Some(PathBuf::from("w.json")));

        let mut missing = ["--words"].into_iter().map(String::from);
        assert!(matches!(
            Args::parse(&mut missing),
            Err(ArgsError::MissingValue { flag: "--words" })
        ));
    }

    #[test]
    fn subcommands() {
        assert_eq!(Command::from_arg("play"), Some(Command::Play));
        assert_eq!(Command::from_arg("status"), Some(Command::Status));
        assert_eq!(Command::from_arg("reset"), Some(Command::Reset));
        assert_eq!(Command::from_arg("ui"), None);
    }
}
