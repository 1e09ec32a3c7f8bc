use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use eco_core::model::Catalog;
use services::{AppServices, CalculatorService, Clock, ExportService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidExportDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidExportDir { raw } => {
                write!(f, "invalid --export-dir value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug)]
struct NothingToExport;

impl fmt::Display for NothingToExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no submitted result to export; answer the questionnaire first")
    }
}

impl std::error::Error for NothingToExport {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    calculator: Arc<CalculatorService>,
    export: Arc<ExportService>,
}

impl UiApp for DesktopApp {
    fn calculator(&self) -> Arc<CalculatorService> {
        Arc::clone(&self.calculator)
    }

    fn export(&self) -> Arc<ExportService> {
        Arc::clone(&self.export)
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    export_dir: PathBuf,
    catalog: Option<PathBuf>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui     [--db <sqlite_url>] [--export-dir <dir>] [--catalog <file.json>]");
    eprintln!("  cargo run -p app -- export [--db <sqlite_url>] [--export-dir <dir>] [--catalog <file.json>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://eco.sqlite3");
    eprintln!("  --export-dir .");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ECO_DB_URL, ECO_EXPORT_DIR, ECO_CATALOG, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Export,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "export" => Some(Self::Export),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = db_url_or_default(std::env::var("ECO_DB_URL").ok());
        let mut export_dir = std::env::var("ECO_EXPORT_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        let mut catalog = std::env::var("ECO_CATALOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--export-dir" => {
                    let value = require_value(args, "--export-dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidExportDir { raw: value });
                    }
                    export_dir = PathBuf::from(value);
                }
                "--catalog" => {
                    catalog = Some(PathBuf::from(require_value(args, "--catalog")?));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            export_dir,
            catalog,
        })
    }
}

const DEFAULT_DB_URL: &str = "sqlite://eco.sqlite3";

fn db_url_or_default(value: Option<String>) -> String {
    let raw = value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DB_URL.to_string());
    normalize_sqlite_url(raw)
}

/// Rewrite a SQLite URL or bare path as `sqlite://<absolute path>[?query]`.
fn normalize_sqlite_url(raw: String) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.contains("mode=memory") {
        return trimmed.to_string();
    }

    let rest = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let (path_str, query) = rest
        .split_once('?')
        .map_or((rest, None), |(path, query)| (path, Some(query)));
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    match query {
        Some(query) => format!("sqlite://{}?{query}", absolute.display()),
        None => format!("sqlite://{}", absolute.display()),
    }
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

/// Built-in catalog, or a validated replacement read from JSON.
fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(Catalog::eco_footprint());
    };
    let raw = std::fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&raw)?;
    tracing::info!(path = %path.display(), questions = catalog.len(), "loaded custom catalog");
    Ok(catalog)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
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

    let catalog = Arc::new(load_catalog(parsed.catalog.as_ref())?);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(
        &parsed.db_url,
        Clock::system(),
        catalog,
        parsed.export_dir.clone(),
    )
    .await?;
    tracing::info!(db = %parsed.db_url, export_dir = %parsed.export_dir.display(), "storage ready");

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                calculator: services.calculator(),
                export: services.export(),
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Ecological Footprint Calculator")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Export => {
            let path = run_export(&services).await?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Render the persisted result without opening a window.
async fn run_export(services: &AppServices) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let calculator = services.calculator().load().await;
    for warning in calculator.warnings() {
        eprintln!("warning: {warning}");
    }
    if !calculator.is_submitted() {
        return Err(NothingToExport.into());
    }
    Ok(services.export().export(&calculator).await?)
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
