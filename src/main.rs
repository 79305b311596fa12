//! ScribePad state tool.
//!
//! Wires the persistent stores together the way the editor does at startup
//! and exposes them on the command line:
//! - recent files history
//! - editor settings
//! - available themes

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scribe_pad::app::domain::settings::{SettingField, Theme};
use scribe_pad::app::infrastructure::error::AppError;
use scribe_pad::app::infrastructure::paths::{AppPaths, RECENT_FILES_FILE};
use scribe_pad::app::infrastructure::platform::Platform;
use scribe_pad::app::infrastructure::preferences::JsonPreferences;
use scribe_pad::app::services::{PlatformDefaults, RecentFiles, SettingsStore, listener};
use scribe_pad::app::PadConfig;

const LOG_ENV: &str = "SCRIBEPAD_LOG";

#[derive(Parser, Debug)]
#[command(name = "ScribePad")]
#[command(about = "Inspect and edit ScribePad's recent files and settings")]
#[command(version)]
struct Args {
    /// Keep config and cache below this directory instead of the platform ones
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recently opened files
    #[command(subcommand)]
    Recent(RecentCommand),

    /// Editor settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Themes available on this platform
    Themes,
}

#[derive(Subcommand, Debug)]
enum RecentCommand {
    /// Print the history, most recent first
    List,
    /// Move a file to the front of the history
    Add { path: PathBuf },
    /// Drop a file from the history
    Remove { path: PathBuf },
    /// Forget every entry
    Clear,
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print every setting
    Show,
    /// Print one setting
    Get { field: SettingField },
    /// Change one setting
    Set { field: SettingField, value: String },
    /// Restore one setting to its default
    Reset { field: SettingField },
    /// Restore every setting to its default
    ResetAll,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(args: Args) -> Result<(), AppError> {
    let paths = match &args.data_dir {
        Some(root) => AppPaths::under(root),
        None => AppPaths::platform(),
    };
    paths.ensure_dirs()?;
    tracing::debug!(
        "Using config dir {} and cache dir {}",
        paths.config_dir.display(),
        paths.cache_dir.display()
    );

    let config = PadConfig::load(&paths.config_file());
    let defaults = PlatformDefaults::from_config(&config)?;

    match args.command {
        Command::Recent(cmd) => {
            let recent = RecentFiles::new(&paths.cache_dir, RECENT_FILES_FILE, config.history_capacity)?;
            run_recent(recent, cmd)
        }
        Command::Settings(cmd) => {
            let mut store = SettingsStore::new(JsonPreferences::open(paths.preferences_file()), defaults);
            store.subscribe(listener(|| {
                tracing::info!("Settings changed");
                Ok(())
            }));
            run_settings(&mut store, cmd)
        }
        Command::Themes => {
            let store = SettingsStore::new(JsonPreferences::open(paths.preferences_file()), defaults);
            let current = store.theme();
            for theme in Theme::supported_on(Platform::current()) {
                let marker = if theme == current { "*" } else { " " };
                println!("{} {:<16} {}", marker, theme.key(), theme.message_key());
            }
            Ok(())
        }
    }
}

fn run_recent(mut recent: RecentFiles, cmd: RecentCommand) -> Result<(), AppError> {
    match cmd {
        RecentCommand::List => {
            for path in recent.list()? {
                println!("{}", path.display());
            }
        }
        RecentCommand::Add { path } => recent.add(&path)?,
        RecentCommand::Remove { path } => recent.remove(&path)?,
        RecentCommand::Clear => recent.clear()?,
    }
    Ok(())
}

fn run_settings(store: &mut SettingsStore, cmd: SettingsCommand) -> Result<(), AppError> {
    match cmd {
        SettingsCommand::Show => {
            for field in SettingField::ALL {
                println!("{} = {}", field.key(), store.get(field));
            }
        }
        SettingsCommand::Get { field } => println!("{}", store.get(field)),
        SettingsCommand::Set { field, value } => store.set_from_str(field, &value)?,
        SettingsCommand::Reset { field } => store.reset(field)?,
        SettingsCommand::ResetAll => store.reset_all()?,
    }
    Ok(())
}
