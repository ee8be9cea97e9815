use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use eeg_calibrator::calibration::StartOutcome;
use eeg_calibrator::display::{DisplayError, ImageUpdate};
use eeg_calibrator::electrode::ElectrodePanel;
use eeg_calibrator::signal::{SyntheticEegSource, Waveform};
use eeg_calibrator::{
    AppConfig, CalibrationApp, CredentialStore, DialogHost, DisplaySurface, DisplayUpdate,
    InMemoryCredentialStore, Notification, SaveOutcome, Severity, SqliteCredentialStore,
};
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

const EXIT_AUTH_FAILED: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "eeg_cli",
    about = "Headless driver for the EEG calibration workflow"
)]
struct Cli {
    /// JSON configuration file (defaults to assets/eeg_config.json)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the credential database path
    #[arg(long)]
    db: Option<PathBuf>,
    /// Keep credentials in memory for this invocation only
    #[arg(long, conflicts_with = "db")]
    in_memory: bool,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new user
    Register(CredentialArgs),
    /// Check a username/password pair
    Login(CredentialArgs),
    /// Log in, run a full calibration and export the captured data
    Calibrate(CalibrateArgs),
    /// Print a randomized electrode status panel as JSON
    Electrodes {
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug, Clone)]
struct CredentialArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
}

#[derive(Args, Debug, Clone)]
struct CalibrateArgs {
    #[command(flatten)]
    credentials: CredentialArgs,
    /// Destination CSV file
    #[arg(long)]
    output: PathBuf,
    /// Skip real-time waits and fire each transition immediately
    #[arg(long)]
    fast: bool,
    /// Seed for the synthetic EEG source
    #[arg(long)]
    seed: Option<u64>,
    /// Directory holding the prompt images
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Also register the user before logging in
    #[arg(long)]
    register: bool,
    /// Answer yes to the exit prompt after saving
    #[arg(long)]
    yes: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::load(),
    };
    if let Some(db) = &cli.db {
        config.storage.database_path = db.clone();
    }

    let in_memory = cli.in_memory;
    match cli.command {
        Commands::Electrodes { seed } => run_electrodes(seed),
        Commands::Register(args) => run_register(&config, open_store(&config, in_memory)?, &args),
        Commands::Login(args) => run_login(&config, open_store(&config, in_memory)?, &args),
        Commands::Calibrate(args) => {
            let store = open_store(&config, in_memory)?;
            run_calibrate(config, store, &args)
        }
    }
}

fn open_store(config: &AppConfig, in_memory: bool) -> Result<Box<dyn CredentialStore>> {
    if in_memory {
        return Ok(Box::new(InMemoryCredentialStore::new()));
    }
    let store = SqliteCredentialStore::open(&config.storage.database_path).with_context(|| {
        format!(
            "opening credential store {}",
            config.storage.database_path.display()
        )
    })?;
    Ok(Box::new(store))
}

type ConsoleApp = CalibrationApp<Box<dyn CredentialStore>, ConsoleDisplay, ConsoleDialogs>;

fn run_register(
    config: &AppConfig,
    store: Box<dyn CredentialStore>,
    args: &CredentialArgs,
) -> Result<ExitCode> {
    let mut app: ConsoleApp =
        CalibrationApp::new(config, store, ConsoleDisplay, ConsoleDialogs::default());
    app.show_register();
    if app.register(&args.username, &args.password) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn run_login(
    config: &AppConfig,
    store: Box<dyn CredentialStore>,
    args: &CredentialArgs,
) -> Result<ExitCode> {
    let mut app: ConsoleApp =
        CalibrationApp::new(config, store, ConsoleDisplay, ConsoleDialogs::default());
    if app.login(&args.username, &args.password) {
        println!("Logged in as {}", args.username);
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_AUTH_FAILED))
    }
}

fn run_calibrate(
    mut config: AppConfig,
    store: Box<dyn CredentialStore>,
    args: &CalibrateArgs,
) -> Result<ExitCode> {
    if let Some(dir) = &args.assets {
        config.assets.image_dir = dir.clone();
    }
    let dialogs = ConsoleDialogs {
        assume_yes: args.yes,
    };
    let mut app: ConsoleApp = match args.seed {
        Some(seed) => CalibrationApp::with_source(
            &config,
            store,
            ConsoleDisplay,
            dialogs,
            Box::new(SyntheticEegSource::with_seed(seed)),
        ),
        None => CalibrationApp::new(&config, store, ConsoleDisplay, dialogs),
    };

    let CredentialArgs { username, password } = &args.credentials;
    if args.register {
        app.show_register();
        if !app.register(username, password) {
            warn!("[CLI] Registration of {} failed; trying to log in anyway", username);
        }
        app.show_login();
    }
    if !app.login(username, password) {
        return Ok(ExitCode::from(EXIT_AUTH_FAILED));
    }

    match app.start_calibration() {
        Some(StartOutcome::Started) => {}
        other => anyhow::bail!("calibration did not start: {other:?}"),
    }

    if args.fast {
        while app.advance_to_next() {}
    } else {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("building timer runtime")?;
        runtime.block_on(drive_realtime(&mut app));
    }

    match app.save_data(&args.output) {
        SaveOutcome::Saved => {
            println!("Saved calibration data to {}", args.output.display());
            Ok(ExitCode::SUCCESS)
        }
        SaveOutcome::ExitRequested => {
            println!("Saved calibration data to {}", args.output.display());
            println!("Exiting");
            Ok(ExitCode::SUCCESS)
        }
        SaveOutcome::Failed | SaveOutcome::NothingToSave => Ok(ExitCode::from(1)),
    }
}

async fn drive_realtime(app: &mut ConsoleApp) {
    while let Some(wait) = app.time_until_next_transition() {
        tokio::time::sleep(wait).await;
        app.advance(wait);
    }
}

#[derive(Serialize)]
struct ElectrodeReport<'a> {
    active: usize,
    electrodes: &'a [eeg_calibrator::electrode::ElectrodeStatus],
}

fn run_electrodes(seed: Option<u64>) -> Result<ExitCode> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut panel = ElectrodePanel::new();
    panel.randomize(&mut rng);

    let report = ElectrodeReport {
        active: panel.active_count(),
        electrodes: panel.statuses(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(ExitCode::SUCCESS)
}

/// Writes render and plot commands to stdout
struct ConsoleDisplay;

impl DisplaySurface for ConsoleDisplay {
    fn render(&mut self, update: &DisplayUpdate) -> Result<(), DisplayError> {
        let image = match &update.image {
            ImageUpdate::Show(path) => format!(" [{}]", path.display()),
            ImageUpdate::Clear => " [cleared]".to_string(),
            ImageUpdate::Unchanged => String::new(),
        };
        println!(
            "{}{} | {}",
            update.instruction,
            image,
            update.progress_text()
        );
        Ok(())
    }

    fn plot(&mut self, title: &str, waveform: &Waveform) -> Result<(), DisplayError> {
        println!(
            "{}: {} samples, peak {:.3}",
            title,
            waveform.len(),
            waveform.peak()
        );
        Ok(())
    }
}

/// Prints dialogs to stderr; confirmations answer with `assume_yes`
#[derive(Default)]
struct ConsoleDialogs {
    assume_yes: bool,
}

impl DialogHost for ConsoleDialogs {
    fn notify(&mut self, notification: &Notification) {
        let tag = match notification.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        eprintln!("[{tag}] {}: {}", notification.title, notification.message);
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        eprintln!("[confirm] {title}: {message} -> {}", self.assume_yes);
        self.assume_yes
    }
}
