use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use neurochaos_viewer::navigation::Navigator;
use neurochaos_viewer::render::{html, text};
use neurochaos_viewer::{
    telemetry, AppConfig, AppContext, ErrorCode, NavigationState, RecordingFile, Route, Screen,
    UploadResponse,
};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "neurochaos_cli",
    about = "Upload EEG recordings and view per-channel metric charts"
)]
struct Cli {
    /// JSON configuration file (defaults to ./neurochaos.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Print recorded session events to stderr when done
    #[arg(long, global = true)]
    events: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload a recording and show the resulting charts
    Upload {
        #[arg(long)]
        file: PathBuf,
        /// Override the metrics service endpoint
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        html: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Show charts for a saved metrics service response
    Visualize {
        #[arg(long)]
        payload: PathBuf,
        #[arg(long)]
        html: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Follow a navigation link and show the screen it lands on
    Open {
        path: String,
        #[arg(long)]
        json: bool,
    },
    /// List navigation routes
    Routes,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = AppConfig::load_from_file(path);
            config.apply_env_overrides();
            config
        }
        None => AppConfig::load(),
    };

    let code = match cli.command {
        Commands::Upload {
            file,
            endpoint,
            html,
            json,
        } => {
            if let Some(endpoint) = endpoint {
                config.upload.endpoint = endpoint;
            }
            run_upload(config, file, html, json)?
        }
        Commands::Visualize {
            payload,
            html,
            json,
        } => run_visualize(config, payload, html, json)?,
        Commands::Open { path, json } => run_open(config, &path, json)?,
        Commands::Routes => run_routes(),
    };

    if cli.events {
        emit_events()?;
    }
    Ok(code)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    // Also installs the log bridge, so library `log` records show up here
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_upload(
    config: AppConfig,
    file: PathBuf,
    html_path: Option<PathBuf>,
    json: bool,
) -> Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let ctx = AppContext::new(config).context("building HTTP client")?;

    ctx.open(Route::Upload);
    ctx.select_file(RecordingFile::from_path(file));
    let result = runtime.block_on(ctx.submit());

    let screen = ctx.screen();
    emit_screen(&ctx, &screen, html_path, json)?;

    match result {
        Ok(_) => Ok(exit_for(&screen)),
        Err(err) => {
            tracing::debug!("upload failed with code {}", err.code());
            Ok(ExitCode::from(2))
        }
    }
}

fn run_visualize(
    config: AppConfig,
    payload: PathBuf,
    html_path: Option<PathBuf>,
    json: bool,
) -> Result<ExitCode> {
    let contents =
        fs::read_to_string(&payload).with_context(|| format!("reading {}", payload.display()))?;
    let response: UploadResponse = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", payload.display()))?;

    let ctx = AppContext::new(config).context("building HTTP client")?;
    ctx.shell()
        .navigate(Route::Visualize, Some(NavigationState::new(response)));

    let screen = ctx.screen();
    emit_screen(&ctx, &screen, html_path, json)?;
    Ok(exit_for(&screen))
}

fn run_open(config: AppConfig, path: &str, json: bool) -> Result<ExitCode> {
    let ctx = AppContext::new(config).context("building HTTP client")?;
    if ctx.open_path(path).is_none() {
        bail!("unknown route {:?}", path);
    }

    let screen = ctx.screen();
    emit_screen(&ctx, &screen, None, json)?;
    Ok(exit_for(&screen))
}

fn run_routes() -> ExitCode {
    for route in Route::ALL {
        println!("{:<12} {}", route.path(), route.label());
    }
    ExitCode::from(0)
}

fn emit_screen(
    ctx: &AppContext,
    screen: &Screen,
    html_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(screen)?);
    } else {
        print!("{}", text::render(screen));
    }

    if let Some(path) = html_path {
        html::write_html(&path, screen, &ctx.config().render)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn emit_events() -> Result<()> {
    let report = telemetry::session().report();
    eprintln!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn exit_for(screen: &Screen) -> ExitCode {
    if screen.error_text().is_some() {
        ExitCode::from(2)
    } else {
        ExitCode::from(0)
    }
}
