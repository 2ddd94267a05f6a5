use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use invseed::api::{wait_until_ready, ApiSession};
use invseed::config::{load_tenants, Config};
use invseed::outcome::{RunOutcome, EXIT_FATAL};
use invseed::seed::{self, SeedContext, SeedReport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Instrument;
use tracing_subscriber::EnvFilter;

/// Seed an InvenTree instance with demo categories, locations, parts and tenants
#[derive(Parser, Debug)]
#[command(name = "invseed", version = invseed::VERSION, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Config file (YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, e.g. http://localhost:8000/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Admin username
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Admin password
    #[arg(short, long, global = true)]
    password: Option<String>,

    /// Readiness probes before giving up
    #[arg(long, global = true)]
    max_retries: Option<u32>,

    /// Seconds between readiness probes
    #[arg(long, global = true)]
    retry_delay: Option<u64>,

    /// Continue unauthenticated when credentials are rejected
    #[arg(long, global = true)]
    allow_guest: bool,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Create the default part categories
    Categories,
    /// Create the warehouse location tree
    Locations,
    /// Create example parts under their categories
    Parts,
    /// Create tenant groups and locations
    Tenants {
        /// JSON list of tenants, replaces the configured ones
        #[arg(long)]
        tenants: Option<PathBuf>,
    },
    /// Run categories, locations, parts and tenants in order
    All,
    /// Print the warehouse layout summary without contacting the API
    Layout,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn setup_logging(
    level: LogLevel,
    log_file: Option<&PathBuf>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("invseed={}", level.as_filter())));

    let Some(log_path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
        return Ok(None);
    };

    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Ok(Some(guard))
}

/// CLI flags win over file and environment
fn apply_overrides(config: &mut Config, args: &Args) -> Result<()> {
    if let Some(url) = &args.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(username) = &args.username {
        config.api.username = username.clone();
    }
    if let Some(password) = &args.password {
        config.api.password = password.clone();
    }
    if let Some(max_retries) = args.max_retries {
        config.readiness.max_retries = max_retries;
    }
    if let Some(delay) = args.retry_delay {
        config.readiness.delay_secs = delay;
    }
    if args.allow_guest {
        config.allow_guest = true;
    }
    if let Command::Tenants {
        tenants: Some(path),
    } = &args.command
    {
        config.tenants = load_tenants(path)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = match setup_logging(args.log_level, args.log_file.as_ref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::from(EXIT_FATAL);
        }
    };

    match run(&args).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run(args: &Args) -> Result<ExitCode> {
    let mut config = Config::load(args.config.as_deref())?;
    apply_overrides(&mut config, args)?;
    config.validate()?;

    if matches!(args.command, Command::Layout) {
        println!("{}", config.warehouse.summary());
        return Ok(ExitCode::SUCCESS);
    }

    tracing::info!("API URL: {}", config.api.base_url);
    tracing::info!("Username: {}", config.api.username);

    let mut session = ApiSession::new(&config.api)?;

    if wait_until_ready(&session, &config.readiness.policy()).await.is_err() {
        eprintln!("Error: inventory API is not available at {}", session.base_url());
        eprintln!("Make sure the containers are running: docker compose up -d");
        return Ok(ExitCode::from(RunOutcome::NotReady.exit_code()));
    }

    let mode = session.authenticate().await;
    if let Some(outcome) = RunOutcome::after_auth(mode, config.allow_guest) {
        eprintln!("Error: authentication failed for user '{}'", config.api.username);
        return Ok(ExitCode::from(outcome.exit_code()));
    }
    if mode.is_degraded() {
        tracing::warn!("Continuing as guest; creates will likely be refused");
    }

    let mut ctx = SeedContext::new();
    let span = tracing::info_span!("seed", run_id = %ctx.run_id, auth = mode.as_str());
    let report = run_seeders(&args.command, &session, &mut ctx, &config)
        .instrument(span)
        .await;

    print_report(&ctx, &report);
    Ok(ExitCode::from(RunOutcome::Seeded(&report).exit_code()))
}

async fn run_seeders(
    command: &Command,
    session: &ApiSession,
    ctx: &mut SeedContext,
    config: &Config,
) -> SeedReport {
    match command {
        Command::Categories => seed::seed_categories(session, ctx).await,
        Command::Locations => seed::seed_locations(session, ctx, &config.warehouse).await,
        Command::Parts => seed::seed_parts(session, ctx).await,
        Command::Tenants { .. } => {
            seed::seed_tenants(session, ctx, &config.tenants, &config.warehouse).await
        }
        Command::All => {
            let mut report = seed::seed_categories(session, ctx).await;
            report.merge(seed::seed_locations(session, ctx, &config.warehouse).await);
            report.merge(seed::seed_parts(session, ctx).await);
            report.merge(
                seed::seed_tenants(session, ctx, &config.tenants, &config.warehouse).await,
            );
            report
        }
        Command::Layout => SeedReport::default(),
    }
}

fn print_report(ctx: &SeedContext, report: &SeedReport) {
    let elapsed = ctx.elapsed();
    println!(
        "Seeding finished in {}.{:03}s (run {})",
        elapsed.num_seconds(),
        elapsed.num_milliseconds() % 1000,
        ctx.run_id
    );
    println!("  {}", report);
    for failure in &report.failures {
        println!("  failed: {}", failure);
    }
}
