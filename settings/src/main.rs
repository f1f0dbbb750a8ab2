//! Client Settings CLI - resolve and serve the web client's settings bundle
//!
//! # Commands
//!
//! ```bash
//! client-settings show                      # Print resolved settings as JSON
//! client-settings url api --mode development
//! client-settings check --config deploy.json
//! client-settings placeholders config.js    # List [[token]] markers
//! client-settings serve --port 3000         # Serve /config.json
//! ```
//!
//! Deployment values come from `--config <file>` or, without it, from the
//! environment (`APP_NAME`, `APP_HOST`, `WEB_PORT`, `DADATA_TOKEN`, ...).
//! A `.env` file in the working directory is loaded first.

use clap::{Parser, Subcommand, ValueEnum};
use client_settings::{
    api::logs, find_placeholders, load_from_env, load_from_file, load_validated_from_env,
    load_validated_from_file, validate_deployment, Deployment, EnvironmentMode, FixedMode,
    ModeSignal, ProcessEnvMode, SettingsBundle, UrlKind,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "client-settings")]
#[command(about = "Resolve and serve the web client's settings bundle", long_about = None)]
struct Cli {
    /// Print library debug logs (default: warnings only; `serve` logs at info)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved settings as JSON
    Show {
        /// Deployment config file (default: environment)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Environment mode (default: read from NODE_ENV)
        #[arg(short, long)]
        mode: Option<ModeArg>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print one base URL
    Url {
        /// Which URL
        kind: KindArg,

        /// Deployment config file (default: environment)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Environment mode (default: read from NODE_ENV)
        #[arg(short, long)]
        mode: Option<ModeArg>,
    },

    /// Validate deployment values before shipping
    Check {
        /// Deployment config file (default: environment)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List unresolved [[token]] placeholders in a file
    Placeholders {
        /// File to scan
        input: PathBuf,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Deployment config file (default: environment)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Environment mode (default: read from NODE_ENV on every request)
        #[arg(short, long)]
        mode: Option<ModeArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Development,
    Production,
}

impl From<ModeArg> for EnvironmentMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Development => EnvironmentMode::Development,
            ModeArg::Production => EnvironmentMode::Production,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Api,
    Ws,
}

impl From<KindArg> for UrlKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Api => UrlKind::Api,
            KindArg::Ws => UrlKind::Ws,
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = log_level(cli.verbose, matches!(cli.command, Commands::Serve { .. }));
    if let Err(e) = logs::init(level) {
        eprintln!("⚠️  Logger already installed: {}", e);
    }

    let result = match cli.command {
        Commands::Show {
            config,
            mode,
            output,
        } => cmd_show(config.as_deref(), mode, output.as_deref()),

        Commands::Url { kind, config, mode } => cmd_url(kind.into(), config.as_deref(), mode),

        Commands::Check { config } => cmd_check(config.as_deref()),

        Commands::Placeholders { input } => cmd_placeholders(&input),

        Commands::Serve { port, config, mode } => cmd_serve(port, config.as_deref(), mode).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

/// Log level for the `log` facade; `serve` streams info to `/api/logs`.
fn log_level(verbose: bool, serving: bool) -> log::LevelFilter {
    match (verbose, serving) {
        (true, _) => log::LevelFilter::Debug,
        (false, true) => log::LevelFilter::Info,
        (false, false) => log::LevelFilter::Warn,
    }
}

fn signal_for(mode: Option<ModeArg>) -> Arc<dyn ModeSignal> {
    match mode {
        Some(m) => Arc::new(FixedMode(m.into())),
        None => Arc::new(ProcessEnvMode::default()),
    }
}

fn load_bundle(
    config: Option<&Path>,
    mode: Option<ModeArg>,
) -> Result<SettingsBundle, Box<dyn std::error::Error>> {
    let deployment = match config {
        Some(path) => load_validated_from_file(path)?,
        None => load_validated_from_env()?,
    };
    Ok(SettingsBundle::new(deployment, signal_for(mode)))
}

fn cmd_show(
    config: Option<&Path>,
    mode: Option<ModeArg>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bundle = load_bundle(config, mode)?;
    let snapshot = bundle.snapshot();

    eprintln!("⚙️  {} ({} mode)", snapshot.app_name, snapshot.mode);

    let json = serde_json::to_string_pretty(&snapshot)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_url(
    kind: UrlKind,
    config: Option<&Path>,
    mode: Option<ModeArg>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bundle = load_bundle(config, mode)?;
    println!("{}", bundle.resolve(kind));
    Ok(())
}

fn cmd_check(config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let deployment: Deployment = match config {
        Some(path) => {
            eprintln!("✔️  Checking: {}", path.display());
            load_from_file(path)?
        }
        None => {
            eprintln!("✔️  Checking environment");
            load_from_env()?
        }
    };

    match validate_deployment(&deployment) {
        Ok(()) => {
            eprintln!("✅ '{}' is ready to ship", deployment.app_name);
            Ok(())
        }
        Err(errors) => {
            eprintln!("\n❌ {} problem(s):", errors.len());
            for err in &errors {
                eprintln!("   - {}", err);
            }
            std::process::exit(1);
        }
    }
}

fn cmd_placeholders(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(input)?;

    let mut found = 0;
    for (line_no, line) in content.lines().enumerate() {
        for token in find_placeholders(line) {
            println!("{}:{}: [[{}]]", input.display(), line_no + 1, token);
            found += 1;
        }
    }

    if found == 0 {
        eprintln!("✅ No placeholders in {}", input.display());
    } else {
        eprintln!("\n📊 {} unresolved placeholder(s)", found);
        std::process::exit(1);
    }

    Ok(())
}

async fn cmd_serve(
    port: u16,
    config: Option<&Path>,
    mode: Option<ModeArg>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bundle = load_bundle(config, mode)?;
    client_settings::server::start_server(port, Arc::new(bundle)).await?;
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
