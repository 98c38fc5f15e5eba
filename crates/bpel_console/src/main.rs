//! BPEL Console configuration tool.

use anyhow::Result;
use bpel_console::commands::{self, ProxyUrlArgs};
use bpel_console_config::ConfigFormat;
use bpel_console_logging::{init_logging, LogConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "bpel-console", about = "Inspect and validate BPEL Console configuration")]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Also write logs under the console home directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the active console record
    Show {
        /// Record file (.js, .json or .toml); built-in profile when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: json, toml or script
        #[arg(short, long, default_value = "json")]
        format: ConfigFormat,
    },

    /// Validate a record file
    Check {
        /// Record file (.js, .json or .toml)
        path: PathBuf,
    },

    /// Write the console.config.js form of a record file
    Render {
        /// Record file (.js, .json or .toml)
        #[arg(short, long)]
        config: PathBuf,

        /// Output path for the script
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Print the backend URL for a proxied request
    ProxyUrl {
        /// Properties file (defaults to $BPEL_CONSOLE_CONFIG_FILE or the console home)
        #[arg(long)]
        properties: Option<PathBuf>,

        #[arg(long, default_value = "http")]
        scheme: String,

        #[arg(long, default_value = "localhost")]
        host: String,

        #[arg(long, default_value = "8080")]
        port: u16,

        /// Path below the proxy mount, e.g. /process/definitions
        #[arg(long)]
        path: Option<String>,

        /// Query string without the leading '?'
        #[arg(long)]
        query: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match init_logging(LogConfig {
        app_name: "bpel-console",
        verbose: cli.verbose,
        log_to_file: cli.log_file,
    }) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:#}", err);
            None
        }
    };

    match run_command(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            ExitCode::from(1)
        }
    }
}

fn run_command(command: Commands) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match command {
        Commands::Show { config, format } => commands::show(config.as_deref(), format, &mut out),
        Commands::Check { path } => commands::check(&path, &mut out),
        Commands::Render { config, out: out_path } => commands::render(&config, &out_path),
        Commands::ProxyUrl {
            properties,
            scheme,
            host,
            port,
            path,
            query,
        } => commands::proxy_url(
            &ProxyUrlArgs {
                properties,
                scheme,
                host,
                port,
                path,
                query,
            },
            &mut out,
        ),
    }
}
