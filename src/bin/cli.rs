//! emuconsole CLI
//!
//! Command-line interface for driving an emulator console.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use emuconsole::{Config, Console, ConsoleError, Response};
use tracing_subscriber::{fmt, EnvFilter};

/// Name of the token file the emulator writes into the home directory
const AUTH_TOKEN_FILE: &str = ".emulator_console_auth_token";

/// emuconsole CLI
#[derive(Parser, Debug)]
#[command(name = "emuconsole-cli")]
#[command(about = "Send commands to an Android emulator console")]
#[command(version)]
struct Args {
    /// Console host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Console port
    #[arg(short, long, default_value = "5554")]
    port: u16,

    /// Per-command timeout in milliseconds
    #[arg(short, long, default_value = "10000")]
    timeout_ms: u64,

    /// Authenticate with this token file before running the command
    #[arg(short, long)]
    auth_file: Option<PathBuf>,

    /// Don't log commands and console output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Authenticate with the console auth token
    Auth {
        /// Token file (defaults to ~/.emulator_console_auth_token)
        #[arg(long)]
        token_file: Option<PathBuf>,
    },

    /// Run an avd subcommand
    Avd {
        /// The subcommand, e.g. `snapshot`
        subcommand: String,

        /// Arguments, split with shell quoting rules
        #[arg(default_value = "")]
        args: String,
    },

    /// Run a network subcommand
    Network {
        /// The subcommand, e.g. `delay`
        subcommand: String,

        /// Arguments, split with shell quoting rules
        #[arg(default_value = "")]
        args: String,
    },

    /// Send raw tokens
    Raw {
        /// Command tokens, family first
        #[arg(required = true)]
        tokens: Vec<String>,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .command_timeout_ms(args.timeout_ms)
        .log_commands(!args.quiet)
        .log_output(!args.quiet)
        .build();

    match run(config, args) {
        Ok(response) => {
            println!("[{}]\n{}", response.outcome, response.body);
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(1)
        }
    }
}

fn run(config: Config, args: Args) -> Result<Response, ConsoleError> {
    let mut console = Console::connect(config)?;

    if let Some(path) = &args.auth_file {
        let response = console.auth(path)?;
        if response.is_failure() {
            return Ok(response);
        }
    }

    let response = match args.command {
        Commands::Auth { token_file } => {
            let path = token_file.map_or_else(default_token_file, Ok)?;
            console.auth(path)
        }
        Commands::Avd { subcommand, args } => console.avd(&subcommand, &args),
        Commands::Network { subcommand, args } => console.network(&subcommand, &args),
        Commands::Raw { tokens } => console.execute(&tokens),
    };

    console.close();
    response
}

fn default_token_file() -> Result<PathBuf, ConsoleError> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(AUTH_TOKEN_FILE))
        .ok_or_else(|| {
            ConsoleError::Config("cannot locate home directory; pass --token-file".to_string())
        })
}
