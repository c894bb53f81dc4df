//! Folio CLI - portfolio backend entrypoint
//!
//! Wires the mail channels and the HTTP server together and provides two
//! execution modes: the API server and a manual mail delivery check.

mod commands;

use clap::{Parser, Subcommand};
use commands::{ServeCommand, TestMailCommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "FOLIO_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: compact, full
    #[arg(
        long,
        default_value = "compact",
        env = "FOLIO_LOG_FORMAT",
        global = true
    )]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve(ServeCommand),
    /// Send a test email through the configured channels
    TestMail(TestMailCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // If RUST_LOG is set, use it directly; otherwise run the folio crates at
    // the requested level and keep dependency noise at warn.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .expect("Invalid RUST_LOG environment variable")
    } else {
        tracing_subscriber::EnvFilter::new(format!(
            "warn,folio_cli={level},folio_core={level},folio_mail={level},tower_http={level}",
            level = cli.log_level
        ))
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match cli.log_format.as_str() {
        "full" => builder.init(),
        _ => builder.compact().init(),
    }

    match cli.command {
        Commands::Serve(cmd) => cmd.execute(),
        Commands::TestMail(cmd) => cmd.execute(),
    }
}
