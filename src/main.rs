mod reporter;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use kpl_syntax::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::reporter::StreamReporter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The KPL program to check.
    file: PathBuf,

    /// Configuration file to use instead of ./kplc.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prints the symbol table once the program is accepted.
    #[arg(long)]
    dump_symbols: bool,

    /// Log filter, e.g. `debug` or `kpl_syntax=trace`.
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = kpl_config::load_config(cli.config.as_ref());
    init_tracing(cli.log_level.as_deref().unwrap_or(&config.log_level));
    tracing::debug!(?config, "configuration loaded");

    let mut reporter = StreamReporter::new(&cli.file, std::io::stderr());

    match kpl_syntax::compile(&cli.file, &mut reporter) {
        Ok(symtab) => {
            tracing::info!(file = %cli.file.display(), "program accepted");
            if cli.dump_symbols || config.dump_symbols {
                print!("{symtab}");
            }
            ExitCode::SUCCESS
        }
        Err(Error::Rejected(_)) => ExitCode::from(1),
        Err(error @ Error::Io { .. }) => {
            eprintln!("kplc: {error}");
            ExitCode::from(2)
        }
    }
}
