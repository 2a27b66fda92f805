use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    cli::run(cli::Cli::parse(), &mut std::io::stdout().lock())
}

/// Stderr subscriber filtered by `RUST_LOG` (default `info`), with `log`
/// records from the library forwarded into it.
fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;
    Ok(())
}
