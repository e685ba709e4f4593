use clap::Parser;
use std::path::PathBuf;
use theory_core::{config::Config, RecordStore};
use theory_source::{EmbeddedSource, JsonFileSource, RecordSource};

#[derive(Parser)]
#[command(name = "theory-task", about = "Theory task request form with record autocomplete")]
struct Cli {
    /// JSON record file. Overrides `data.path` from the config; without
    /// either, the built-in records are used.
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Config file to use instead of ~/.config/theory-task/config.toml.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write debug logs to <tmp>/theory-task-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let path = std::env::temp_dir().join("theory-task-debug.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(log = %path.display(), "theory-task debug log started");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "config unreadable, using defaults");
            Config::defaults()
        }),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let data = cli.data.clone().or_else(|| config.data.path().map(PathBuf::from));
    let (store, status) = match data {
        Some(path) => load(&runtime, JsonFileSource::new(path)),
        None => load(&runtime, EmbeddedSource),
    };
    drop(runtime);

    theory_tui::run(&config, store, status)
}

/// Await the one-shot load. A failure is not fatal: the form opens without
/// autocomplete and the status line says why.
fn load<S: RecordSource>(
    runtime: &tokio::runtime::Runtime,
    source: S,
) -> (Option<RecordStore>, Option<String>) {
    match runtime.block_on(source.load()) {
        Ok(store) => (Some(store), None),
        Err(err) => {
            tracing::error!(source = %source.describe(), error = %err, "record source unavailable");
            (None, Some(format!("Records unavailable, autocomplete is off: {err}")))
        }
    }
}
