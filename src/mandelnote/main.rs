use clap::Parser;
use directories::ProjectDirs;
use mandelnote::api::NotebookApi;
use mandelnote::config::NotebookConfig;
use mandelnote::error::Result;
use mandelnote::store::fs::FileStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod print;
use args::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout only carries the outline.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "mandelnote=warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config();
    let existed = cli.file.exists();
    let api = NotebookApi::open(FileStore::new(), &cli.file, &config)?;
    print::print_notebook(api.notebook(), existed);
    Ok(())
}

fn load_config() -> NotebookConfig {
    let Some(dirs) = ProjectDirs::from("com", "mandelnote", "mandelnote") else {
        return NotebookConfig::default();
    };
    NotebookConfig::load(dirs.config_dir()).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable config: {}", e);
        NotebookConfig::default()
    })
}
