use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mandelnote")]
#[command(version)]
#[command(about = "Fractal note-taking: cards in an outline, stored as Markdown", long_about = None)]
pub struct Cli {
    /// Notebook file to open (created on first save if it does not exist)
    pub file: PathBuf,
}
