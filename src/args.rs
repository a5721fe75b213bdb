use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "watchee",
    about = "Analyze an IMDb check-in export and report viewing statistics",
    version,
    long_about = None
)]
pub struct Args {
    /// IMDb user ID to fetch the check-in export for (e.g. ur0123456)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Path to an already-downloaded check-in export (takes precedence
    /// over --user)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Directory for downloaded exports
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Number of top genres and years to display
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    /// Cap on the number of rows aggregated
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print the full check-in listing
    #[arg(long)]
    pub titles: bool,

    /// Keep the downloaded export file after analysis
    #[arg(long)]
    pub keep: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
