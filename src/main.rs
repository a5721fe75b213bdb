use anyhow::Result;
use clap::Parser;
use tracing::error;

use watchee::checkin::{analyze_checkins, print_report};
use watchee::utils::{setup_logging, validate_args};
use watchee::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    validate_args(&args)?;

    match analyze_checkins(&args) {
        Ok(analysis) => {
            print_report(&analysis, &args);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Analysis failed");
            std::process::exit(1);
        }
    }
}
