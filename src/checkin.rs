use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::stats::{RatingStats, Report};
use crate::{fetch, ingest, stats, utils, Args};

/// Everything one analysis run produces: the aggregated report plus the
/// check-in date range from the export's timestamps.
#[derive(Debug)]
pub struct Analysis {
    pub report: Report,
    pub date_range: Option<(NaiveDate, NaiveDate, i64)>,
}

/// Resolve the export (local file or downloaded for a user ID), parse it and
/// aggregate the statistics. Downloaded exports are removed afterwards
/// unless `--keep` is set.
pub fn analyze_checkins(args: &Args) -> Result<Analysis> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "analysis", "Starting check-in analysis");

    let (path, downloaded) = match (&args.file, &args.user) {
        (Some(file), _) => (file.clone(), false),
        (None, Some(user)) => (fetch::download_export(user, &args.data_dir)?, true),
        (None, None) => anyhow::bail!("Either --file or --user is required"),
    };

    let outcome = analyze_export(&path, args);

    if downloaded && !args.keep {
        fetch::remove_export(&path);
    }

    let total_time = total_start_time.elapsed();
    info!(
        action = "complete",
        component = "analysis",
        duration_ms = total_time.as_millis(),
        "Analysis completed"
    );
    outcome
}

fn analyze_export(path: &Path, args: &Args) -> Result<Analysis> {
    let mut records = ingest::read_checkins(path)?;

    // Row cap is applied here, before the aggregator ever sees the data.
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    let date_range = ingest::checkin_date_range(&records);
    let report = stats::aggregate(&records)?;
    Ok(Analysis { report, date_range })
}

fn format_rating(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}

fn print_rating_line(label: &str, ratings: &RatingStats) {
    println!(
        "{}: avg {} (min {}, max {}, {} rated)",
        label,
        format_rating(ratings.average()),
        format_rating(ratings.min),
        format_rating(ratings.max),
        utils::format_number(ratings.rated)
    );
}

pub fn print_report(analysis: &Analysis, args: &Args) {
    let report = &analysis.report;

    println!("\n--- IMDb Check-In Statistics ---");

    if let Some((earliest, latest, days_between)) = &analysis.date_range {
        println!(
            "Date range: {} to {} ({} days)",
            earliest.format("%B %-d, %Y"),
            latest.format("%B %-d, %Y"),
            utils::format_number(*days_between as u32)
        );
    }

    println!(
        "Check-ins: {} ({} distinct titles)",
        utils::format_number(report.total_seen),
        utils::format_number(report.titles_seen.len() as u32)
    );
    println!(
        "Movies: {}, TV episodes: {}, TV series: {}, other: {}",
        utils::format_number(report.movies_seen),
        utils::format_number(report.tv_episodes_seen),
        utils::format_number(report.tv_series_seen),
        utils::format_number(report.other_seen)
    );

    // The first average divides by every check-in, rated or not, like the
    // site's own export tooling; the rated-only average follows in the
    // detail line.
    println!(
        "IMDb rating average (all check-ins): {}",
        format_rating(report.imdb_rating_average)
    );
    print_rating_line("IMDb rating", &report.imdb_ratings);
    if report.your_ratings.rated > 0 {
        print_rating_line("Your rating", &report.your_ratings);
    }

    let top = args.top;
    if !report.all_genres.is_empty() {
        println!(
            "\nTop {} genres:",
            std::cmp::min(top, report.all_genres.len())
        );
        for (genre, count) in report.all_genres.sorted().into_iter().take(top) {
            println!(
                "- {}: {} check-ins (TV {}, movies {})",
                genre,
                utils::format_number(count),
                utils::format_number(report.tv_genres.get(genre)),
                utils::format_number(report.movie_genres.get(genre))
            );
        }
    }

    if !report.all_years.is_empty() {
        println!(
            "\nTop {} release years:",
            std::cmp::min(top, report.all_years.len())
        );
        for (year, count) in report.all_years.sorted().into_iter().take(top) {
            println!(
                "- {}: {} check-ins (TV {}, movies {})",
                year,
                utils::format_number(count),
                utils::format_number(report.tv_years.get(year)),
                utils::format_number(report.movie_years.get(year))
            );
        }
    }

    if args.titles {
        println!("\nTitles seen:");
        let mut titles: Vec<(&String, &String)> = report.titles_seen.iter().collect();
        titles.sort();
        for (title, url) in titles {
            println!("- {title} ({url})");
        }
    }
}
