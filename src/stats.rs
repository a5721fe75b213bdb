use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::InputError;
use crate::freq::FrequencyTable;
use crate::record::{CheckinRecord, TitleType};

/// Running sum/extrema for one rating column. `min`/`max` stay `None` until
/// a parseable rating is seen, so an unrated history reports N/A instead of
/// sentinel values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingStats {
    pub sum: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub rated: u32,
}

impl RatingStats {
    fn observe(&mut self, rating: f64) {
        self.sum += rating;
        self.rated += 1;
        self.min = Some(self.min.map_or(rating, |m| m.min(rating)));
        self.max = Some(self.max.map_or(rating, |m| m.max(rating)));
    }

    /// Average over rows that actually carried a rating.
    pub fn average(&self) -> Option<f64> {
        (self.rated > 0).then(|| self.sum / f64::from(self.rated))
    }
}

/// Finalized statistics for one check-in history. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub total_seen: u32,
    /// Title -> URL for every entry seen; last write wins when a title
    /// repeats. Recurring TV-series entries are NOT deduplicated, matching
    /// the upstream export.
    pub titles_seen: HashMap<String, String>,
    pub movies_seen: u32,
    pub tv_episodes_seen: u32,
    pub tv_series_seen: u32,
    pub other_seen: u32,
    /// IMDb rating average with every row seen in the denominator, rated or
    /// not. This reproduces the upstream behavior; the per-rated-row average
    /// is available as `imdb_ratings.average()`.
    pub imdb_rating_average: Option<f64>,
    pub imdb_ratings: RatingStats,
    pub your_ratings: RatingStats,
    pub tv_genres: FrequencyTable<String>,
    pub movie_genres: FrequencyTable<String>,
    pub all_genres: FrequencyTable<String>,
    pub tv_years: FrequencyTable<i32>,
    pub movie_years: FrequencyTable<i32>,
    pub all_years: FrequencyTable<i32>,
}

#[derive(Debug, Default)]
struct Accumulator {
    total_seen: u32,
    titles_seen: HashMap<String, String>,
    movies_seen: u32,
    tv_episodes_seen: u32,
    tv_series_seen: u32,
    other_seen: u32,
    imdb_ratings: RatingStats,
    your_ratings: RatingStats,
    tv_genres: FrequencyTable<String>,
    movie_genres: FrequencyTable<String>,
    tv_years: FrequencyTable<i32>,
    movie_years: FrequencyTable<i32>,
}

impl Accumulator {
    fn observe(&mut self, record: &CheckinRecord) {
        self.total_seen += 1;
        self.titles_seen
            .insert(record.title.clone(), record.url.clone());

        let kind = record.kind();
        match kind {
            TitleType::Movie => self.movies_seen += 1,
            TitleType::TvEpisode => self.tv_episodes_seen += 1,
            TitleType::TvSeries => self.tv_series_seen += 1,
            TitleType::Other => self.other_seen += 1,
        }

        match record.imdb_rating() {
            Ok(rating) => self.imdb_ratings.observe(rating),
            Err(err) => {
                debug!(action = "skip_field", component = "aggregate", title = %record.title, error = %err, "IMDb rating treated as absent");
            }
        }
        if let Ok(rating) = record.your_rating() {
            self.your_ratings.observe(rating);
        }

        // Genre and year histograms are split by category; `Other` rows and
        // plain TV-series entries feed neither side, matching upstream.
        let (genres, years) = match kind {
            TitleType::TvEpisode => (&mut self.tv_genres, &mut self.tv_years),
            TitleType::Movie => (&mut self.movie_genres, &mut self.movie_years),
            _ => return,
        };
        for genre in record.genre_list() {
            genres.tally(genre.to_string());
        }
        match record.year() {
            Ok(year) => years.tally(year),
            Err(err) => {
                debug!(action = "skip_field", component = "aggregate", title = %record.title, error = %err, "year treated as absent");
            }
        }
    }

    fn finalize(self) -> Report {
        // One merge at the end; merging after every row would produce the
        // same tables since the merge is associative.
        let all_genres = FrequencyTable::merge(&self.tv_genres, &self.movie_genres);
        let all_years = FrequencyTable::merge(&self.tv_years, &self.movie_years);

        let imdb_rating_average =
            (self.total_seen > 0).then(|| self.imdb_ratings.sum / f64::from(self.total_seen));

        Report {
            total_seen: self.total_seen,
            titles_seen: self.titles_seen,
            movies_seen: self.movies_seen,
            tv_episodes_seen: self.tv_episodes_seen,
            tv_series_seen: self.tv_series_seen,
            other_seen: self.other_seen,
            imdb_rating_average,
            imdb_ratings: self.imdb_ratings,
            your_ratings: self.your_ratings,
            tv_genres: self.tv_genres,
            movie_genres: self.movie_genres,
            all_genres,
            tv_years: self.tv_years,
            movie_years: self.movie_years,
            all_years,
        }
    }
}

/// Single forward pass over the (already ordered) check-in rows. Pure: no
/// I/O, no ambient state, same input always yields the same report.
pub fn aggregate(records: &[CheckinRecord]) -> Result<Report, InputError> {
    if records.is_empty() {
        return Err(InputError::Empty);
    }
    if records.iter().all(|r| r.kind() == TitleType::Other) {
        return Err(InputError::NoRecognizedTypes);
    }

    let acc = records.iter().fold(Accumulator::default(), |mut acc, rec| {
        acc.observe(rec);
        acc
    });
    let report = acc.finalize();

    info!(
        action = "complete",
        component = "aggregate",
        total_seen = report.total_seen,
        movies = report.movies_seen,
        tv_episodes = report.tv_episodes_seen,
        tv_series = report.tv_series_seen,
        "Aggregation completed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(title: &str, title_type: &str, genres: &str, year: &str, rating: &str) -> CheckinRecord {
        CheckinRecord {
            position: 0,
            created: String::new(),
            title: title.to_string(),
            title_type: title_type.to_string(),
            genres: genres.to_string(),
            year: year.to_string(),
            imdb_rating: rating.to_string(),
            you_rated: String::new(),
            url: format!("http://www.imdb.com/title/{title}/"),
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(aggregate(&[]), Err(InputError::Empty));
    }

    #[test]
    fn all_unrecognized_types_are_rejected() {
        let rows = vec![
            rec("A", "Documentary", "History", "2001", "7.0"),
            rec("B", "Short", "Comedy", "2002", "6.0"),
        ];
        assert_eq!(aggregate(&rows), Err(InputError::NoRecognizedTypes));
    }

    #[test]
    fn mixed_history_scenario() {
        let rows = vec![
            rec("A", "TV Episode", "Drama, Crime", "2010", "8.0"),
            rec("B", "Feature Film", "Drama", "2012", "6.0"),
        ];
        let report = aggregate(&rows).unwrap();

        assert_eq!(report.total_seen, 2);
        assert_eq!(report.movies_seen, 1);
        assert_eq!(report.tv_episodes_seen, 1);
        assert_eq!(report.tv_series_seen, 0);
        assert_eq!(report.imdb_rating_average, Some(7.0));
        assert_eq!(report.imdb_ratings.min, Some(6.0));
        assert_eq!(report.imdb_ratings.max, Some(8.0));
        assert_eq!(report.all_genres.get(&"Drama".to_string()), 2);
        assert_eq!(report.all_genres.get(&"Crime".to_string()), 1);
        assert_eq!(report.all_years.get(&2010), 1);
        assert_eq!(report.all_years.get(&2012), 1);
    }

    #[test]
    fn single_row_extrema_collapse() {
        let rows = vec![rec("A", "Feature Film", "Drama", "1999", "7.5")];
        let report = aggregate(&rows).unwrap();

        assert_eq!(report.imdb_ratings.min, Some(7.5));
        assert_eq!(report.imdb_ratings.max, Some(7.5));
        assert_eq!(report.imdb_rating_average, Some(7.5));
        assert_eq!(report.imdb_ratings.average(), Some(7.5));
    }

    #[test]
    fn unrated_rows_inflate_the_average_denominator() {
        // Pins the upstream behavior: the average divides by every row seen,
        // while min/max only consider rows that carry a rating.
        let rows = vec![
            rec("A", "Feature Film", "Drama", "2010", "8.0"),
            rec("B", "Feature Film", "Drama", "2011", ""),
        ];
        let report = aggregate(&rows).unwrap();

        assert_eq!(report.total_seen, 2);
        assert_eq!(report.imdb_ratings.rated, 1);
        assert_eq!(report.imdb_ratings.min, Some(8.0));
        assert_eq!(report.imdb_ratings.max, Some(8.0));
        assert_eq!(report.imdb_rating_average, Some(4.0));
        assert_eq!(report.imdb_ratings.average(), Some(8.0));
    }

    #[test]
    fn type_counters_sum_to_total() {
        let rows = vec![
            rec("A", "TV Episode", "Drama", "2010", "8.0"),
            rec("B", "Feature Film", "Drama", "2012", "6.0"),
            rec("C", "TV Series", "Crime", "2008", "9.0"),
            rec("D", "Documentary", "History", "2015", "7.0"),
        ];
        let report = aggregate(&rows).unwrap();

        assert_eq!(
            report.movies_seen + report.tv_episodes_seen + report.tv_series_seen + report.other_seen,
            report.total_seen
        );
        assert_eq!(report.other_seen, 1);
    }

    #[test]
    fn combined_tables_obey_the_merge_law() {
        let rows = vec![
            rec("A", "TV Episode", "Drama, Crime", "2010", "8.0"),
            rec("B", "Feature Film", "Drama, Thriller", "2010", "6.0"),
            rec("C", "TV Episode", "Drama", "2011", "7.0"),
        ];
        let report = aggregate(&rows).unwrap();

        for (genre, _) in report.all_genres.iter() {
            assert_eq!(
                report.all_genres.get(genre),
                report.tv_genres.get(genre) + report.movie_genres.get(genre)
            );
        }
        for (year, _) in report.all_years.iter() {
            assert_eq!(
                report.all_years.get(year),
                report.tv_years.get(year) + report.movie_years.get(year)
            );
        }
    }

    #[test]
    fn other_and_series_rows_feed_no_histograms() {
        let rows = vec![
            rec("A", "TV Series", "Crime", "2008", "9.0"),
            rec("B", "Documentary", "History", "2015", "7.0"),
            rec("C", "Feature Film", "Drama", "2012", "6.0"),
        ];
        let report = aggregate(&rows).unwrap();

        assert_eq!(report.all_genres.get(&"Crime".to_string()), 0);
        assert_eq!(report.all_genres.get(&"History".to_string()), 0);
        assert_eq!(report.all_years.get(&2008), 0);
        assert_eq!(report.all_years.get(&2015), 0);
        assert_eq!(report.all_genres.get(&"Drama".to_string()), 1);
    }

    #[test]
    fn repeated_titles_keep_the_last_url() {
        let mut first = rec("Lost", "TV Episode", "Drama", "2004", "8.0");
        first.url = "http://www.imdb.com/title/tt0411008/".to_string();
        let mut second = rec("Lost", "TV Episode", "Drama", "2004", "8.0");
        second.url = "http://www.imdb.com/title/tt0994359/".to_string();

        let report = aggregate(&[first, second]).unwrap();
        assert_eq!(report.total_seen, 2);
        assert_eq!(report.titles_seen.len(), 1);
        assert_eq!(
            report.titles_seen["Lost"],
            "http://www.imdb.com/title/tt0994359/"
        );
    }

    #[test]
    fn aggregation_is_idempotent() {
        let rows = vec![
            rec("A", "TV Episode", "Drama, Crime", "2010", "8.0"),
            rec("B", "Feature Film", "Drama", "2012", ""),
            rec("C", "Documentary", "History", "bad-year", "5.5"),
        ];
        assert_eq!(aggregate(&rows).unwrap(), aggregate(&rows).unwrap());
    }

    #[test]
    fn malformed_year_is_skipped_for_histograms_only() {
        let rows = vec![rec("A", "Feature Film", "Drama", "20xx", "6.0")];
        let report = aggregate(&rows).unwrap();

        assert!(report.all_years.is_empty());
        assert_eq!(report.all_genres.get(&"Drama".to_string()), 1);
        assert_eq!(report.total_seen, 1);
    }
}
