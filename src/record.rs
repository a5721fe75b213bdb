use serde::Deserialize;

use crate::error::FieldError;

/// Category of a check-in entry, derived from the export's "Title type"
/// column. Anything outside the three tracked categories (shorts, videos,
/// documentaries, ...) lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleType {
    Movie,
    TvEpisode,
    TvSeries,
    Other,
}

impl TitleType {
    pub fn from_label(label: &str) -> TitleType {
        match label {
            "Feature Film" => TitleType::Movie,
            "TV Episode" => TitleType::TvEpisode,
            "TV Series" => TitleType::TvSeries,
            _ => TitleType::Other,
        }
    }
}

/// One row of the check-in export, as parsed from CSV. Numeric columns stay
/// raw here; malformed values mean "absent" for the affected metric, never a
/// failed parse of the whole row.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckinRecord {
    #[serde(rename = "position", default)]
    pub position: u64,

    #[serde(rename = "created", default)]
    pub created: String,

    #[serde(rename = "Title", default)]
    pub title: String,

    #[serde(rename = "Title type", default)]
    pub title_type: String,

    #[serde(rename = "Genres", default)]
    pub genres: String,

    #[serde(rename = "Year", default)]
    pub year: String,

    #[serde(rename = "IMDb Rating", default)]
    pub imdb_rating: String,

    #[serde(rename = "You rated", default)]
    pub you_rated: String,

    #[serde(rename = "URL", default)]
    pub url: String,
}

impl CheckinRecord {
    pub fn kind(&self) -> TitleType {
        TitleType::from_label(&self.title_type)
    }

    /// The site's rating for the title, when present and within the 0-10
    /// scale.
    pub fn imdb_rating(&self) -> Result<f64, FieldError> {
        parse_rating("IMDb Rating", &self.imdb_rating)
    }

    /// The user's own rating, same scale as [`Self::imdb_rating`].
    pub fn your_rating(&self) -> Result<f64, FieldError> {
        parse_rating("You rated", &self.you_rated)
    }

    pub fn year(&self) -> Result<i32, FieldError> {
        let raw = self.year.trim();
        if raw.is_empty() {
            return Err(FieldError::Missing("Year"));
        }
        raw.parse().map_err(|_| FieldError::Invalid {
            field: "Year",
            value: raw.to_string(),
        })
    }

    /// Genres as listed in the export, a ", "-delimited field. Empty
    /// segments are dropped.
    pub fn genre_list(&self) -> Vec<&str> {
        self.genres
            .split(", ")
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .collect()
    }
}

fn parse_rating(field: &'static str, raw: &str) -> Result<f64, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::Missing(field));
    }
    match raw.parse::<f64>() {
        Ok(value) if (0.0..=10.0).contains(&value) => Ok(value),
        _ => Err(FieldError::Invalid {
            field,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CheckinRecord {
        CheckinRecord {
            position: 1,
            created: "Sat Jul 13 00:00:00 2013".to_string(),
            title: "The Wire".to_string(),
            title_type: "TV Series".to_string(),
            genres: "Crime, Drama, Thriller".to_string(),
            year: "2002".to_string(),
            imdb_rating: "9.3".to_string(),
            you_rated: String::new(),
            url: "http://www.imdb.com/title/tt0306414/".to_string(),
        }
    }

    #[test]
    fn title_type_labels() {
        assert_eq!(TitleType::from_label("Feature Film"), TitleType::Movie);
        assert_eq!(TitleType::from_label("TV Episode"), TitleType::TvEpisode);
        assert_eq!(TitleType::from_label("TV Series"), TitleType::TvSeries);
        assert_eq!(TitleType::from_label("Documentary"), TitleType::Other);
        assert_eq!(TitleType::from_label(""), TitleType::Other);
    }

    #[test]
    fn rating_parses_in_range() {
        let rec = record();
        assert_eq!(rec.imdb_rating().unwrap(), 9.3);
        assert_eq!(rec.your_rating(), Err(FieldError::Missing("You rated")));
    }

    #[test]
    fn rating_out_of_range_is_invalid() {
        let mut rec = record();
        rec.imdb_rating = "11.5".to_string();
        assert!(matches!(
            rec.imdb_rating(),
            Err(FieldError::Invalid { field: "IMDb Rating", .. })
        ));

        rec.imdb_rating = "N/A".to_string();
        assert!(matches!(rec.imdb_rating(), Err(FieldError::Invalid { .. })));
    }

    #[test]
    fn year_missing_or_malformed() {
        let mut rec = record();
        assert_eq!(rec.year().unwrap(), 2002);

        rec.year = String::new();
        assert_eq!(rec.year(), Err(FieldError::Missing("Year")));

        rec.year = "200x".to_string();
        assert!(matches!(rec.year(), Err(FieldError::Invalid { .. })));
    }

    #[test]
    fn genre_list_drops_empty_segments() {
        let mut rec = record();
        assert_eq!(rec.genre_list(), vec!["Crime", "Drama", "Thriller"]);

        rec.genres = String::new();
        assert!(rec.genre_list().is_empty());
    }
}
