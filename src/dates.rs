use chrono::{Datelike, NaiveDate, NaiveDateTime};

// IMDb writes the "created" column in ctime form, e.g.
// "Sat Jul 13 00:00:00 2013".
const CREATED_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Parse a check-in timestamp from the export's "created" column. Returns
/// `None` for anything that does not match the ctime layout.
pub fn parse_created(raw: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(raw.trim(), CREATED_FORMAT)
        .ok()
        .map(|dt| dt.date())
}

/// Compact YYYYMMDD rendering used for sortable date keys.
pub fn compact(date: NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ctime_created_column() {
        let date = parse_created("Sat Jul 13 00:00:00 2013").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2013, 7, 13).unwrap());
        assert_eq!(compact(date), "20130713");
    }

    #[test]
    fn parses_space_padded_day() {
        let date = parse_created("Wed Jul  3 12:30:05 2013").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2013, 7, 3).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_created(""), None);
        assert_eq!(parse_created("2013-07-13"), None);
        assert_eq!(parse_created("not a date"), None);
    }
}
