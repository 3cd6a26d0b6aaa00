use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordKind {
    Blog,
    Project,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Project => "project",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub kind: MediaType,
    pub path: String,
}

const DATETIME_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A publication date as written in the data file together with the instant
/// it denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedDate {
    pub raw: String,
    pub at: DateTime<Utc>,
}

impl PublishedDate {
    /// Accepts RFC 3339, naive ISO datetimes with a `T` or a space between
    /// date and time, plain ISO dates and year-month. Naive values are taken
    /// as UTC.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let at = if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            dt.with_timezone(&Utc)
        } else if let Some(dt) = DATETIME_LAYOUTS
            .iter()
            .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        {
            dt.and_utc()
        } else {
            let date = match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
                Ok(date) => date,
                Err(_) if trimmed.len() == 7 => {
                    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").ok()?
                }
                Err(_) => return None,
            };
            date.and_hms_opt(0, 0, 0)?.and_utc()
        };

        Some(Self {
            raw: raw.to_owned(),
            at,
        })
    }

    /// Long en-US form, e.g. "June 1, 2024".
    pub fn long(&self) -> String {
        self.at.format("%B %-d, %Y").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogRecord {
    pub slug: Option<String>,
    pub title: String,
    pub date: PublishedDate,
    pub summary: String,
    pub category: Option<String>,
    pub media: Option<Media>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub slug: Option<String>,
    pub title: String,
    pub description: String,
    pub tools: Vec<String>,
    pub github: String,
    pub media: Option<Media>,
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_iso_date_as_utc_midnight() {
        let date = PublishedDate::parse("2024-06-01").unwrap();
        assert_eq!(date.at.to_rfc3339(), "2024-06-01T00:00:00+00:00");
        assert_eq!(date.raw, "2024-06-01");
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let date = PublishedDate::parse("2024-06-01T02:00:00+02:00").unwrap();
        assert_eq!(date.at.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn parses_naive_datetime() {
        assert!(PublishedDate::parse("2024-06-01T10:30:00").is_some());
        assert!(PublishedDate::parse("2024-06-01T10:30").is_some());
    }

    #[test]
    fn parses_space_separated_datetime_and_year_month() {
        let date = PublishedDate::parse("2024-06-01 10:00").unwrap();
        assert_eq!(date.at.to_rfc3339(), "2024-06-01T10:00:00+00:00");
        assert!(PublishedDate::parse("2024-06-01 10:00:30.5").is_some());

        let month = PublishedDate::parse("2024-06").unwrap();
        assert_eq!(month.at.to_rfc3339(), "2024-06-01T00:00:00+00:00");
        assert!(PublishedDate::parse("2024-13").is_none());
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert!(PublishedDate::parse("not a date").is_none());
        assert!(PublishedDate::parse("2024-13-01").is_none());
        assert!(PublishedDate::parse("2024-02-30").is_none());
        assert!(PublishedDate::parse("").is_none());
    }

    #[test]
    fn long_format_matches_en_us() {
        let date = PublishedDate::parse("2024-01-05").unwrap();
        assert_eq!(date.long(), "January 5, 2024");
    }
}
