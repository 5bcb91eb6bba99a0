//! The post record as it appears in the JSON collection.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// One blog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub summary: String,
    /// Matched case-insensitively everywhere
    pub category: String,
    #[serde(with = "post_date")]
    pub date: NaiveDate,
    pub image: String,
    pub link: String,
}

impl Post {
    /// Create a post without image or link.
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            category: category.into(),
            date,
            image: String::new(),
            link: String::new(),
        }
    }

    pub fn with_media(mut self, image: impl Into<String>, link: impl Into<String>) -> Self {
        self.image = image.into();
        self.link = link.into();
        self
    }

    /// Human-readable date, e.g. `Wed Jan 03 2024`.
    pub fn display_date(&self) -> String {
        self.date.format("%a %b %d %Y").to_string()
    }
}

/// Parse a post date written either as `YYYY-MM-DD` or as an RFC 3339 timestamp.
///
/// Timestamps keep the calendar date in their own offset.
pub fn parse_post_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

mod post_date {
    use super::parse_post_date;
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_post_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid post date '{}'", raw)))
    }
}
