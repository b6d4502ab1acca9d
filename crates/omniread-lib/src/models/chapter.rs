use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Provider that produced a chapter, later used to route page requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceTag {
    Mangadex,
    Comick,
    Mangapill,
    Fallback,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Mangadex => "MANGADEX",
            SourceTag::Comick => "COMICK",
            SourceTag::Mangapill => "MANGAPILL",
            SourceTag::Fallback => "FALLBACK",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MANGADEX" => Ok(SourceTag::Mangadex),
            "COMICK" => Ok(SourceTag::Comick),
            "MANGAPILL" => Ok(SourceTag::Mangapill),
            "FALLBACK" => Ok(SourceTag::Fallback),
            _ => Err(Error::UnknownSource(s.to_string())),
        }
    }
}

/// A type represent chapter, normalized across source
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Identifier scoped to `source`
    pub id: String,
    /// Decimal string, empty for one-shots
    #[serde(default)]
    pub chapter_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    pub source: SourceTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

impl Chapter {
    /// Chapter number used for ordering, `None` unless it is a finite non-negative decimal
    pub fn number(&self) -> Option<f64> {
        self.chapter_number
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && *n >= 0.0)
    }
}

/// Sort chapters by number, highest first.
///
/// Chapters without a parseable number go last and keep their relative order.
pub fn sort_chapters(chapters: &mut [Chapter]) {
    chapters.sort_by(|a, b| match (a.number(), b.number()) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
