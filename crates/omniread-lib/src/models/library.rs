use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::Error, models::Work};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LibraryStatus {
    Reading,
    Completed,
    PlanToRead,
    Dropped,
}

impl fmt::Display for LibraryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LibraryStatus::Reading => "READING",
            LibraryStatus::Completed => "COMPLETED",
            LibraryStatus::PlanToRead => "PLAN_TO_READ",
            LibraryStatus::Dropped => "DROPPED",
        };
        f.write_str(s)
    }
}

impl FromStr for LibraryStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "READING" => Ok(LibraryStatus::Reading),
            "COMPLETED" => Ok(LibraryStatus::Completed),
            "PLAN_TO_READ" => Ok(LibraryStatus::PlanToRead),
            "DROPPED" => Ok(LibraryStatus::Dropped),
            _ => Err(Error::UnknownStatus(s.to_string())),
        }
    }
}

/// A work saved to the library, unique per `manga.id`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub manga: Work,
    pub status: LibraryStatus,
    /// milliseconds since unix epoch
    pub added_at: i64,
}
