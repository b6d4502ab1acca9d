use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaFormat {
    Manga,
    Novel,
    OneShot,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaStatus {
    Finished,
    Releasing,
    NotYetReleased,
    Cancelled,
    Hiatus,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    pub extra_large: Option<String>,
    pub large: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FuzzyDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// A titled series as known to the metadata catalog.
///
/// The core only reads `id` and the title variants, everything else is carried for
/// the presentation layer and the persisted library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub id: i64,
    #[serde(default)]
    pub id_mal: Option<i64>,
    #[serde(default)]
    pub title: WorkTitle,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image: CoverImage,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub format: Option<MediaFormat>,
    #[serde(default)]
    pub status: Option<MediaStatus>,
    #[serde(default)]
    pub chapters: Option<i64>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub average_score: Option<i64>,
    #[serde(default)]
    pub popularity: Option<i64>,
    #[serde(default)]
    pub start_date: Option<FuzzyDate>,
}

impl Work {
    /// English title if the catalog has one, then romaji, then native
    pub fn display_title(&self) -> &str {
        [
            self.title.english.as_deref(),
            self.title.romaji.as_deref(),
            self.title.native.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|title| !title.trim().is_empty())
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display_title_prefers_english() {
        let work = Work {
            id: 30013,
            title: WorkTitle {
                romaji: Some("One Piece".to_string()),
                english: Some("One Piece (EN)".to_string()),
                native: Some("ONE PIECE".to_string()),
            },
            ..Default::default()
        };

        assert_eq!(work.display_title(), "One Piece (EN)");
    }

    #[test]
    fn test_display_title_skips_blank_english() {
        let work = Work {
            id: 1,
            title: WorkTitle {
                romaji: Some("Shingeki no Kyojin".to_string()),
                english: Some("".to_string()),
                native: None,
            },
            ..Default::default()
        };

        assert_eq!(work.display_title(), "Shingeki no Kyojin");
        assert_eq!(Work::default().display_title(), "");
    }

    #[test]
    fn test_deserialize_catalog_media() {
        let raw = r##"{
            "id": 30002,
            "idMal": 2,
            "title": {"romaji": "Berserk", "english": "Berserk", "native": "ベルセルク"},
            "description": "Guts",
            "coverImage": {"extraLarge": "https://img/xl.jpg", "large": "https://img/l.jpg", "color": "#e4a15d"},
            "bannerImage": null,
            "format": "MANGA",
            "status": "HIATUS",
            "chapters": null,
            "genres": ["Action", "Drama"],
            "averageScore": 93,
            "popularity": 200000,
            "startDate": {"year": 1989, "month": 8, "day": 25}
        }"##;

        let work: Work = serde_json::from_str(raw).unwrap();
        assert_eq!(work.id, 30002);
        assert_eq!(work.format, Some(MediaFormat::Manga));
        assert_eq!(work.status, Some(MediaStatus::Hiatus));
        assert_eq!(work.genres.len(), 2);
        assert_eq!(work.start_date.and_then(|d| d.year), Some(1989));
        assert_eq!(work.cover_image.color.as_deref(), Some("#e4a15d"));
    }

    #[test]
    fn test_unknown_format_is_other() {
        let work: Work = serde_json::from_str(r#"{"id": 5, "format": "LIGHT_NOVEL"}"#).unwrap();
        assert_eq!(work.format, Some(MediaFormat::Other));
    }
}
