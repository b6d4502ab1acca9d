use serde::{Deserialize, Serialize};

/// Last position read in a work. The history keeps at most one per `manga_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingProgress {
    pub manga_id: i64,
    pub last_read_chapter_id: String,
    pub last_read_page: usize,
    /// milliseconds since unix epoch
    pub timestamp: i64,
}
