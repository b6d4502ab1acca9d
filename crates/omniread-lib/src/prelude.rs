pub use crate::error::Error;
pub use crate::models::{
    Chapter, CoverImage, FuzzyDate, LibraryEntry, LibraryStatus, MediaFormat, MediaStatus,
    PageInfo, ReadingProgress, SourceTag, Work, WorkTitle, sort_chapters,
};
