/// Result of matching a catalog work against the chapter source.
///
/// A missing mapping means the work was never resolved, `NotFound` means it was
/// resolved and the chapter source had no match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapping {
    Found(String),
    NotFound,
}

impl Mapping {
    pub fn source_id(&self) -> Option<&str> {
        match self {
            Mapping::Found(id) => Some(id),
            Mapping::NotFound => None,
        }
    }
}
