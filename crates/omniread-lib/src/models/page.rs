use serde::{Deserialize, Serialize};

/// One page of a chapter, `url` is directly fetchable by the client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageInfo {
    pub index: usize,
    pub url: String,
}
