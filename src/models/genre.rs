//! Genre model

use serde::{Deserialize, Serialize};
use super::GenreId;

/// Genre tag; `name` is unique and compared case-sensitively
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}
