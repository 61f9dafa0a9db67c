// src/types/query.rs

use serde::{Deserialize, Serialize};

/// ソート順序。ソートキーは `opened` の単一キー。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn is_descending(&self) -> bool {
        matches!(self, Self::Desc)
    }
}
