//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity, groups products under a concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    /// Concept reference (String ID)
    pub concept_id: String,
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        concept_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            concept_id: concept_id.into(),
            name: name.into(),
            sort_order: 0,
            icon: None,
        }
    }
}
