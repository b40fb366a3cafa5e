use serde::{Deserialize, Serialize};

/// Disabled options for one filter dropdown, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownState {
    pub id: String,
    #[serde(default)]
    pub disabled_options: Vec<String>,
}

/// Decoded body of a content request. Result items stay opaque; only the
/// render collaborator looks inside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_state: Option<Vec<DropdownState>>,
}

impl ResultPayload {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
