use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::editor::EditOp;
use crate::router::Page;
use crate::section::{Section, SectionValue};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SectionParams {
    /// Section name such as "hero" or "menu", or its storage key ("portfolio-menu").
    pub section: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ApplyEditParams {
    /// Operation applied to the open session's scratch value.
    pub op: EditOp,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AttachImageParams {
    /// Id of the project, blog post or event receiving the image.
    pub item_id: String,
    /// Local path of the image file to inline as a data URI.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RenderRouteParams {
    /// URL fragment such as "#/projects" or "#about".
    pub fragment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SectionInfo {
    pub name: String,
    pub storage_key: String,
    pub label: String,
    pub is_list: bool,
}

impl From<Section> for SectionInfo {
    fn from(section: Section) -> Self {
        Self {
            name: section.name().to_string(),
            storage_key: section.storage_key().to_string(),
            label: section.label().to_string(),
            is_list: section.is_list(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SectionListResponse {
    /// Storage backend in use: "redis", "directory" or "memory".
    pub backend: String,
    pub sections: Vec<SectionInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SectionContentResponse {
    pub section: String,
    pub storage_key: String,
    /// SHA-256 of the returned value in its stored serialization.
    pub fingerprint: Option<String>,
    /// Bare JSON in the persisted layout.
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScratchResponse {
    pub section: String,
    /// Id created by the last operation, when it added a record.
    pub created_id: Option<String>,
    pub value: serde_json::Value,
}

impl ScratchResponse {
    pub fn new(scratch: &SectionValue, created_id: Option<String>) -> Self {
        Self {
            section: scratch.section().name().to_string(),
            created_id,
            value: scratch.to_json(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SaveEditResponse {
    pub section: String,
    pub fingerprint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CancelEditResponse {
    pub cancelled: bool,
    pub section: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderRouteResponse {
    pub page: Page,
    /// Server path rendering the page.
    pub path: String,
}

impl From<Page> for RenderRouteResponse {
    fn from(page: Page) -> Self {
        Self {
            page,
            path: page.path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_params_take_tagged_ops() {
        let params: ApplyEditParams = serde_json::from_value(serde_json::json!({
            "op": {"op": "delete_item", "id": "4"}
        }))
        .unwrap();
        assert_eq!(params.op, EditOp::DeleteItem { id: "4".to_string() });
    }

    #[test]
    fn scratch_response_carries_bare_value() {
        let value = Section::Theme.default_value();
        let response = ScratchResponse::new(&value, None);
        assert_eq!(response.section, "theme");
        assert_eq!(response.value["primary"], "#664dff");
    }
}
