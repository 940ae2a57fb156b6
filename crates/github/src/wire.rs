//! Response shapes for the documents in [`crate::queries`].
//!
//! Inline fragments that do not apply to a node come back as `{}`, so every
//! fragment-selected member is optional.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ResolveData {
    pub owner: Option<OwnerNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OwnerNode {
    pub project_v2: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectNode {
    pub id: String,
    pub fields: Connection<FieldNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldNode {
    pub id: Option<String>,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Item listing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsData {
    pub node: Option<ItemsNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsNode {
    pub items: Option<ItemPage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemPage {
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<ItemNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemNode {
    pub id: String,
    pub content: Option<ContentNode>,
    pub field_values: Option<Connection<FieldValueNode>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentNode {
    pub title: Option<String>,
}

/// A single-select (`name`) or number (`number`) field value.
#[derive(Debug, Deserialize)]
pub(crate) struct FieldValueNode {
    pub name: Option<String>,
    pub number: Option<f64>,
    pub field: Option<FieldNameNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldNameNode {
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateData {
    pub update_project_v2_item_field_value: Option<UpdatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePayload {
    pub project_v2_item: Option<UpdatedItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdatedItem {
    pub id: String,
}
