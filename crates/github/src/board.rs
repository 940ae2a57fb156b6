//! [`BoardGateway`] implementation for GitHub Projects (v2).

use async_trait::async_trait;
use estimate::{
    BoardGateway, BoardTarget, FieldDescriptor, FieldId, GatewayError, ItemId, ProjectId,
    ResolvedFields, WorkItem,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::queries;
use crate::transport::{GraphQlError, GraphQlTransport, TransportError};
use crate::wire::{ItemNode, ItemsData, ResolveData, UpdateData};

const SIZE_FIELD: &str = "Size";
const RISK_FIELD: &str = "Risk";

impl From<TransportError> for GatewayError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Http(_) | TransportError::Status { .. } => GatewayError::Transport {
                message: e.to_string(),
            },
            TransportError::Decode(_) | TransportError::GraphQl(_) | TransportError::MissingData => {
                GatewayError::Protocol {
                    message: e.to_string(),
                }
            }
        }
    }
}

/// A GitHub project board reached through a [`GraphQlTransport`].
#[derive(Debug, Clone)]
pub struct GitHubProjectBoard<T> {
    transport: T,
}

impl<T: GraphQlTransport> GitHubProjectBoard<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn query<D: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
    ) -> Result<D, GatewayError> {
        let data = self.transport.execute(document, variables).await?;
        decode(data)
    }
}

fn decode<D: DeserializeOwned>(data: Value) -> Result<D, GatewayError> {
    serde_json::from_value(data).map_err(|e| GatewayError::Protocol {
        message: format!("unexpected response shape: {e}"),
    })
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Converts one listed item, keeping only the Size, Risk, and estimate values.
fn to_work_item(node: ItemNode, estimate_field: &str) -> Result<WorkItem, GatewayError> {
    let id = ItemId::new(node.id).ok_or_else(|| GatewayError::Protocol {
        message: "project item without an id".to_string(),
    })?;
    let title = node.content.and_then(|c| c.title);
    let mut item = WorkItem::new(id, title);

    let values = node
        .field_values
        .map(|c| c.nodes)
        .unwrap_or_default()
        .into_iter()
        .flatten();
    // The first value listed for a field wins; later duplicates are ignored.
    let (mut seen_size, mut seen_risk, mut seen_estimate) = (false, false, false);
    for value in values {
        let Some(field_name) = value.field.and_then(|f| f.name) else {
            continue;
        };
        if same_name(&field_name, SIZE_FIELD) {
            if !std::mem::replace(&mut seen_size, true) {
                if let Some(label) = value.name {
                    item = item.with_size_label(label);
                }
            }
        } else if same_name(&field_name, RISK_FIELD) {
            if !std::mem::replace(&mut seen_risk, true) {
                if let Some(label) = value.name {
                    item = item.with_risk_label(label);
                }
            }
        } else if same_name(&field_name, estimate_field) {
            if !std::mem::replace(&mut seen_estimate, true) {
                if let Some(number) = value.number {
                    item = item.with_current_estimate(number);
                }
            }
        }
    }
    Ok(item)
}

#[async_trait]
impl<T: GraphQlTransport> BoardGateway for GitHubProjectBoard<T> {
    async fn resolve_field_ids(
        &self,
        target: &BoardTarget,
    ) -> Result<ResolvedFields, GatewayError> {
        let not_found = || GatewayError::ProjectNotFound {
            owner_kind: target.owner_kind,
            owner: target.owner.clone(),
            number: target.project_number,
        };

        let variables = json!({
            "owner": target.owner,
            "number": target.project_number.as_u64(),
        });
        let document = queries::resolve_project(target.owner_kind);
        // GitHub reports an unknown login or project number as NOT_FOUND errors.
        let data: ResolveData = match self.transport.execute(&document, variables).await {
            Ok(data) => decode(data)?,
            Err(TransportError::GraphQl(errors)) if errors.iter().all(GraphQlError::is_not_found) => {
                return Err(not_found());
            }
            Err(e) => return Err(e.into()),
        };
        let project = data
            .owner
            .and_then(|o| o.project_v2)
            .ok_or_else(not_found)?;
        let project_id = ProjectId::new(project.id).ok_or_else(not_found)?;

        let estimate_field = project
            .fields
            .nodes
            .into_iter()
            .flatten()
            .find_map(|f| match (f.id, f.name) {
                (Some(id), Some(name)) if same_name(&name, &target.estimate_field) => {
                    FieldId::new(id).map(|id| FieldDescriptor { id, name })
                }
                _ => None,
            })
            .ok_or_else(|| GatewayError::FieldNotFound {
                field: target.estimate_field.clone(),
            })?;

        Ok(ResolvedFields {
            project_id,
            estimate_field,
        })
    }

    async fn fetch_all_items(
        &self,
        project_id: &ProjectId,
        estimate_field: &str,
    ) -> Result<Vec<WorkItem>, GatewayError> {
        let document = queries::list_items();
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let variables = json!({ "projectId": project_id.as_str(), "cursor": cursor });
            let data: ItemsData = self.query(&document, variables).await?;
            let page = data
                .node
                .and_then(|n| n.items)
                .ok_or_else(|| GatewayError::Protocol {
                    message: format!("node {project_id} is not a project"),
                })?;

            let page_len = page.nodes.len();
            for node in page.nodes.into_iter().flatten() {
                items.push(to_work_item(node, estimate_field)?);
            }
            debug!(page_items = page_len, fetched = items.len(), "Fetched item page");

            if !page.page_info.has_next_page {
                break;
            }
            cursor = Some(page.page_info.end_cursor.ok_or_else(|| GatewayError::Protocol {
                message: "page reports more items but no end cursor".to_string(),
            })?);
        }

        Ok(items)
    }

    async fn update_estimate(
        &self,
        project_id: &ProjectId,
        item_id: &ItemId,
        field_id: &FieldId,
        value: f64,
    ) -> Result<(), GatewayError> {
        let variables = json!({
            "projectId": project_id.as_str(),
            "itemId": item_id.as_str(),
            "fieldId": field_id.as_str(),
            "value": value,
        });
        let data: UpdateData = self.query(queries::UPDATE_NUMBER_FIELD, variables).await?;
        let updated = data
            .update_project_v2_item_field_value
            .and_then(|p| p.project_v2_item)
            .ok_or_else(|| GatewayError::Protocol {
                message: format!("update of item {item_id} returned no item"),
            })?;
        debug!(item_id = %updated.id, value, "Estimate written");
        Ok(())
    }
}
