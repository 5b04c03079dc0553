// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search, list and delete tools shared by every collection.

use async_trait::async_trait;
use forge_core::ForgeError;
use forge_storage::index::RECENT_VIEW_CAP;
use forge_storage::search::DEFAULT_SEARCH_LIMIT;
use forge_storage::{CollectionDocument, CollectionStore};
use serde_json::{Value, json};

use super::{optional_str, optional_usize};
use crate::tool::{Tool, ToolOutput};

/// Keyword search over one collection.
pub struct SearchTool<D> {
    name: &'static str,
    description: &'static str,
    store: CollectionStore<D>,
}

impl<D: CollectionDocument> SearchTool<D> {
    pub fn new(name: &'static str, description: &'static str, store: CollectionStore<D>) -> Self {
        Self {
            name,
            description,
            store,
        }
    }
}

#[async_trait]
impl<D: CollectionDocument + Send + Sync + 'static> Tool for SearchTool<D> {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search terms; an entry matches if it contains any of them"
                },
                "limit": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Max results to return (default 20)"
                }
            },
            "required": ["query"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError> {
        let query = super::required_str(&input, "query")?;
        let limit = optional_usize(&input, "limit")?.unwrap_or(DEFAULT_SEARCH_LIMIT);
        ToolOutput::json(&self.store.search(&query, limit))
    }
}

/// Numbered view of one collection, for use with [`DeleteTool`].
pub struct ListTool<D> {
    name: &'static str,
    description: &'static str,
    store: CollectionStore<D>,
}

impl<D: CollectionDocument> ListTool<D> {
    pub fn new(name: &'static str, description: &'static str, store: CollectionStore<D>) -> Self {
        Self {
            name,
            description,
            store,
        }
    }
}

#[async_trait]
impl<D: CollectionDocument + Send + Sync + 'static> Tool for ListTool<D> {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Optional filter; shows up to 200 matches"
                },
                "limit": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "How many recent entries to show without a query (default 10)"
                }
            }
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError> {
        let query = optional_str(&input, "query")?;
        let limit = optional_usize(&input, "limit")?.unwrap_or(RECENT_VIEW_CAP);
        let items = self.store.list(query.as_deref(), limit);
        ToolOutput::json(&json!({
            "total": self.store.len(),
            "showing": items.len(),
            "query": query,
            "items": items,
        }))
    }
}

/// Delete-by-index against the view a list call with the same query shows.
pub struct DeleteTool<D> {
    name: &'static str,
    description: &'static str,
    store: CollectionStore<D>,
}

impl<D: CollectionDocument> DeleteTool<D> {
    pub fn new(name: &'static str, description: &'static str, store: CollectionStore<D>) -> Self {
        Self {
            name,
            description,
            store,
        }
    }
}

#[async_trait]
impl<D: CollectionDocument + Send + Sync + 'static> Tool for DeleteTool<D> {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "index": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "1-based index shown by the list call"
                },
                "query": {
                    "type": "string",
                    "description": "The query passed to the list call, if any"
                }
            },
            "required": ["index"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError> {
        let index = optional_usize(&input, "index")?
            .ok_or_else(|| ForgeError::InvalidInput("missing required 'index' parameter".into()))?;
        let query = optional_str(&input, "query")?;

        let deletion = self.store.delete_at(index, query.as_deref())?;
        let mut body = json!({
            "success": true,
            "deleted": deletion.removed,
            "remaining": deletion.remaining,
        });
        if deletion.collisions > 0 {
            body["collisions"] = json!(deletion.collisions);
        }
        ToolOutput::json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use forge_memory::{DeadEnds, NewDeadEnd, types::DeadEndsData};

    fn seeded() -> (tempfile::TempDir, CollectionStore<DeadEndsData>) {
        let dir = tempfile::tempdir().unwrap();
        let dead_ends = DeadEnds::new(dir.path().join("dead-ends.json"));
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        for (n, what) in ["tried X", "tried Y", "tried Z"].iter().enumerate() {
            let new = NewDeadEnd {
                attempted: what.to_string(),
                why_failed: "no".into(),
                ..Default::default()
            };
            dead_ends
                .record(new, base + chrono::Duration::seconds(n as i64))
                .unwrap();
        }
        let store = dead_ends.store().clone();
        (dir, store)
    }

    #[tokio::test]
    async fn list_reports_total_and_items() {
        let (_dir, store) = seeded();
        let tool = ListTool::new("dead_end_list", "list", store);
        let out = tool.invoke(json!({})).await.unwrap();
        let body: Value = serde_json::from_str(&out.content).unwrap();

        assert_eq!(body["total"], 3);
        assert_eq!(body["showing"], 3);
        assert_eq!(body["items"][1]["index"], 2);
        assert_eq!(body["items"][1]["preview"], "tried Y");
        assert!(body["query"].is_null());
    }

    #[tokio::test]
    async fn delete_returns_removed_entry() {
        let (_dir, store) = seeded();
        let tool = DeleteTool::new("dead_end_delete", "delete", store);
        let out = tool.invoke(json!({ "index": 2 })).await.unwrap();
        let body: Value = serde_json::from_str(&out.content).unwrap();

        assert_eq!(body["deleted"]["attempted"], "tried Y");
        assert_eq!(body["remaining"], 2);
        assert!(body.get("collisions").is_none());
    }

    #[tokio::test]
    async fn delete_out_of_range_is_an_error() {
        let (_dir, store) = seeded();
        let tool = DeleteTool::new("dead_end_delete", "delete", store);
        let err = tool.invoke(json!({ "index": 4 })).await.unwrap_err();
        assert_eq!(err.valid_range().as_deref(), Some("1-3"));
    }

    #[tokio::test]
    async fn search_requires_query() {
        let (_dir, store) = seeded();
        let tool = SearchTool::new("dead_end_search", "search", store);
        assert!(tool.invoke(json!({})).await.is_err());

        let out = tool.invoke(json!({ "query": "y" })).await.unwrap();
        let body: Value = serde_json::from_str(&out.content).unwrap();
        // single-character terms are dropped, so this falls back to recent entries
        assert_eq!(body.as_array().unwrap().len(), 3);
    }
}
