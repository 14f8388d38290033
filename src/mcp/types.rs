// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpEntityProperty {
    pub name: String,
    /// 1..=10
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpEntity {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub properties: Vec<McpEntityProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpLocation {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpAction {
    pub name: String,
    pub source: String,
    pub target: String,
    /// Location name, or `unknown`.
    #[serde(default)]
    pub location: String,
    pub passage: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct McpPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct McpEntityNode {
    /// `entity-<name>`; derived from `data.name` when omitted.
    #[serde(default)]
    pub id: Option<String>,
    pub position: McpPosition,
    pub data: McpEntity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct McpLocationNode {
    /// `location-<name>`; derived from `data.name` when omitted.
    #[serde(default)]
    pub id: Option<String>,
    pub position: McpPosition,
    pub data: McpLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpActionEdge {
    /// `action-<index>-<source>-<target>`
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub name: String,
    pub passage: String,
    #[serde(default)]
    pub source_location: String,
    #[serde(default)]
    pub target_location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct McpGraph {
    pub entity_nodes: Vec<McpEntityNode>,
    pub location_nodes: Vec<McpLocationNode>,
    pub action_edges: Vec<McpActionEdge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpSegment {
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum McpTab {
    #[default]
    Entities,
    Locations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpBlock {
    pub runs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct McpDocument {
    pub text: String,
    pub blocks: Vec<McpBlock>,
    pub graph: McpGraph,
    pub is_loading: bool,
    pub is_stale: bool,
    pub selected_tab: McpTab,
    pub selected_node_ids: Vec<String>,
    pub selected_edge_ids: Vec<String>,
    pub segments: SegmentSlotsResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentStatus {
    /// Length of the text in characters.
    pub text_len: u64,
    pub is_loading: bool,
    pub is_stale: bool,
    pub entity_nodes: u64,
    pub location_nodes: u64,
    pub action_edges: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentReadResponse {
    pub document: McpDocument,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentStatusResponse {
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpDroppedAction {
    pub index: u64,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GraphBuildResponse {
    pub status: DocumentStatus,
    pub dropped_actions: Vec<McpDroppedAction>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TextSetParams {
    /// Plain text, installed as a single paragraph. Ignored when `blocks` is given.
    #[serde(default)]
    pub text: Option<String>,
    /// Structured text; blocks are joined with newlines.
    #[serde(default)]
    pub blocks: Option<Vec<McpBlock>>,
    /// Marks the text as rewrite output so it does not mark the document stale.
    #[serde(default)]
    pub from_rewrite: bool,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct VisualsSetParams {
    #[serde(default)]
    pub entities: Vec<McpEntity>,
    #[serde(default)]
    pub locations: Vec<McpLocation>,
    #[serde(default)]
    pub actions: Vec<McpAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SyncResponse {
    /// `extract` or `rewrite`.
    pub pipeline: String,
    pub provider_called: bool,
    /// Why the provider fell back, if it did.
    pub fallback: Option<String>,
    pub dropped_actions: Vec<McpDroppedAction>,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EntityNodesSetParams {
    pub nodes: Vec<McpEntityNode>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LocationNodesSetParams {
    pub nodes: Vec<McpLocationNode>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EdgesSetParams {
    pub edges: Vec<McpActionEdge>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum McpGraphOp {
    MoveNode {
        node_id: String,
        x: f64,
        y: f64,
    },
    ReconnectEdge {
        edge_id: String,
        source: Option<String>,
        target: Option<String>,
    },
    RelabelEdge {
        edge_id: String,
        name: String,
    },
    RemoveEdge {
        edge_id: String,
    },
    RemoveNode {
        node_id: String,
    },
    UpdateEntity {
        node_id: String,
        emoji: Option<String>,
        properties: Option<Vec<McpEntityProperty>>,
    },
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ApplyOpsParams {
    pub ops: Vec<McpGraphOp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ApplyOpsResponse {
    pub applied: u64,
    pub removed: Vec<String>,
    pub updated: Vec<String>,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TabSetParams {
    pub tab: McpTab,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TabSetResponse {
    pub tab: McpTab,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SelectNodesParams {
    pub node_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SelectEdgesParams {
    pub edge_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SelectionResponse {
    pub node_ids: Vec<String>,
    pub edge_ids: Vec<String>,
    /// Requested ids that do not exist in the graph and were skipped.
    pub ignored: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SelectTextParams {
    /// Character offset into the document text; omit both offsets for a collapsed selection.
    #[serde(default)]
    pub start: Option<u64>,
    #[serde(default)]
    pub end: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SegmentSetParams {
    /// `null` clears the slot.
    #[serde(default)]
    pub segment: Option<McpSegment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SegmentSlotsResponse {
    pub highlight: Option<McpSegment>,
    pub filter: Option<McpSegment>,
    /// Hover wins over filter.
    pub active: Option<McpSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpTextHighlight {
    pub action_index: u64,
    /// Character offsets into the document text.
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HighlightsReadResponse {
    pub action_indices: Vec<u64>,
    pub text_ranges: Vec<McpTextHighlight>,
    pub displayed_edge_ids: Vec<String>,
    /// Actions whose passage does not occur verbatim in the text.
    pub missed_action_indices: Vec<u64>,
}
