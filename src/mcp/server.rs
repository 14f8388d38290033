// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};

use crate::build::{DropReason, DroppedAction};
use crate::model::{
    fixtures, Action, ActionEdge, ActionEdgeData, Block, Document, EdgeId, Entity, EntityNode,
    EntityProperty, GraphState, InlineRun, Location, LocationNode, NodeId, Position, RichText,
    SampleStory, Segment, Tab, Visuals, UNKNOWN_LOCATION,
};
use crate::ops::{ApplyError, EntityPatch, GraphOp};
use crate::query::{
    byte_range_to_chars, displayed_edges, highlighted_action_indices, locate_actions,
    text_highlights,
};
use crate::sync::{EditOrigin, SyncError, SyncOrchestrator, SyncReport};

use super::types::*;

#[derive(Clone)]
pub struct InkgraphMcp {
    sync: SyncOrchestrator,
    sample: SampleStory,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl InkgraphMcp {
    pub fn new(sync: SyncOrchestrator) -> Self {
        Self::new_with_sample(sync, fixtures::alice_in_wonderland())
    }

    pub fn new_with_sample(sync: SyncOrchestrator, sample: SampleStory) -> Self {
        Self { sync, sample, tool_router: Self::tool_router() }
    }

    pub fn orchestrator(&self) -> &SyncOrchestrator {
        &self.sync
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    async fn status(&self) -> DocumentStatus {
        self.sync.read(document_status).await
    }

    /// Read the whole document: text, structured blocks, graph, staleness, loading, selection
    /// and segments. Start here.
    #[tool(name = "document.read")]
    async fn document_read(&self) -> Result<Json<DocumentReadResponse>, ErrorData> {
        let document = self.sync.read(mcp_document).await;
        Ok(Json(DocumentReadResponse { document }))
    }

    /// Reset to an empty, clean document.
    #[tool(name = "document.reset")]
    async fn document_reset(&self) -> Result<Json<DocumentStatusResponse>, ErrorData> {
        self.sync.reset().await;
        Ok(Json(DocumentStatusResponse { status: self.status().await }))
    }

    /// Replace the document with the bundled sample story and its pre-extracted graph; the
    /// result is clean, as after a successful extraction.
    #[tool(name = "document.load_sample")]
    async fn document_load_sample(&self) -> Result<Json<GraphBuildResponse>, ErrorData> {
        let dropped = self.sync.load_sample(&self.sample).await;
        Ok(Json(GraphBuildResponse {
            status: self.status().await,
            dropped_actions: mcp_dropped(&dropped),
        }))
    }

    /// Replace the text (plain `text` or structured `blocks`); a changed user edit marks the
    /// document stale, `from_rewrite` never does.
    #[tool(name = "text.set")]
    async fn text_set(
        &self,
        params: Parameters<TextSetParams>,
    ) -> Result<Json<DocumentStatusResponse>, ErrorData> {
        let TextSetParams { text, blocks, from_rewrite } = params.0;
        let origin = if from_rewrite { EditOrigin::Rewrite } else { EditOrigin::User };

        let rich_text = match (blocks, text) {
            (Some(blocks), _) => RichText::new(
                blocks
                    .into_iter()
                    .map(|block| Block::new(block.runs.into_iter().map(InlineRun::new).collect()))
                    .collect(),
            ),
            (None, Some(text)) => RichText::from_plain(text),
            (None, None) => {
                return Err(ErrorData::invalid_params("provide `text` or `blocks`", None));
            }
        };
        self.sync.set_rich_text(rich_text, origin).await;

        Ok(Json(DocumentStatusResponse { status: self.status().await }))
    }

    /// Rebuild the graph from entities, locations and ordered actions, as if extracted; actions
    /// naming unknown entities are dropped and reported.
    #[tool(name = "visuals.set")]
    async fn visuals_set(
        &self,
        params: Parameters<VisualsSetParams>,
    ) -> Result<Json<GraphBuildResponse>, ErrorData> {
        let visuals = visuals_from_mcp(&params.0);
        let dropped = self.sync.set_visuals(&visuals).await;
        Ok(Json(GraphBuildResponse {
            status: self.status().await,
            dropped_actions: mcp_dropped(&dropped),
        }))
    }

    /// Run text-to-visuals extraction on the current text; refused while another run is in
    /// flight. Provider failure yields an empty graph and a `fallback` reason.
    #[tool(name = "visuals.extract")]
    async fn visuals_extract(&self) -> Result<Json<SyncResponse>, ErrorData> {
        let report = self.sync.try_extract_from_text().await.map_err(map_sync_error)?;
        Ok(Json(sync_response(&report, self.status().await)))
    }

    /// Rewrite the text from the current graph; refused while another run is in flight. The
    /// new text leaves the document clean.
    #[tool(name = "text.rewrite")]
    async fn text_rewrite(&self) -> Result<Json<SyncResponse>, ErrorData> {
        let report = self.sync.try_rewrite_from_visuals().await.map_err(map_sync_error)?;
        Ok(Json(sync_response(&report, self.status().await)))
    }

    /// Replace all entity nodes; marks the document stale.
    #[tool(name = "nodes.set_entities")]
    async fn nodes_set_entities(
        &self,
        params: Parameters<EntityNodesSetParams>,
    ) -> Result<Json<DocumentStatusResponse>, ErrorData> {
        let nodes =
            params.0.nodes.iter().map(entity_node_from_mcp).collect::<Result<Vec<_>, _>>()?;
        self.sync.set_entity_nodes(nodes).await;
        Ok(Json(DocumentStatusResponse { status: self.status().await }))
    }

    /// Replace all location nodes; marks the document stale.
    #[tool(name = "nodes.set_locations")]
    async fn nodes_set_locations(
        &self,
        params: Parameters<LocationNodesSetParams>,
    ) -> Result<Json<DocumentStatusResponse>, ErrorData> {
        let nodes =
            params.0.nodes.iter().map(location_node_from_mcp).collect::<Result<Vec<_>, _>>()?;
        self.sync.set_location_nodes(nodes).await;
        Ok(Json(DocumentStatusResponse { status: self.status().await }))
    }

    /// Replace all action edges, in narrative order; marks the document stale.
    #[tool(name = "edges.set")]
    async fn edges_set(
        &self,
        params: Parameters<EdgesSetParams>,
    ) -> Result<Json<DocumentStatusResponse>, ErrorData> {
        let edges =
            params.0.edges.iter().map(action_edge_from_mcp).collect::<Result<Vec<_>, _>>()?;
        self.sync.set_action_edges(edges).await;
        Ok(Json(DocumentStatusResponse { status: self.status().await }))
    }

    /// Apply graph edits (`move_node`, `reconnect_edge`, `relabel_edge`, `remove_edge`,
    /// `remove_node`, `update_entity`) all-or-nothing; a non-empty batch marks the document
    /// stale.
    #[tool(name = "graph.apply_ops")]
    async fn graph_apply_ops(
        &self,
        params: Parameters<ApplyOpsParams>,
    ) -> Result<Json<ApplyOpsResponse>, ErrorData> {
        let ops = params.0.ops.iter().map(mcp_op_to_internal).collect::<Result<Vec<_>, _>>()?;
        let result = self.sync.apply_graph_ops(&ops).await.map_err(map_apply_error)?;
        Ok(Json(ApplyOpsResponse {
            applied: result.applied as u64,
            removed: result.delta.removed.iter().map(ToString::to_string).collect(),
            updated: result.delta.updated.iter().map(ToString::to_string).collect(),
            status: self.status().await,
        }))
    }

    /// Switch the graph panel between entities and locations.
    #[tool(name = "tab.set")]
    async fn tab_set(
        &self,
        params: Parameters<TabSetParams>,
    ) -> Result<Json<TabSetResponse>, ErrorData> {
        let TabSetParams { tab } = params.0;
        self.sync.set_selected_tab(tab_from_mcp(tab)).await;
        Ok(Json(TabSetResponse { tab }))
    }

    /// Replace the node selection; ids missing from the graph are skipped and reported.
    #[tool(name = "selection.set_nodes")]
    async fn selection_set_nodes(
        &self,
        params: Parameters<SelectNodesParams>,
    ) -> Result<Json<SelectionResponse>, ErrorData> {
        let parsed = params
            .0
            .node_ids
            .iter()
            .map(|raw| parse_node_id(raw).map(|node_id| (raw.clone(), node_id)))
            .collect::<Result<Vec<_>, _>>()?;

        let (existing, ignored): (Vec<_>, Vec<_>) = self
            .sync
            .read(|document| {
                parsed
                    .into_iter()
                    .partition(|(_, node_id)| document.graph().node(node_id).is_some())
            })
            .await;
        let selected = existing.into_iter().map(|(_, node_id)| node_id).collect();
        self.sync.set_selected_nodes(selected).await;

        let ignored = ignored.into_iter().map(|(raw, _)| raw).collect();
        Ok(Json(self.selection_response(ignored).await))
    }

    /// Replace the edge selection; ids missing from the graph are skipped and reported.
    #[tool(name = "selection.set_edges")]
    async fn selection_set_edges(
        &self,
        params: Parameters<SelectEdgesParams>,
    ) -> Result<Json<SelectionResponse>, ErrorData> {
        let parsed = params
            .0
            .edge_ids
            .iter()
            .map(|raw| parse_edge_id(raw).map(|edge_id| (raw.clone(), edge_id)))
            .collect::<Result<Vec<_>, _>>()?;

        let (existing, ignored): (Vec<_>, Vec<_>) = self
            .sync
            .read(|document| {
                parsed
                    .into_iter()
                    .partition(|(_, edge_id)| document.graph().edge_position(edge_id).is_some())
            })
            .await;
        let selected = existing.into_iter().map(|(_, edge_id)| edge_id).collect();
        self.sync.set_selected_edges(selected).await;

        let ignored = ignored.into_iter().map(|(raw, _)| raw).collect();
        Ok(Json(self.selection_response(ignored).await))
    }

    async fn selection_response(&self, ignored: Vec<String>) -> SelectionResponse {
        self.sync
            .read(|document| SelectionResponse {
                node_ids: document.selected_nodes().iter().map(ToString::to_string).collect(),
                edge_ids: document.selected_edges().iter().map(ToString::to_string).collect(),
                ignored,
            })
            .await
    }

    /// Correlate a text selection (character offsets `start`..`end`) into the filter segment; when
    /// the selection is collapsed, selected edges and then selected nodes are used instead.
    #[tool(name = "selection.text")]
    async fn selection_text(
        &self,
        params: Parameters<SelectTextParams>,
    ) -> Result<Json<SegmentSlotsResponse>, ErrorData> {
        let SelectTextParams { start, end } = params.0;
        let selection = match (start, end) {
            (None, None) => None,
            (Some(start), Some(end)) => {
                let start = usize_param("start", start)?;
                let end = usize_param("end", end)?;
                let text_len = self.sync.read(|document| document.text().chars().count()).await;
                if start > end || end > text_len {
                    return Err(ErrorData::invalid_params(
                        "selection must satisfy start <= end <= text length",
                        Some(serde_json::json!({
                            "start": start,
                            "end": end,
                            "text_len": text_len,
                        })),
                    ));
                }
                Some(start..end)
            }
            _ => {
                return Err(ErrorData::invalid_params(
                    "provide both `start` and `end`, or neither",
                    None,
                ));
            }
        };

        self.sync.select_text(selection).await;
        Ok(Json(self.sync.read(segment_slots).await))
    }

    /// Set or clear (`null`) the hover segment; it wins over the filter segment for display.
    #[tool(name = "segment.highlight")]
    async fn segment_highlight(
        &self,
        params: Parameters<SegmentSetParams>,
    ) -> Result<Json<SegmentSlotsResponse>, ErrorData> {
        let segment = params.0.segment.map(segment_from_mcp).transpose()?;
        self.sync.set_highlight_segment(segment).await;
        Ok(Json(self.sync.read(segment_slots).await))
    }

    /// Set or clear (`null`) the filter segment.
    #[tool(name = "segment.filter")]
    async fn segment_filter(
        &self,
        params: Parameters<SegmentSetParams>,
    ) -> Result<Json<SegmentSlotsResponse>, ErrorData> {
        let segment = params.0.segment.map(segment_from_mcp).transpose()?;
        self.sync.set_filter_segment(segment).await;
        Ok(Json(self.sync.read(segment_slots).await))
    }

    /// Read what is highlighted: action indices, passage ranges in the text (character
    /// offsets), the edges the graph panel shows, and actions whose passage was not found
    /// verbatim.
    #[tool(name = "highlights.read")]
    async fn highlights_read(&self) -> Result<Json<HighlightsReadResponse>, ErrorData> {
        let response = self
            .sync
            .read(|document| {
                let report = locate_actions(document.text(), document.graph().action_edges());
                HighlightsReadResponse {
                    action_indices: highlighted_action_indices(document)
                        .into_iter()
                        .map(|index| index as u64)
                        .collect(),
                    text_ranges: text_highlights(document)
                        .into_iter()
                        .map(|highlight| {
                            let chars = byte_range_to_chars(document.text(), highlight.range);
                            McpTextHighlight {
                                action_index: highlight.action_index as u64,
                                start: chars.start as u64,
                                end: chars.end as u64,
                            }
                        })
                        .collect(),
                    displayed_edge_ids: displayed_edges(document)
                        .iter()
                        .map(|edge| edge.id().to_string())
                        .collect(),
                    missed_action_indices: report.missed.into_iter().map(|i| i as u64).collect(),
                }
            })
            .await;
        Ok(Json(response))
    }
}

#[tool_handler]
impl ServerHandler for InkgraphMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Inkgraph story text/graph sync server (tools: document.read, document.reset, document.load_sample, text.set, visuals.set, visuals.extract, text.rewrite, nodes.set_entities, nodes.set_locations, edges.set, graph.apply_ops, tab.set, selection.set_nodes, selection.set_edges, selection.text, segment.highlight, segment.filter, highlights.read)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// Extracted mapping/parsing helpers for MCP tool handlers.
include!("server/helpers.rs");
