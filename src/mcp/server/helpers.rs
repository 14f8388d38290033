// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// MCP server helper functions:
/// document mapping, id parsing, and error translation.
fn document_status(document: &Document) -> DocumentStatus {
    let graph = document.graph();
    DocumentStatus {
        text_len: document.text().chars().count() as u64,
        is_loading: document.is_loading(),
        is_stale: document.is_stale(),
        entity_nodes: graph.entity_nodes().len() as u64,
        location_nodes: graph.location_nodes().len() as u64,
        action_edges: graph.action_edges().len() as u64,
    }
}

fn mcp_document(document: &Document) -> McpDocument {
    McpDocument {
        text: document.text().to_owned(),
        blocks: document
            .rich_text()
            .blocks()
            .iter()
            .map(|block| McpBlock {
                runs: block.runs().iter().map(|run| run.text.clone()).collect(),
            })
            .collect(),
        graph: mcp_graph(document.graph()),
        is_loading: document.is_loading(),
        is_stale: document.is_stale(),
        selected_tab: mcp_tab(document.selected_tab()),
        selected_node_ids: document.selected_nodes().iter().map(ToString::to_string).collect(),
        selected_edge_ids: document.selected_edges().iter().map(ToString::to_string).collect(),
        segments: segment_slots(document),
    }
}

fn mcp_graph(graph: &GraphState) -> McpGraph {
    McpGraph {
        entity_nodes: graph
            .entity_nodes()
            .iter()
            .map(|node| McpEntityNode {
                id: Some(node.id().to_string()),
                position: mcp_position(node.position()),
                data: mcp_entity(node.data()),
            })
            .collect(),
        location_nodes: graph
            .location_nodes()
            .iter()
            .map(|node| McpLocationNode {
                id: Some(node.id().to_string()),
                position: mcp_position(node.position()),
                data: McpLocation {
                    name: node.data().name.clone(),
                    emoji: node.data().emoji.clone(),
                },
            })
            .collect(),
        action_edges: graph.action_edges().iter().map(mcp_action_edge).collect(),
    }
}

fn mcp_entity(entity: &Entity) -> McpEntity {
    McpEntity {
        name: entity.name.clone(),
        emoji: entity.emoji.clone(),
        properties: entity
            .properties
            .iter()
            .map(|property| McpEntityProperty {
                name: property.name.clone(),
                value: property.value,
            })
            .collect(),
    }
}

fn mcp_action_edge(edge: &ActionEdge) -> McpActionEdge {
    let data = edge.data();
    McpActionEdge {
        id: edge.id().to_string(),
        source: edge.source().to_string(),
        target: edge.target().to_string(),
        label: edge.label().to_owned(),
        name: data.name.clone(),
        passage: data.passage.clone(),
        source_location: data.source_location.clone(),
        target_location: data.target_location.clone(),
    }
}

fn mcp_position(position: Position) -> McpPosition {
    McpPosition { x: position.x, y: position.y }
}

fn mcp_tab(tab: Tab) -> McpTab {
    match tab {
        Tab::Entities => McpTab::Entities,
        Tab::Locations => McpTab::Locations,
    }
}

fn tab_from_mcp(tab: McpTab) -> Tab {
    match tab {
        McpTab::Entities => Tab::Entities,
        McpTab::Locations => Tab::Locations,
    }
}

fn mcp_segment(segment: Segment) -> McpSegment {
    McpSegment { start: segment.start() as u64, end: segment.end() as u64 }
}

fn segment_from_mcp(segment: McpSegment) -> Result<Segment, ErrorData> {
    Ok(Segment::new(
        usize_param("segment.start", segment.start)?,
        usize_param("segment.end", segment.end)?,
    ))
}

fn segment_slots(document: &Document) -> SegmentSlotsResponse {
    SegmentSlotsResponse {
        highlight: document.highlight_segment().map(mcp_segment),
        filter: document.filter_segment().map(mcp_segment),
        active: document.active_segment().map(mcp_segment),
    }
}

fn mcp_dropped(dropped: &[DroppedAction]) -> Vec<McpDroppedAction> {
    dropped
        .iter()
        .map(|action| McpDroppedAction {
            index: action.index as u64,
            name: action.name.clone(),
            reason: drop_reason_label(action.reason).to_owned(),
        })
        .collect()
}

fn drop_reason_label(reason: DropReason) -> &'static str {
    match reason {
        DropReason::UnknownSource => "unknown_source",
        DropReason::UnknownTarget => "unknown_target",
        DropReason::UnknownBoth => "unknown_source_and_target",
    }
}

fn sync_response(report: &SyncReport, status: DocumentStatus) -> SyncResponse {
    SyncResponse {
        pipeline: report.pipeline.to_string(),
        provider_called: report.provider_called,
        fallback: report.fallback.clone(),
        dropped_actions: mcp_dropped(&report.dropped),
        status,
    }
}

fn usize_param(field: &str, value: u64) -> Result<usize, ErrorData> {
    usize::try_from(value).map_err(|_| {
        ErrorData::invalid_params(
            format!("{field} is out of range"),
            Some(serde_json::json!({ "field": field, "value": value })),
        )
    })
}

fn parse_node_id(raw: &str) -> Result<NodeId, ErrorData> {
    NodeId::from_str(raw).map_err(|err| {
        ErrorData::invalid_params(
            format!("invalid node_id: {err}"),
            Some(serde_json::json!({ "node_id": raw })),
        )
    })
}

fn parse_entity_node_id(raw: &str) -> Result<NodeId, ErrorData> {
    let node_id = parse_node_id(raw)?;
    if !node_id.is_entity() {
        return Err(ErrorData::invalid_params(
            "edge endpoints must be entity nodes",
            Some(serde_json::json!({ "node_id": raw })),
        ));
    }
    Ok(node_id)
}

fn parse_edge_id(raw: &str) -> Result<EdgeId, ErrorData> {
    EdgeId::from_str(raw).map_err(|err| {
        ErrorData::invalid_params(
            format!("invalid edge_id: {err}"),
            Some(serde_json::json!({ "edge_id": raw })),
        )
    })
}

/// A caller-supplied node id must agree with the id derived from the node's name.
fn check_node_id(supplied: Option<&str>, derived: &NodeId) -> Result<(), ErrorData> {
    match supplied {
        Some(raw) if raw != derived.to_string() => Err(ErrorData::invalid_params(
            "node id does not match its name",
            Some(serde_json::json!({ "id": raw, "expected": derived.to_string() })),
        )),
        _ => Ok(()),
    }
}

fn entity_from_mcp(entity: &McpEntity) -> Entity {
    Entity {
        name: entity.name.clone(),
        emoji: entity.emoji.clone(),
        properties: entity
            .properties
            .iter()
            .map(|property| EntityProperty::new(property.name.clone(), property.value))
            .collect(),
    }
    .normalized()
}

fn visuals_from_mcp(params: &VisualsSetParams) -> Visuals {
    Visuals {
        entities: params.entities.iter().map(entity_from_mcp).collect(),
        locations: params
            .locations
            .iter()
            .map(|location| Location::new(location.name.clone(), location.emoji.clone()))
            .collect(),
        actions: params
            .actions
            .iter()
            .map(|action| {
                let location = if action.location.is_empty() {
                    UNKNOWN_LOCATION.to_owned()
                } else {
                    action.location.clone()
                };
                Action::new(
                    action.name.clone(),
                    action.source.clone(),
                    action.target.clone(),
                    location,
                    action.passage.clone(),
                )
            })
            .collect(),
    }
}

fn entity_node_from_mcp(node: &McpEntityNode) -> Result<EntityNode, ErrorData> {
    let built = EntityNode::for_entity(
        entity_from_mcp(&node.data),
        Position::new(node.position.x, node.position.y),
    );
    check_node_id(node.id.as_deref(), built.id())?;
    Ok(built)
}

fn location_node_from_mcp(node: &McpLocationNode) -> Result<LocationNode, ErrorData> {
    let built = LocationNode::for_location(
        Location::new(node.data.name.clone(), node.data.emoji.clone()),
        Position::new(node.position.x, node.position.y),
    );
    check_node_id(node.id.as_deref(), built.id())?;
    Ok(built)
}

fn action_edge_from_mcp(edge: &McpActionEdge) -> Result<ActionEdge, ErrorData> {
    Ok(ActionEdge::new(
        parse_edge_id(&edge.id)?,
        parse_entity_node_id(&edge.source)?,
        parse_entity_node_id(&edge.target)?,
        edge.label.clone(),
        ActionEdgeData {
            name: edge.name.clone(),
            passage: edge.passage.clone(),
            source_location: edge.source_location.clone(),
            target_location: edge.target_location.clone(),
        },
    ))
}

fn mcp_op_to_internal(op: &McpGraphOp) -> Result<GraphOp, ErrorData> {
    Ok(match op {
        McpGraphOp::MoveNode { node_id, x, y } => GraphOp::MoveNode {
            node_id: parse_node_id(node_id)?,
            position: Position::new(*x, *y),
        },
        McpGraphOp::ReconnectEdge { edge_id, source, target } => GraphOp::ReconnectEdge {
            edge_id: parse_edge_id(edge_id)?,
            source: source.as_deref().map(parse_node_id).transpose()?,
            target: target.as_deref().map(parse_node_id).transpose()?,
        },
        McpGraphOp::RelabelEdge { edge_id, name } => {
            GraphOp::RelabelEdge { edge_id: parse_edge_id(edge_id)?, name: name.clone() }
        }
        McpGraphOp::RemoveEdge { edge_id } => {
            GraphOp::RemoveEdge { edge_id: parse_edge_id(edge_id)? }
        }
        McpGraphOp::RemoveNode { node_id } => {
            GraphOp::RemoveNode { node_id: parse_node_id(node_id)? }
        }
        McpGraphOp::UpdateEntity { node_id, emoji, properties } => GraphOp::UpdateEntity {
            node_id: parse_node_id(node_id)?,
            patch: EntityPatch {
                emoji: emoji.clone(),
                properties: properties.as_ref().map(|properties| {
                    properties
                        .iter()
                        .map(|property| EntityProperty::new(property.name.clone(), property.value))
                        .collect()
                }),
            },
        },
    })
}

fn map_apply_error(err: ApplyError) -> ErrorData {
    let message = err.to_string();
    match err {
        ApplyError::NodeNotFound { node_id } => ErrorData::resource_not_found(
            message,
            Some(serde_json::json!({ "node_id": node_id.to_string() })),
        ),
        ApplyError::EdgeNotFound { edge_id } => ErrorData::resource_not_found(
            message,
            Some(serde_json::json!({ "edge_id": edge_id.to_string() })),
        ),
        ApplyError::NotAnEntity { node_id } => ErrorData::invalid_params(
            message,
            Some(serde_json::json!({ "node_id": node_id.to_string() })),
        ),
        ApplyError::EmptyActionName { edge_id } => ErrorData::invalid_params(
            message,
            Some(serde_json::json!({ "edge_id": edge_id.to_string() })),
        ),
        ApplyError::TooManyProperties { count } => {
            ErrorData::invalid_params(message, Some(serde_json::json!({ "count": count })))
        }
        ApplyError::PropertyOutOfRange { name, value } => ErrorData::invalid_params(
            message,
            Some(serde_json::json!({ "name": name, "value": value })),
        ),
    }
}

fn map_sync_error(err: SyncError) -> ErrorData {
    match err {
        SyncError::Busy => ErrorData::invalid_request(err.to_string(), None),
    }
}
