// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Graph op implementation helpers used by `apply_graph_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_graph_op(
    graph: &mut GraphState,
    op: &GraphOp,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        GraphOp::MoveNode { node_id, position } => {
            let moved = if node_id.is_entity() {
                graph
                    .entity_nodes_mut()
                    .iter_mut()
                    .find(|n| n.id() == node_id)
                    .map(|n| n.set_position(*position))
            } else {
                graph
                    .location_nodes_mut()
                    .iter_mut()
                    .find(|n| n.id() == node_id)
                    .map(|n| n.set_position(*position))
            };
            if moved.is_none() {
                return Err(ApplyError::NodeNotFound { node_id: node_id.clone() });
            }
            delta.record_updated(ElementId::Node(node_id.clone()));
            Ok(())
        }
        GraphOp::ReconnectEdge { edge_id, source, target } => {
            for endpoint in [source, target].into_iter().flatten() {
                require_entity_node(graph, endpoint)?;
            }
            let edge = find_edge_mut(graph, edge_id)?;
            if let Some(source) = source {
                edge.set_source(source.clone());
            }
            if let Some(target) = target {
                edge.set_target(target.clone());
            }
            delta.record_updated(ElementId::Edge(edge_id.clone()));
            Ok(())
        }
        GraphOp::RelabelEdge { edge_id, name } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(ApplyError::EmptyActionName { edge_id: edge_id.clone() });
            }
            find_edge_mut(graph, edge_id)?.rename(name);
            delta.record_updated(ElementId::Edge(edge_id.clone()));
            Ok(())
        }
        GraphOp::RemoveEdge { edge_id } => {
            let before_len = graph.action_edges().len();
            graph.action_edges_mut().retain(|e| e.id() != edge_id);
            if graph.action_edges().len() == before_len {
                return Err(ApplyError::EdgeNotFound { edge_id: edge_id.clone() });
            }
            delta.record_removed(ElementId::Edge(edge_id.clone()));
            Ok(())
        }
        GraphOp::RemoveNode { node_id } => {
            if node_id.is_entity() {
                let before_len = graph.entity_nodes().len();
                graph.entity_nodes_mut().retain(|n| n.id() != node_id);
                if graph.entity_nodes().len() == before_len {
                    return Err(ApplyError::NodeNotFound { node_id: node_id.clone() });
                }

                let incident_edge_ids = graph
                    .action_edges()
                    .iter()
                    .filter(|e| e.source() == node_id || e.target() == node_id)
                    .map(|e| e.id().clone())
                    .collect::<Vec<_>>();
                graph
                    .action_edges_mut()
                    .retain(|e| e.source() != node_id && e.target() != node_id);
                for edge_id in incident_edge_ids {
                    delta.record_removed(ElementId::Edge(edge_id));
                }
            } else {
                let before_len = graph.location_nodes().len();
                graph.location_nodes_mut().retain(|n| n.id() != node_id);
                if graph.location_nodes().len() == before_len {
                    return Err(ApplyError::NodeNotFound { node_id: node_id.clone() });
                }
            }
            delta.record_removed(ElementId::Node(node_id.clone()));
            Ok(())
        }
        GraphOp::UpdateEntity { node_id, patch } => {
            if let Some(properties) = &patch.properties {
                validate_properties(properties)?;
            }
            if !node_id.is_entity() {
                return Err(ApplyError::NotAnEntity { node_id: node_id.clone() });
            }
            let Some(node) = graph.entity_nodes_mut().iter_mut().find(|n| n.id() == node_id)
            else {
                return Err(ApplyError::NodeNotFound { node_id: node_id.clone() });
            };

            let entity = node.data_mut();
            if let Some(emoji) = &patch.emoji {
                entity.emoji = emoji.clone();
            }
            if let Some(properties) = &patch.properties {
                entity.properties = properties.clone();
            }
            delta.record_updated(ElementId::Node(node_id.clone()));
            Ok(())
        }
    }
}

fn require_entity_node(graph: &GraphState, node_id: &NodeId) -> Result<(), ApplyError> {
    if !node_id.is_entity() {
        return Err(ApplyError::NotAnEntity { node_id: node_id.clone() });
    }
    if graph.entity_node(node_id).is_none() {
        return Err(ApplyError::NodeNotFound { node_id: node_id.clone() });
    }
    Ok(())
}

fn find_edge_mut<'a>(
    graph: &'a mut GraphState,
    edge_id: &EdgeId,
) -> Result<&'a mut crate::model::ActionEdge, ApplyError> {
    graph
        .action_edges_mut()
        .iter_mut()
        .find(|e| e.id() == edge_id)
        .ok_or_else(|| ApplyError::EdgeNotFound { edge_id: edge_id.clone() })
}

fn validate_properties(properties: &[EntityProperty]) -> Result<(), ApplyError> {
    if properties.len() > MAX_ENTITY_PROPERTIES {
        return Err(ApplyError::TooManyProperties { count: properties.len() });
    }
    for property in properties {
        if !(PROPERTY_VALUE_MIN..=PROPERTY_VALUE_MAX).contains(&property.value) {
            return Err(ApplyError::PropertyOutOfRange {
                name: property.name.clone(),
                value: property.value,
            });
        }
    }
    Ok(())
}
