// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{EdgeId, NodeId};
use super::story::{Action, Entity, Location, UNKNOWN_LOCATION};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A positioned graph node carrying its narrative payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    id: NodeId,
    position: Position,
    data: T,
}

pub type EntityNode = Node<Entity>;
pub type LocationNode = Node<Location>;

impl<T> Node<T> {
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

impl EntityNode {
    pub fn for_entity(entity: Entity, position: Position) -> Self {
        Self { id: NodeId::entity(entity.name.clone()), position, data: entity }
    }
}

impl LocationNode {
    pub fn for_location(location: Location, position: Position) -> Self {
        Self { id: NodeId::location(location.name.clone()), position, data: location }
    }
}

/// Borrowed view over either node category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Entity(&'a EntityNode),
    Location(&'a LocationNode),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a NodeId {
        match self {
            Self::Entity(node) => node.id(),
            Self::Location(node) => node.id(),
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Self::Entity(node) => node.position(),
            Self::Location(node) => node.position(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEdgeData {
    pub name: String,
    pub passage: String,
    pub source_location: String,
    pub target_location: String,
}

/// Projection of one action onto the entity graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEdge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    label: String,
    data: ActionEdgeData,
}

impl ActionEdge {
    /// Builds the edge for the action at `index` of the filtered action list.
    pub fn for_action(index: usize, action: &Action) -> Self {
        Self {
            id: EdgeId::for_action(index, &action.source, &action.target),
            source: NodeId::entity(action.source.clone()),
            target: NodeId::entity(action.target.clone()),
            label: action.name.clone(),
            data: ActionEdgeData {
                name: action.name.clone(),
                passage: action.passage.clone(),
                source_location: action.location.clone(),
                target_location: action.location.clone(),
            },
        }
    }

    pub fn new(
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        label: impl Into<String>,
        data: ActionEdgeData,
    ) -> Self {
        Self { id, source, target, label: label.into(), data }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn set_source(&mut self, source: NodeId) {
        self.source = source;
    }

    pub fn set_target(&mut self, target: NodeId) {
        self.target = target;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn data(&self) -> &ActionEdgeData {
        &self.data
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.label = name.clone();
        self.data.name = name;
    }

    pub fn passage(&self) -> &str {
        &self.data.passage
    }
}

/// The three ordered node/edge collections owned by the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphState {
    entity_nodes: Vec<EntityNode>,
    location_nodes: Vec<LocationNode>,
    action_edges: Vec<ActionEdge>,
}

impl GraphState {
    pub fn new(
        entity_nodes: Vec<EntityNode>,
        location_nodes: Vec<LocationNode>,
        action_edges: Vec<ActionEdge>,
    ) -> Self {
        Self { entity_nodes, location_nodes, action_edges }
    }

    pub fn is_empty(&self) -> bool {
        self.entity_nodes.is_empty()
            && self.location_nodes.is_empty()
            && self.action_edges.is_empty()
    }

    pub fn entity_nodes(&self) -> &[EntityNode] {
        &self.entity_nodes
    }

    pub fn entity_nodes_mut(&mut self) -> &mut Vec<EntityNode> {
        &mut self.entity_nodes
    }

    pub fn set_entity_nodes(&mut self, nodes: Vec<EntityNode>) {
        self.entity_nodes = nodes;
    }

    pub fn location_nodes(&self) -> &[LocationNode] {
        &self.location_nodes
    }

    pub fn location_nodes_mut(&mut self) -> &mut Vec<LocationNode> {
        &mut self.location_nodes
    }

    pub fn set_location_nodes(&mut self, nodes: Vec<LocationNode>) {
        self.location_nodes = nodes;
    }

    pub fn action_edges(&self) -> &[ActionEdge] {
        &self.action_edges
    }

    pub fn action_edges_mut(&mut self) -> &mut Vec<ActionEdge> {
        &mut self.action_edges
    }

    pub fn set_action_edges(&mut self, edges: Vec<ActionEdge>) {
        self.action_edges = edges;
    }

    pub fn node(&self, node_id: &NodeId) -> Option<NodeRef<'_>> {
        if node_id.is_entity() {
            self.entity_nodes.iter().find(|n| n.id() == node_id).map(NodeRef::Entity)
        } else {
            self.location_nodes.iter().find(|n| n.id() == node_id).map(NodeRef::Location)
        }
    }

    pub fn entity_node(&self, node_id: &NodeId) -> Option<&EntityNode> {
        self.entity_nodes.iter().find(|n| n.id() == node_id)
    }

    pub fn edge_position(&self, edge_id: &EdgeId) -> Option<usize> {
        self.action_edges.iter().position(|e| e.id() == edge_id)
    }

    /// Entities as currently shown in the graph, in node order.
    pub fn entities(&self) -> Vec<Entity> {
        self.entity_nodes.iter().map(|n| n.data().clone()).collect()
    }

    /// Actions reconstructed from the current edges.
    ///
    /// Endpoints resolve through the entity nodes; an endpoint without a node becomes an
    /// empty name rather than failing the rewrite.
    pub fn actions(&self) -> Vec<Action> {
        self.action_edges
            .iter()
            .map(|edge| {
                let resolve = |node_id: &NodeId| {
                    self.entity_node(node_id).map(|n| n.data().name.clone()).unwrap_or_default()
                };
                let location = if edge.data().source_location.is_empty() {
                    UNKNOWN_LOCATION.to_owned()
                } else {
                    edge.data().source_location.clone()
                };
                Action {
                    name: edge.data().name.clone(),
                    source: resolve(edge.source()),
                    target: resolve(edge.target()),
                    location,
                    passage: edge.data().passage.clone(),
                }
            })
            .collect()
    }
}
