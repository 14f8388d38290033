// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Direct graph edits (drag, reconnect, relabel, remove).
//!
//! Ops are applied all-or-nothing against a candidate copy of the graph and produce a coarse
//! delta of touched element ids. Edge ids are never renumbered by an edit: the index embedded
//! at build time stays with the edge until the next build.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::model::{
    EdgeId, EntityProperty, GraphState, NodeId, Position, MAX_ENTITY_PROPERTIES,
    PROPERTY_VALUE_MAX, PROPERTY_VALUE_MIN,
};

#[derive(Debug, Clone, PartialEq)]
pub enum GraphOp {
    MoveNode {
        node_id: NodeId,
        position: Position,
    },
    ReconnectEdge {
        edge_id: EdgeId,
        source: Option<NodeId>,
        target: Option<NodeId>,
    },
    RelabelEdge {
        edge_id: EdgeId,
        name: String,
    },
    RemoveEdge {
        edge_id: EdgeId,
    },
    RemoveNode {
        node_id: NodeId,
    },
    UpdateEntity {
        node_id: NodeId,
        patch: EntityPatch,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityPatch {
    pub emoji: Option<String>,
    pub properties: Option<Vec<EntityProperty>>,
}

/// A graph element touched by an op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    Node(NodeId),
    Edge(EdgeId),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node_id) => node_id.fmt(f),
            Self::Edge(edge_id) => edge_id.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub applied: usize,
    pub delta: Delta,
}

/// Which elements changed, sorted. Intentionally coarse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub removed: Vec<ElementId>,
    pub updated: Vec<ElementId>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    removed: HashSet<ElementId>,
    updated: HashSet<ElementId>,
}

impl DeltaBuilder {
    fn record_removed(&mut self, element: ElementId) {
        self.updated.remove(&element);
        self.removed.insert(element);
    }

    fn record_updated(&mut self, element: ElementId) {
        if self.removed.contains(&element) {
            return;
        }
        self.updated.insert(element);
    }

    fn finish(self) -> Delta {
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();
        removed.sort();
        updated.sort();
        Delta { removed, updated }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("node not found (id={node_id})")]
    NodeNotFound { node_id: NodeId },
    #[error("edge not found (id={edge_id})")]
    EdgeNotFound { edge_id: EdgeId },
    #[error("edge endpoints must be entity nodes (id={node_id})")]
    NotAnEntity { node_id: NodeId },
    #[error("action name must not be empty (edge={edge_id})")]
    EmptyActionName { edge_id: EdgeId },
    #[error("entity accepts at most {MAX_ENTITY_PROPERTIES} properties (got {count})")]
    TooManyProperties { count: usize },
    #[error(
        "property '{name}' value {value} is outside {PROPERTY_VALUE_MIN}..={PROPERTY_VALUE_MAX}"
    )]
    PropertyOutOfRange { name: String, value: u8 },
}

/// Applies `ops` in order. On error the graph is left untouched.
pub fn apply_graph_ops(graph: &mut GraphState, ops: &[GraphOp]) -> Result<ApplyResult, ApplyError> {
    if ops.is_empty() {
        return Ok(ApplyResult { applied: 0, delta: Delta::default() });
    }

    let mut candidate = graph.clone();
    let mut delta = DeltaBuilder::default();
    for op in ops {
        apply_graph_op(&mut candidate, op, &mut delta)?;
    }

    *graph = candidate;
    Ok(ApplyResult { applied: ops.len(), delta: delta.finish() })
}

// Per-op application helpers.
include!("ops_impl.rs");
