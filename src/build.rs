// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Projection of an extraction result onto the node/edge graph.

use std::collections::HashSet;

use crate::layout::GraphLayout;
use crate::model::{ActionEdge, EntityNode, GraphState, LocationNode, Visuals};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    UnknownSource,
    UnknownTarget,
    UnknownBoth,
}

/// An action left out of the graph because an endpoint names no known entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedAction {
    /// Position in the unfiltered action list.
    pub index: usize,
    pub name: String,
    pub reason: DropReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltGraph {
    pub graph: GraphState,
    pub dropped: Vec<DroppedAction>,
}

/// Builds nodes and edges from `visuals`.
///
/// Entities are normalized and laid out on the entity grid, locations on the location grid.
/// Actions whose source or target is not an exact entity name are dropped (and reported);
/// the survivors keep their relative order and are numbered `0..` in that order, which is
/// the index embedded in each edge id.
pub fn build_graph(visuals: &Visuals, layout: &GraphLayout) -> BuiltGraph {
    let entity_nodes = visuals
        .entities
        .iter()
        .enumerate()
        .map(|(i, entity)| {
            EntityNode::for_entity(entity.clone().normalized(), layout.entities.position(i))
        })
        .collect::<Vec<_>>();

    let location_nodes = visuals
        .locations
        .iter()
        .enumerate()
        .map(|(i, location)| {
            LocationNode::for_location(location.clone(), layout.locations.position(i))
        })
        .collect::<Vec<_>>();

    let entity_names =
        visuals.entities.iter().map(|entity| entity.name.as_str()).collect::<HashSet<_>>();

    let mut dropped = Vec::new();
    let mut action_edges = Vec::with_capacity(visuals.actions.len());
    for (original_index, action) in visuals.actions.iter().enumerate() {
        let known_source = entity_names.contains(action.source.as_str());
        let known_target = entity_names.contains(action.target.as_str());
        let reason = match (known_source, known_target) {
            (true, true) => None,
            (false, true) => Some(DropReason::UnknownSource),
            (true, false) => Some(DropReason::UnknownTarget),
            (false, false) => Some(DropReason::UnknownBoth),
        };

        if let Some(reason) = reason {
            tracing::warn!(
                index = original_index,
                action = %action.name,
                source = %action.source,
                target = %action.target,
                ?reason,
                "dropping action with unknown entity reference"
            );
            dropped.push(DroppedAction {
                index: original_index,
                name: action.name.clone(),
                reason,
            });
            continue;
        }

        action_edges.push(ActionEdge::for_action(action_edges.len(), action));
    }

    BuiltGraph { graph: GraphState::new(entity_nodes, location_nodes, action_edges), dropped }
}
