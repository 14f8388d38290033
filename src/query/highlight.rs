// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::model::{ActionEdge, Document};

use super::passage::locate;
use super::selection::edge_index;

/// A highlighted passage occurrence in the document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextHighlight {
    pub range: Range<usize>,
    pub action_index: usize,
}

/// Indices of the actions that should render highlighted.
///
/// The active segment and directly selected edges come first. Only when they yield nothing do
/// selected nodes pull in their incident actions.
pub fn highlighted_action_indices(document: &Document) -> BTreeSet<usize> {
    let edges = document.graph().action_edges();
    let mut indices = BTreeSet::new();

    if let Some(segment) = document.active_segment().and_then(|s| s.clamp_to(edges.len())) {
        indices.extend(segment.indices());
    }
    indices.extend(
        document
            .selected_edges()
            .iter()
            .filter_map(|edge_id| edge_index(edges, edge_id)),
    );

    if indices.is_empty() && !document.selected_nodes().is_empty() {
        let selected = document.selected_nodes();
        indices.extend(
            edges
                .iter()
                .enumerate()
                .filter(|(_, e)| selected.contains(e.source()) || selected.contains(e.target()))
                .map(|(index, _)| index),
        );
    }
    indices
}

/// Every occurrence of every highlighted passage, ordered by position in the text.
pub fn text_highlights(document: &Document) -> Vec<TextHighlight> {
    let edges = document.graph().action_edges();
    let mut highlights = highlighted_action_indices(document)
        .into_iter()
        .flat_map(|action_index| {
            locate(document.text(), edges[action_index].passage())
                .into_iter()
                .map(move |range| TextHighlight { range, action_index })
        })
        .collect::<Vec<_>>();
    highlights.sort_by_key(|h| (h.range.start, h.range.end, h.action_index));
    highlights
}

/// Edges the graph panel shows: the active segment's slice, or everything.
pub fn displayed_edges(document: &Document) -> &[ActionEdge] {
    let edges = document.graph().action_edges();
    match document.active_segment() {
        None => edges,
        Some(segment) => match segment.clamp_to(edges.len()) {
            Some(clamped) => &edges[clamped.start()..=clamped.end()],
            None => &[],
        },
    }
}
