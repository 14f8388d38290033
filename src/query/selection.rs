// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Selection correlation.
//!
//! Maps a selection in either representation onto a contiguous run of the ordered action list.
//! Covered actions need not be contiguous; the resulting segment always spans from the lowest
//! to the highest covered index.

use std::ops::Range;

use crate::model::{ActionEdge, Document, EdgeId, NodeId, Segment};

use super::passage::first_occurrence;

/// One action as seen by the correlator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRef<'a> {
    pub index: usize,
    pub source: &'a str,
    pub target: &'a str,
    pub passage: &'a str,
}

pub fn action_refs(edges: &[ActionEdge]) -> Vec<ActionRef<'_>> {
    edges
        .iter()
        .enumerate()
        .map(|(index, edge)| ActionRef {
            index,
            source: edge.source().name(),
            target: edge.target().name(),
            passage: edge.passage(),
        })
        .collect()
}

/// Actions whose passage first occurs entirely inside `selection`.
///
/// A collapsed selection covers nothing.
pub fn segment_for_text_range(
    text: &str,
    edges: &[ActionEdge],
    selection: Range<usize>,
) -> Option<Segment> {
    if selection.is_empty() {
        return None;
    }
    let covered = edges.iter().enumerate().filter_map(|(index, edge)| {
        let found = first_occurrence(text, edge.passage())?;
        (found.start >= selection.start && found.end <= selection.end).then_some(index)
    });
    Segment::spanning(covered)
}

/// Actions with a selected node at either end.
pub fn segment_for_nodes(edges: &[ActionEdge], selected: &[NodeId]) -> Option<Segment> {
    if selected.is_empty() {
        return None;
    }
    let covered = edges
        .iter()
        .enumerate()
        .filter(|(_, edge)| selected.contains(edge.source()) || selected.contains(edge.target()))
        .map(|(index, _)| index);
    Segment::spanning(covered)
}

/// Current array position of `edge_id`.
///
/// The id embeds the position at construction time. Edits since then can shift edges, so the
/// embedded index is trusted only when the edge at that position still carries the id.
pub fn edge_index(edges: &[ActionEdge], edge_id: &EdgeId) -> Option<usize> {
    if let Some(index) = edge_id.index() {
        if edges.get(index).is_some_and(|edge| edge.id() == edge_id) {
            return Some(index);
        }
    }
    edges.iter().position(|edge| edge.id() == edge_id)
}

/// A single edge resolves to its own index; several span their min and max. Unknown ids are
/// ignored.
pub fn segment_for_edges(edges: &[ActionEdge], selected: &[EdgeId]) -> Option<Segment> {
    Segment::spanning(selected.iter().filter_map(|edge_id| edge_index(edges, edge_id)))
}

/// Segment for the current selection state.
///
/// A non-empty text range decides alone. Otherwise selected edges are used, then selected
/// nodes.
pub fn correlate(document: &Document, text_selection: Option<Range<usize>>) -> Option<Segment> {
    let edges = document.graph().action_edges();
    if let Some(range) = text_selection.filter(|range| !range.is_empty()) {
        return segment_for_text_range(document.text(), edges, range);
    }
    if !document.selected_edges().is_empty() {
        return segment_for_edges(edges, document.selected_edges());
    }
    segment_for_nodes(edges, document.selected_nodes())
}

/// Runs [`correlate`] and stores the result in the filter slot. The hover slot is untouched.
pub fn apply_correlation(
    document: &mut Document,
    text_selection: Option<Range<usize>>,
) -> Option<Segment> {
    let segment = correlate(document, text_selection);
    document.set_filter_segment(segment);
    segment
}
