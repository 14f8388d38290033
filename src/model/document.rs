// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::build::{build_graph, DroppedAction};
use crate::layout::GraphLayout;
use crate::ops::{apply_graph_ops, ApplyError, ApplyResult, GraphOp};
use crate::sync::{EditOrigin, Staleness};

use super::graph::{ActionEdge, EntityNode, GraphState, LocationNode};
use super::ids::{EdgeId, NodeId};
use super::rich_text::RichText;
use super::segment::{Segment, SegmentSlots};
use super::story::{SampleStory, Visuals};

/// Which node category the graph panel shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Entities,
    Locations,
}

/// The single mutable root: text, graph and all correlation state.
///
/// Every method here is a synchronous, self-contained replacement of part of the state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    text: String,
    rich_text: RichText,
    graph: GraphState,
    in_flight: usize,
    staleness: Staleness,
    selected_tab: Tab,
    selected_nodes: Vec<NodeId>,
    selected_edges: Vec<EdgeId>,
    segments: SegmentSlots,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rich_text(&self) -> &RichText {
        &self.rich_text
    }

    pub fn graph(&self) -> &GraphState {
        &self.graph
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn staleness(&self) -> Staleness {
        self.staleness
    }

    pub fn is_stale(&self) -> bool {
        self.staleness.is_stale()
    }

    pub fn selected_tab(&self) -> Tab {
        self.selected_tab
    }

    pub fn selected_nodes(&self) -> &[NodeId] {
        &self.selected_nodes
    }

    pub fn selected_edges(&self) -> &[EdgeId] {
        &self.selected_edges
    }

    pub fn segments(&self) -> SegmentSlots {
        self.segments
    }

    pub fn highlight_segment(&self) -> Option<Segment> {
        self.segments.highlight()
    }

    pub fn filter_segment(&self) -> Option<Segment> {
        self.segments.filter()
    }

    /// Hover wins over filter.
    pub fn active_segment(&self) -> Option<Segment> {
        self.segments.effective()
    }

    /// Back to an empty document.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replaces the whole document with `sample`, exactly as if its visuals had been
    /// extracted from its text.
    pub fn load_sample(
        &mut self,
        sample: &SampleStory,
        layout: &GraphLayout,
    ) -> Vec<DroppedAction> {
        self.reset();
        self.rich_text = RichText::from_plain(sample.text.clone());
        self.text = sample.text.clone();
        self.set_visuals(&sample.visuals, layout)
    }

    /// Installs new structured text. The raw text is re-derived from it.
    pub fn set_rich_text(&mut self, rich_text: RichText, origin: EditOrigin) {
        let text = rich_text.plain_text();
        let changed = text != self.text;
        self.rich_text = rich_text;
        self.text = text;
        self.staleness.on_text_edit(changed, origin);
    }

    /// Installs `text` as a single paragraph.
    pub fn set_plain_text(&mut self, text: impl Into<String>, origin: EditOrigin) {
        self.set_rich_text(RichText::from_plain(text), origin);
    }

    /// Rebuilds the graph from `visuals` and marks the document in sync.
    pub fn set_visuals(&mut self, visuals: &Visuals, layout: &GraphLayout) -> Vec<DroppedAction> {
        let built = build_graph(visuals, layout);
        self.graph = built.graph;
        self.staleness.on_sync_complete();
        built.dropped
    }

    /// Installs rewrite output. The text is derived from the graph, so the document is clean.
    pub fn apply_rewrite(&mut self, text: impl Into<String>) {
        self.set_plain_text(text, EditOrigin::Rewrite);
        self.staleness.on_sync_complete();
    }

    /// Extraction over blank text: empty graph, no provider round trip.
    pub fn clear_graph(&mut self) {
        self.graph = GraphState::default();
        self.staleness.on_sync_complete();
    }

    pub fn set_entity_nodes(&mut self, nodes: Vec<EntityNode>) {
        self.graph.set_entity_nodes(nodes);
        self.staleness.on_graph_edit();
    }

    pub fn set_location_nodes(&mut self, nodes: Vec<LocationNode>) {
        self.graph.set_location_nodes(nodes);
        self.staleness.on_graph_edit();
    }

    pub fn set_action_edges(&mut self, edges: Vec<ActionEdge>) {
        self.graph.set_action_edges(edges);
        self.staleness.on_graph_edit();
    }

    /// Applies direct graph edits; a non-empty, successful batch marks the document stale.
    pub fn apply_graph_ops(&mut self, ops: &[GraphOp]) -> Result<ApplyResult, ApplyError> {
        let result = apply_graph_ops(&mut self.graph, ops)?;
        if result.applied > 0 {
            self.staleness.on_graph_edit();
        }
        Ok(result)
    }

    pub fn set_selected_tab(&mut self, tab: Tab) {
        self.selected_tab = tab;
    }

    pub fn set_selected_nodes(&mut self, nodes: Vec<NodeId>) {
        self.selected_nodes = nodes;
    }

    pub fn set_selected_edges(&mut self, edges: Vec<EdgeId>) {
        self.selected_edges = edges;
    }

    pub fn set_highlight_segment(&mut self, segment: Option<Segment>) {
        self.segments.set_highlight(segment);
    }

    pub fn set_filter_segment(&mut self, segment: Option<Segment>) {
        self.segments.set_filter(segment);
    }

    pub(crate) fn begin_loading(&mut self) {
        self.in_flight = self.in_flight.saturating_add(1);
    }

    /// Saturates so a reset during an in-flight call cannot underflow.
    pub(crate) fn end_loading(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, Tab};
    use crate::layout::GraphLayout;
    use crate::model::{fixtures, Block, InlineRun, NodeId, Position, RichText, Segment};
    use crate::ops::GraphOp;
    use crate::sync::{EditOrigin, Staleness};

    fn sample_document() -> Document {
        let mut document = Document::new();
        document.load_sample(&fixtures::alice_in_wonderland(), &GraphLayout::default());
        document
    }

    #[test]
    fn new_document_is_empty_and_clean() {
        let document = Document::new();
        assert_eq!(document.text(), "");
        assert_eq!(document.rich_text().blocks().len(), 1);
        assert!(document.graph().is_empty());
        assert!(!document.is_loading());
        assert_eq!(document.staleness(), Staleness::Clean);
        assert_eq!(document.selected_tab(), Tab::Entities);
        assert_eq!(document.active_segment(), None);
    }

    #[test]
    fn load_sample_seeds_text_and_graph_in_sync() {
        let sample = fixtures::alice_in_wonderland();
        let mut document = Document::new();
        let dropped = document.load_sample(&sample, &GraphLayout::default());

        assert_eq!(document.text(), sample.text);
        assert_eq!(document.graph().entity_nodes().len(), 4);
        assert_eq!(document.graph().location_nodes().len(), 3);
        // "pop down" targets a location, not an entity.
        assert_eq!(document.graph().action_edges().len(), 4);
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].index, 4);
        assert!(!document.is_stale());
    }

    #[test]
    fn load_sample_replaces_previous_state_wholesale() {
        let mut document = Document::new();
        document.set_plain_text("draft", EditOrigin::User);
        document.set_selected_tab(Tab::Locations);
        document.set_filter_segment(Some(Segment::new(0, 1)));

        document.load_sample(&fixtures::alice_in_wonderland(), &GraphLayout::default());

        assert_eq!(document.selected_tab(), Tab::Entities);
        assert_eq!(document.filter_segment(), None);
        assert!(!document.is_stale());
    }

    #[test]
    fn text_edits_follow_staleness_rules() {
        let mut document = Document::new();

        document.set_plain_text("Once upon a time", EditOrigin::User);
        assert!(document.is_stale());

        let mut document = Document::new();
        document.set_plain_text("Once upon a time", EditOrigin::Rewrite);
        assert!(!document.is_stale());

        document.set_plain_text("Once upon a time", EditOrigin::User);
        assert!(!document.is_stale(), "unchanged text is a selection-only change");
    }

    #[test]
    fn rich_text_derives_raw_text() {
        let mut document = Document::new();
        document.set_rich_text(
            RichText::new(vec![
                Block::new(vec![InlineRun::new("Alice "), InlineRun::new("ran.")]),
                Block::paragraph("The end."),
            ]),
            EditOrigin::User,
        );
        assert_eq!(document.text(), "Alice ran.\nThe end.");
    }

    #[test]
    fn wholesale_graph_setters_mark_stale() {
        let mut document = sample_document();
        let nodes = document.graph().entity_nodes().to_vec();
        document.set_entity_nodes(nodes);
        assert!(document.is_stale());

        let mut document = sample_document();
        let nodes = document.graph().location_nodes().to_vec();
        document.set_location_nodes(nodes);
        assert!(document.is_stale());

        let mut document = sample_document();
        document.set_action_edges(Vec::new());
        assert!(document.is_stale());
    }

    #[test]
    fn dragging_a_node_marks_stale() {
        let mut document = sample_document();
        document
            .apply_graph_ops(&[GraphOp::MoveNode {
                node_id: NodeId::entity("Alice"),
                position: Position::new(10.0, 20.0),
            }])
            .expect("move");
        assert!(document.is_stale());
    }

    #[test]
    fn failed_or_empty_op_batches_do_not_mark_stale() {
        let mut document = sample_document();
        document.apply_graph_ops(&[]).expect("empty batch");
        assert!(!document.is_stale());

        document
            .apply_graph_ops(&[GraphOp::MoveNode {
                node_id: NodeId::entity("Nobody"),
                position: Position::default(),
            }])
            .unwrap_err();
        assert!(!document.is_stale());
    }

    #[test]
    fn selection_and_segments_never_touch_staleness() {
        let mut document = sample_document();
        document.set_selected_nodes(vec![NodeId::entity("Alice")]);
        document.set_selected_edges(Vec::new());
        document.set_selected_tab(Tab::Locations);
        document.set_highlight_segment(Some(Segment::single(1)));
        document.set_filter_segment(Some(Segment::new(0, 2)));

        assert!(!document.is_stale());
        assert_eq!(document.active_segment(), Some(Segment::single(1)));
    }

    #[test]
    fn rewrite_output_installs_text_and_clears_staleness() {
        let mut document = sample_document();
        document.set_action_edges(Vec::new());
        assert!(document.is_stale());

        document.apply_rewrite("A new story.");
        assert_eq!(document.text(), "A new story.");
        assert!(!document.is_stale());
    }

    #[test]
    fn loading_counter_saturates_after_reset() {
        let mut document = Document::new();
        document.begin_loading();
        document.reset();
        document.end_loading();
        assert!(!document.is_loading());
    }
}
