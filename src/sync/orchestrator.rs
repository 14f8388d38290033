// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::build::DroppedAction;
use crate::layout::GraphLayout;
use crate::model::{
    Action, ActionEdge, Document, EdgeId, Entity, EntityNode, LocationNode, NodeId, RichText,
    SampleStory, Segment, Tab, Visuals,
};
use crate::ops::{ApplyError, ApplyResult, GraphOp};
use crate::provider::{ProviderOutcome, TransformProvider, REWRITE_FALLBACK_TEXT};
use crate::query::{apply_correlation, char_range_to_bytes};

use super::EditOrigin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("a transformation is already running")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipeline {
    Extract,
    Rewrite,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extract => f.write_str("extract"),
            Self::Rewrite => f.write_str("rewrite"),
        }
    }
}

/// What a completed pipeline run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub pipeline: Pipeline,
    /// False when extraction short-circuited on blank text.
    pub provider_called: bool,
    /// Set when the provider returned its fallback value instead of real output.
    pub fallback: Option<String>,
    /// Actions dropped by the graph builder; always empty for rewrite.
    pub dropped: Vec<DroppedAction>,
}

impl SyncReport {
    fn new(pipeline: Pipeline) -> Self {
        Self { pipeline, provider_called: false, fallback: None, dropped: Vec::new() }
    }

    pub fn fell_back(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Owns the document and drives the extract and rewrite pipelines.
///
/// Cloning yields another handle onto the same document. Synchronous mutations take the lock
/// briefly; the pipelines capture their inputs under the lock, release it while the provider
/// runs, and merge the result under the lock at completion.
#[derive(Clone)]
pub struct SyncOrchestrator {
    document: Arc<Mutex<Document>>,
    provider: Arc<dyn TransformProvider>,
    layout: GraphLayout,
}

impl fmt::Debug for SyncOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncOrchestrator").field("layout", &self.layout).finish_non_exhaustive()
    }
}

impl SyncOrchestrator {
    pub fn new(provider: Arc<dyn TransformProvider>) -> Self {
        Self::with_document(Document::new(), provider, GraphLayout::default())
    }

    pub fn with_document(
        document: Document,
        provider: Arc<dyn TransformProvider>,
        layout: GraphLayout,
    ) -> Self {
        Self { document: Arc::new(Mutex::new(document)), provider, layout }
    }

    pub fn layout(&self) -> GraphLayout {
        self.layout
    }

    /// Runs `f` against the current document.
    pub async fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        let document = self.document.lock().await;
        f(&document)
    }

    pub async fn snapshot(&self) -> Document {
        self.document.lock().await.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.document.lock().await.is_loading()
    }

    pub async fn reset(&self) {
        self.document.lock().await.reset();
    }

    pub async fn load_sample(&self, sample: &SampleStory) -> Vec<DroppedAction> {
        self.document.lock().await.load_sample(sample, &self.layout)
    }

    pub async fn set_text(&self, text: impl Into<String>, origin: EditOrigin) {
        self.document.lock().await.set_plain_text(text, origin);
    }

    pub async fn set_rich_text(&self, rich_text: RichText, origin: EditOrigin) {
        self.document.lock().await.set_rich_text(rich_text, origin);
    }

    pub async fn set_visuals(&self, visuals: &Visuals) -> Vec<DroppedAction> {
        self.document.lock().await.set_visuals(visuals, &self.layout)
    }

    pub async fn set_entity_nodes(&self, nodes: Vec<EntityNode>) {
        self.document.lock().await.set_entity_nodes(nodes);
    }

    pub async fn set_location_nodes(&self, nodes: Vec<LocationNode>) {
        self.document.lock().await.set_location_nodes(nodes);
    }

    pub async fn set_action_edges(&self, edges: Vec<ActionEdge>) {
        self.document.lock().await.set_action_edges(edges);
    }

    pub async fn apply_graph_ops(&self, ops: &[GraphOp]) -> Result<ApplyResult, ApplyError> {
        self.document.lock().await.apply_graph_ops(ops)
    }

    pub async fn set_selected_tab(&self, tab: Tab) {
        self.document.lock().await.set_selected_tab(tab);
    }

    pub async fn set_selected_nodes(&self, nodes: Vec<NodeId>) {
        self.document.lock().await.set_selected_nodes(nodes);
    }

    pub async fn set_selected_edges(&self, edges: Vec<EdgeId>) {
        self.document.lock().await.set_selected_edges(edges);
    }

    pub async fn set_highlight_segment(&self, segment: Option<Segment>) {
        self.document.lock().await.set_highlight_segment(segment);
    }

    pub async fn set_filter_segment(&self, segment: Option<Segment>) {
        self.document.lock().await.set_filter_segment(segment);
    }

    /// Correlates the text selection (or the node/edge selection when it is collapsed) into
    /// the filter segment.
    ///
    /// `selection` is in character offsets, as an editor reports them.
    pub async fn select_text(&self, selection: Option<Range<usize>>) -> Option<Segment> {
        let mut document = self.document.lock().await;
        let selection = selection.map(|chars| char_range_to_bytes(document.text(), chars));
        apply_correlation(&mut document, selection)
    }

    /// Text to visuals.
    ///
    /// Blank text yields an empty graph without calling the provider. Otherwise the graph is
    /// rebuilt from whatever the provider returns, fallback included.
    pub async fn extract_from_text(&self) -> SyncReport {
        match self.start_extract(false).await {
            Ok(Some(text)) => self.run(Pipeline::Extract, PipelineInput::Extract(text)).await,
            Ok(None) | Err(SyncError::Busy) => SyncReport::new(Pipeline::Extract),
        }
    }

    /// Visuals to text. The provider output replaces the text without marking it stale.
    pub async fn rewrite_from_visuals(&self) -> SyncReport {
        match self.start_rewrite(false).await {
            Ok(input) => self.run(Pipeline::Rewrite, input).await,
            Err(SyncError::Busy) => SyncReport::new(Pipeline::Rewrite),
        }
    }

    /// Like [`Self::extract_from_text`], but refuses to start while another run is in flight.
    pub async fn try_extract_from_text(&self) -> Result<SyncReport, SyncError> {
        match self.start_extract(true).await? {
            Some(text) => Ok(self.run(Pipeline::Extract, PipelineInput::Extract(text)).await),
            None => Ok(SyncReport::new(Pipeline::Extract)),
        }
    }

    /// Like [`Self::rewrite_from_visuals`], but refuses to start while another run is in
    /// flight.
    pub async fn try_rewrite_from_visuals(&self) -> Result<SyncReport, SyncError> {
        let input = self.start_rewrite(true).await?;
        Ok(self.run(Pipeline::Rewrite, input).await)
    }

    /// Enters loading and captures the text, or clears the graph when the text is blank.
    async fn start_extract(&self, guarded: bool) -> Result<Option<String>, SyncError> {
        let mut document = self.document.lock().await;
        if guarded && document.is_loading() {
            return Err(SyncError::Busy);
        }
        if document.text().trim().is_empty() {
            document.clear_graph();
            tracing::info!("extract skipped: text is blank");
            return Ok(None);
        }
        document.begin_loading();
        Ok(Some(document.text().to_owned()))
    }

    async fn start_rewrite(&self, guarded: bool) -> Result<PipelineInput, SyncError> {
        let mut document = self.document.lock().await;
        if guarded && document.is_loading() {
            return Err(SyncError::Busy);
        }
        document.begin_loading();
        Ok(PipelineInput::Rewrite {
            entities: document.graph().entities(),
            actions: document.graph().actions(),
        })
    }

    /// Runs the provider call and merge on a separate task so a dropped caller cannot leave
    /// the document loading.
    async fn run(&self, pipeline: Pipeline, input: PipelineInput) -> SyncReport {
        let this = self.clone();
        let task = tokio::spawn(async move {
            let output = this.call_provider(input).await;
            this.merge(pipeline, output).await
        });
        match task.await {
            Ok(report) => report,
            Err(err) => {
                tracing::error!(%pipeline, error = %err, "pipeline task failed");
                let reason = err.to_string();
                let output = match pipeline {
                    Pipeline::Extract => PipelineOutput::Extract(ProviderOutcome::fallback(
                        Visuals::default(),
                        reason,
                    )),
                    Pipeline::Rewrite => PipelineOutput::Rewrite(ProviderOutcome::fallback(
                        REWRITE_FALLBACK_TEXT.to_owned(),
                        reason,
                    )),
                };
                self.merge(pipeline, output).await
            }
        }
    }

    async fn call_provider(&self, input: PipelineInput) -> PipelineOutput {
        match input {
            PipelineInput::Extract(text) => {
                PipelineOutput::Extract(self.provider.extract(&text).await)
            }
            PipelineInput::Rewrite { entities, actions } => {
                PipelineOutput::Rewrite(self.provider.rewrite(&entities, &actions).await)
            }
        }
    }

    /// Installs provider output into the document as it is now and leaves loading.
    async fn merge(&self, pipeline: Pipeline, output: PipelineOutput) -> SyncReport {
        let mut report = SyncReport::new(pipeline);
        report.provider_called = true;

        let mut document = self.document.lock().await;
        match output {
            PipelineOutput::Extract(outcome) => {
                report.fallback = outcome.fallback_reason().map(str::to_owned);
                report.dropped = document.set_visuals(&outcome.into_value(), &self.layout);
            }
            PipelineOutput::Rewrite(outcome) => {
                report.fallback = outcome.fallback_reason().map(str::to_owned);
                document.apply_rewrite(outcome.into_value());
            }
        }
        document.end_loading();

        tracing::info!(
            %pipeline,
            fell_back = report.fell_back(),
            dropped = report.dropped_count(),
            "sync complete"
        );
        report
    }
}

enum PipelineInput {
    Extract(String),
    Rewrite { entities: Vec<Entity>, actions: Vec<Action> },
}

enum PipelineOutput {
    Extract(ProviderOutcome<Visuals>),
    Rewrite(ProviderOutcome<String>),
}
