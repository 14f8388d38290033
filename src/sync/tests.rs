// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::model::{fixtures, Action, Entity, NodeId, Position, Segment, Visuals};
use crate::ops::GraphOp;
use crate::query::{byte_range_to_chars, first_occurrence};
use crate::provider::{
    FailClosed, ProviderError, ProviderOutcome, TemplateBackend, TransformBackend,
    TransformProvider, REWRITE_FALLBACK_TEXT,
};

use super::{EditOrigin, Pipeline, SyncError, SyncOrchestrator};

/// Holds every call until the test releases it; calls take gates in arrival order.
struct Gated {
    entered: mpsc::UnboundedSender<String>,
    gates: std::sync::Mutex<VecDeque<oneshot::Receiver<()>>>,
}

impl Gated {
    fn new(gates: usize) -> (Self, mpsc::UnboundedReceiver<String>, Vec<oneshot::Sender<()>>) {
        let (entered, entered_rx) = mpsc::unbounded_channel();
        let (senders, receivers): (Vec<_>, VecDeque<_>) =
            (0..gates).map(|_| oneshot::channel()).unzip();
        (Self { entered, gates: std::sync::Mutex::new(receivers) }, entered_rx, senders)
    }

    async fn wait(&self, label: String) {
        let gate = self.gates.lock().expect("gates").pop_front();
        self.entered.send(label).expect("entered");
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

#[async_trait::async_trait]
impl TransformProvider for Gated {
    async fn extract(&self, text: &str) -> ProviderOutcome<Visuals> {
        self.wait(text.to_owned()).await;
        ProviderOutcome::Produced(Visuals {
            entities: vec![Entity::new(text, "✨")],
            locations: Vec::new(),
            actions: Vec::new(),
        })
    }

    async fn rewrite(&self, entities: &[Entity], actions: &[Action]) -> ProviderOutcome<String> {
        self.wait("rewrite".to_owned()).await;
        ProviderOutcome::Produced(format!("{} entities, {} actions", entities.len(), actions.len()))
    }
}

struct Failing;

#[async_trait::async_trait]
impl TransformBackend for Failing {
    async fn try_extract(&self, _text: &str) -> Result<Visuals, ProviderError> {
        Err(ProviderError::Backend("network down".to_owned()))
    }

    async fn try_rewrite(
        &self,
        _entities: &[Entity],
        _actions: &[Action],
    ) -> Result<String, ProviderError> {
        Err(ProviderError::Backend("network down".to_owned()))
    }
}

#[derive(Default)]
struct Counting {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl TransformProvider for Counting {
    async fn extract(&self, _text: &str) -> ProviderOutcome<Visuals> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ProviderOutcome::Produced(Visuals::default())
    }

    async fn rewrite(&self, _entities: &[Entity], _actions: &[Action]) -> ProviderOutcome<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ProviderOutcome::Produced(String::new())
    }
}

fn template() -> SyncOrchestrator {
    SyncOrchestrator::new(Arc::new(FailClosed::new(TemplateBackend::new())))
}

#[tokio::test]
async fn extracting_the_sample_text_rebuilds_its_graph() {
    let sync = template();
    let sample = fixtures::alice_in_wonderland();
    sync.set_text(sample.text.clone(), EditOrigin::User).await;
    assert!(sync.read(|d| d.is_stale()).await);

    let report = sync.extract_from_text().await;

    assert_eq!(report.pipeline, Pipeline::Extract);
    assert!(report.provider_called);
    assert!(!report.fell_back());
    assert_eq!(report.dropped_count(), 1);
    let document = sync.snapshot().await;
    assert_eq!(document.graph().entity_nodes().len(), 4);
    assert_eq!(document.graph().action_edges().len(), 4);
    assert!(!document.is_stale());
    assert!(!document.is_loading());
}

#[tokio::test]
async fn blank_text_short_circuits_without_calling_the_provider() {
    let provider = Arc::new(Counting::default());
    let sync = SyncOrchestrator::new(provider.clone());
    sync.load_sample(&fixtures::alice_in_wonderland()).await;
    sync.set_text("   \n\t", EditOrigin::User).await;
    assert!(sync.read(|d| d.is_stale()).await);

    let report = sync.extract_from_text().await;

    assert!(!report.provider_called);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    let document = sync.snapshot().await;
    assert!(document.graph().is_empty());
    assert!(!document.is_stale());
    assert!(!document.is_loading());
}

#[tokio::test]
async fn failing_extraction_installs_an_empty_graph() {
    let sync = SyncOrchestrator::new(Arc::new(FailClosed::new(Failing)));
    sync.load_sample(&fixtures::alice_in_wonderland()).await;

    let report = sync.extract_from_text().await;

    assert_eq!(report.fallback.as_deref(), Some("provider backend failed: network down"));
    let document = sync.snapshot().await;
    assert!(document.graph().entity_nodes().is_empty());
    assert!(document.graph().location_nodes().is_empty());
    assert!(document.graph().action_edges().is_empty());
    assert!(!document.is_loading());
    assert!(!document.is_stale());
}

#[tokio::test]
async fn failing_rewrite_installs_the_sentinel_text() {
    let sync = SyncOrchestrator::new(Arc::new(FailClosed::new(Failing)));
    sync.load_sample(&fixtures::alice_in_wonderland()).await;

    let report = sync.rewrite_from_visuals().await;

    assert!(report.fell_back());
    let document = sync.snapshot().await;
    assert_eq!(document.text(), REWRITE_FALLBACK_TEXT);
    assert!(!document.is_stale());
    assert!(!document.is_loading());
}

#[tokio::test]
async fn rewrite_replaces_text_and_leaves_document_clean() {
    let sync = template();
    sync.load_sample(&fixtures::alice_in_wonderland()).await;
    sync.apply_graph_ops(&[GraphOp::MoveNode {
        node_id: NodeId::entity("Alice"),
        position: Position::new(0.0, 0.0),
    }])
    .await
    .expect("move");
    assert!(sync.read(|d| d.is_stale()).await);

    let report = sync.rewrite_from_visuals().await;

    assert_eq!(report.pipeline, Pipeline::Rewrite);
    assert!(!report.fell_back());
    let document = sync.snapshot().await;
    assert!(document.text().starts_with("This is a story about Alice"));
    assert!(document.text().contains("White Rabbit ran close by Alice at The Bank."));
    assert!(!document.is_stale());
    // The graph is untouched by rewrite.
    assert_eq!(document.graph().action_edges().len(), 4);
}

#[tokio::test]
async fn edits_during_extraction_are_overwritten_at_completion() {
    let (provider, mut entered, mut gates) = Gated::new(1);
    let sync = SyncOrchestrator::new(Arc::new(provider));
    sync.load_sample(&fixtures::alice_in_wonderland()).await;

    let running = {
        let sync = sync.clone();
        tokio::spawn(async move { sync.extract_from_text().await })
    };
    assert!(entered.recv().await.is_some());
    assert!(sync.is_loading().await);

    // A drag while the provider is busy marks the document stale.
    sync.apply_graph_ops(&[GraphOp::MoveNode {
        node_id: NodeId::entity("Alice"),
        position: Position::new(1.0, 1.0),
    }])
    .await
    .expect("move");
    assert!(sync.read(|d| d.is_stale()).await);

    gates.remove(0).send(()).expect("release");
    running.await.expect("join");

    let document = sync.snapshot().await;
    assert!(!document.is_stale());
    assert!(!document.is_loading());
    assert_eq!(document.graph().entity_nodes().len(), 1);
    assert!(document.graph().action_edges().is_empty());
}

#[tokio::test]
async fn extraction_uses_text_captured_at_start() {
    let (provider, mut entered, mut gates) = Gated::new(1);
    let sync = SyncOrchestrator::new(Arc::new(provider));
    sync.set_text("first draft", EditOrigin::User).await;

    let running = {
        let sync = sync.clone();
        tokio::spawn(async move { sync.extract_from_text().await })
    };
    assert_eq!(entered.recv().await.as_deref(), Some("first draft"));

    sync.set_text("second draft", EditOrigin::User).await;
    gates.remove(0).send(()).expect("release");
    running.await.expect("join");

    let document = sync.snapshot().await;
    assert_eq!(document.text(), "second draft");
    assert_eq!(document.graph().entity_nodes()[0].data().name, "first draft");
    assert!(!document.is_stale());
}

#[tokio::test]
async fn overlapping_runs_apply_in_completion_order() {
    let (provider, mut entered, mut gates) = Gated::new(2);
    let sync = SyncOrchestrator::new(Arc::new(provider));
    sync.set_text("first", EditOrigin::User).await;

    let first = {
        let sync = sync.clone();
        tokio::spawn(async move { sync.extract_from_text().await })
    };
    assert_eq!(entered.recv().await.as_deref(), Some("first"));

    sync.set_text("second", EditOrigin::User).await;
    let second = {
        let sync = sync.clone();
        tokio::spawn(async move { sync.extract_from_text().await })
    };
    assert_eq!(entered.recv().await.as_deref(), Some("second"));

    let release_first = gates.remove(0);
    gates.remove(0).send(()).expect("release second");
    second.await.expect("join second");
    {
        let document = sync.snapshot().await;
        assert_eq!(document.graph().entity_nodes()[0].data().name, "second");
        assert!(document.is_loading(), "first run is still in flight");
    }

    release_first.send(()).expect("release first");
    first.await.expect("join first");

    let document = sync.snapshot().await;
    assert_eq!(document.graph().entity_nodes()[0].data().name, "first");
    assert!(!document.is_loading());
}

#[tokio::test]
async fn guarded_runs_refuse_while_loading() {
    let (provider, mut entered, mut gates) = Gated::new(1);
    let sync = SyncOrchestrator::new(Arc::new(provider));
    sync.load_sample(&fixtures::alice_in_wonderland()).await;

    let running = {
        let sync = sync.clone();
        tokio::spawn(async move { sync.try_rewrite_from_visuals().await })
    };
    assert_eq!(entered.recv().await.as_deref(), Some("rewrite"));

    assert_eq!(sync.try_extract_from_text().await, Err(SyncError::Busy));
    assert_eq!(sync.try_rewrite_from_visuals().await, Err(SyncError::Busy));

    gates.remove(0).send(()).expect("release");
    let report = running.await.expect("join").expect("not busy");
    assert_eq!(report.pipeline, Pipeline::Rewrite);
    assert_eq!(sync.read(|d| d.text().to_owned()).await, "4 entities, 4 actions");
    assert!(!sync.is_loading().await);
}

#[tokio::test]
async fn select_text_correlates_into_the_filter_slot() {
    let sync = template();
    sync.load_sample(&fixtures::alice_in_wonderland()).await;
    sync.set_highlight_segment(Some(Segment::single(3))).await;

    let whole = sync.read(|d| 0..d.text().chars().count()).await;
    assert_eq!(sync.select_text(Some(whole)).await, Some(Segment::new(0, 3)));

    let document = sync.snapshot().await;
    assert_eq!(document.filter_segment(), Some(Segment::new(0, 3)));
    assert_eq!(document.active_segment(), Some(Segment::single(3)));

    assert_eq!(sync.select_text(None).await, None);
    assert_eq!(sync.read(|d| d.filter_segment()).await, None);
}

#[tokio::test]
async fn select_text_takes_character_offsets_over_multibyte_text() {
    let sync = template();
    sync.load_sample(&fixtures::alice_in_wonderland()).await;

    let (bytes, chars) = sync
        .read(|d| {
            let passage = d.graph().action_edges()[3].passage();
            let bytes = first_occurrence(d.text(), passage).expect("passage");
            let chars = byte_range_to_chars(d.text(), bytes.clone());
            (bytes, chars)
        })
        .await;
    assert!(chars.start < bytes.start);
    assert_eq!(chars.len(), bytes.len());

    assert_eq!(sync.select_text(Some(chars)).await, Some(Segment::single(3)));
    assert_eq!(sync.read(|d| d.filter_segment()).await, Some(Segment::single(3)));
}

/// A provider that violates the fail-closed contract by panicking.
struct Panicking;

#[async_trait::async_trait]
impl TransformProvider for Panicking {
    async fn extract(&self, _text: &str) -> ProviderOutcome<Visuals> {
        panic!("extract exploded");
    }

    async fn rewrite(&self, _entities: &[Entity], _actions: &[Action]) -> ProviderOutcome<String> {
        panic!("rewrite exploded");
    }
}

#[tokio::test]
async fn panicking_extract_still_completes_with_an_empty_graph() {
    let sync = SyncOrchestrator::new(Arc::new(Panicking));
    sync.load_sample(&fixtures::alice_in_wonderland()).await;
    sync.set_text("Alice followed the rabbit.", EditOrigin::User).await;

    let report = sync.extract_from_text().await;

    assert_eq!(report.pipeline, Pipeline::Extract);
    assert!(report.fell_back());
    let document = sync.snapshot().await;
    assert!(document.graph().is_empty());
    assert!(!document.is_loading());
    assert!(!document.is_stale());
}

#[tokio::test]
async fn panicking_rewrite_still_installs_the_sentinel() {
    let sync = SyncOrchestrator::new(Arc::new(Panicking));
    sync.load_sample(&fixtures::alice_in_wonderland()).await;
    sync.apply_graph_ops(&[GraphOp::MoveNode {
        node_id: NodeId::entity("Alice"),
        position: Position::new(1.0, 2.0),
    }])
    .await
    .expect("move");

    let report = sync.try_rewrite_from_visuals().await.expect("not busy");

    assert_eq!(report.pipeline, Pipeline::Rewrite);
    assert!(report.fell_back());
    let document = sync.snapshot().await;
    assert_eq!(document.text(), REWRITE_FALLBACK_TEXT);
    assert!(!document.is_loading());
    assert!(!document.is_stale());
    assert_eq!(document.graph().action_edges().len(), 4);
}

#[tokio::test]
async fn reset_clears_everything() {
    let sync = template();
    sync.load_sample(&fixtures::alice_in_wonderland()).await;
    sync.reset().await;

    let document = sync.snapshot().await;
    assert_eq!(document.text(), "");
    assert!(document.graph().is_empty());
}
