// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::future::Future;
use std::time::Duration;

use crate::model::{Action, Entity, Visuals};

use super::{ProviderError, ProviderOutcome, TransformBackend, TransformProvider};

/// Installed as the document text when a rewrite fails.
pub const REWRITE_FALLBACK_TEXT: &str = "Error generating story.";

/// Turns a fallible backend into a provider that always returns a value.
///
/// Errors and timeouts become [`ProviderOutcome::Fallback`]: the empty triple for extraction,
/// [`REWRITE_FALLBACK_TEXT`] for rewrite.
#[derive(Debug, Clone)]
pub struct FailClosed<B> {
    backend: B,
    timeout: Option<Duration>,
}

impl<B> FailClosed<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, timeout: None }
    }

    /// `None` waits for the backend indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

async fn bounded<T>(
    timeout: Option<Duration>,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    let Some(limit) = timeout else {
        return call.await;
    };
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout {
            after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

#[async_trait::async_trait]
impl<B: TransformBackend> TransformProvider for FailClosed<B> {
    async fn extract(&self, text: &str) -> ProviderOutcome<Visuals> {
        match bounded(self.timeout, self.backend.try_extract(text)).await {
            Ok(visuals) => ProviderOutcome::Produced(visuals),
            Err(err) => {
                tracing::warn!(error = %err, "extraction failed; using empty visuals");
                ProviderOutcome::fallback(Visuals::default(), err.to_string())
            }
        }
    }

    async fn rewrite(&self, entities: &[Entity], actions: &[Action]) -> ProviderOutcome<String> {
        match bounded(self.timeout, self.backend.try_rewrite(entities, actions)).await {
            Ok(text) => ProviderOutcome::Produced(text),
            Err(err) => {
                tracing::warn!(error = %err, "rewrite failed; using fallback text");
                ProviderOutcome::fallback(REWRITE_FALLBACK_TEXT.to_owned(), err.to_string())
            }
        }
    }
}
