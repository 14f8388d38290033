// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text/visuals transformation providers.
//!
//! A [`TransformProvider`] never fails: it always hands back a value, tagged with whether the
//! value was genuinely produced or is a fallback. Fallible backends implement
//! [`TransformBackend`] and are wrapped in [`FailClosed`] to become providers.

mod fail_closed;
mod template;

pub use fail_closed::{FailClosed, REWRITE_FALLBACK_TEXT};
pub use template::TemplateBackend;

use crate::model::{Action, Entity, Visuals};

/// A provider result with an explicit success/fallback tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome<T> {
    Produced(T),
    Fallback { value: T, reason: String },
}

impl<T> ProviderOutcome<T> {
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Self::Fallback { value, reason: reason.into() }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            Self::Produced(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Produced(value) | Self::Fallback { value, .. } => value,
        }
    }

    /// Drops the tag. Callers that install the value treat both cases alike.
    pub fn into_value(self) -> T {
        match self {
            Self::Produced(value) | Self::Fallback { value, .. } => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("text is not recognized by this backend")]
    Unsupported,
    #[error("nothing to write: no entities and no actions")]
    EmptyInput,
    #[error("provider call timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },
    #[error("provider backend failed: {0}")]
    Backend(String),
}

/// Infallible text/visuals translation, as consumed by the sync orchestrator.
#[async_trait::async_trait]
pub trait TransformProvider: Send + Sync {
    /// Extracts entities, locations and ordered actions from prose.
    async fn extract(&self, text: &str) -> ProviderOutcome<Visuals>;

    /// Writes prose from entities and ordered actions.
    async fn rewrite(&self, entities: &[Entity], actions: &[Action]) -> ProviderOutcome<String>;
}

/// A fallible translation backend.
#[async_trait::async_trait]
pub trait TransformBackend: Send + Sync {
    async fn try_extract(&self, text: &str) -> Result<Visuals, ProviderError>;

    async fn try_rewrite(
        &self,
        entities: &[Entity],
        actions: &[Action],
    ) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::{ProviderError, ProviderOutcome};

    #[test]
    fn outcome_collapses_to_its_value() {
        let produced = ProviderOutcome::Produced(3);
        assert!(!produced.is_fallback());
        assert_eq!(produced.fallback_reason(), None);
        assert_eq!(produced.into_value(), 3);

        let fallback = ProviderOutcome::fallback(0, "boom");
        assert!(fallback.is_fallback());
        assert_eq!(fallback.fallback_reason(), Some("boom"));
        assert_eq!(*fallback.value(), 0);
        assert_eq!(fallback.into_value(), 0);
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(
            ProviderError::Timeout { after_ms: 250 }.to_string(),
            "provider call timed out after 250 ms"
        );
        assert_eq!(
            ProviderError::Backend("503".to_owned()).to_string(),
            "provider backend failed: 503"
        );
    }
}
