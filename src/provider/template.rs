// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{fixtures, Action, Entity, SampleStory, Visuals, UNKNOWN_LOCATION};

use super::{ProviderError, TransformBackend};

/// Offline, deterministic backend.
///
/// Extraction only knows registered sample stories. Rewrite renders the actions as plain
/// sentences in order, after introducing the cast.
#[derive(Debug, Clone)]
pub struct TemplateBackend {
    samples: Vec<SampleStory>,
}

impl Default for TemplateBackend {
    fn default() -> Self {
        Self { samples: vec![fixtures::alice_in_wonderland()] }
    }
}

impl TemplateBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend with no registered samples.
    pub fn empty() -> Self {
        Self { samples: Vec::new() }
    }

    pub fn with_sample(mut self, sample: SampleStory) -> Self {
        self.samples.push(sample);
        self
    }

    fn lookup(&self, text: &str) -> Option<&SampleStory> {
        let text = text.trim();
        self.samples.iter().find(|sample| sample.text.trim() == text)
    }
}

fn introduce(entities: &[Entity]) -> Option<String> {
    let names = entities
        .iter()
        .map(|entity| {
            if entity.emoji.is_empty() {
                entity.name.clone()
            } else {
                format!("{} {}", entity.name, entity.emoji)
            }
        })
        .collect::<Vec<_>>();
    let cast = match names.as_slice() {
        [] => return None,
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    };
    Some(format!("This is a story about {cast}."))
}

fn narrate(action: &Action) -> String {
    let mut sentence = [action.source.as_str(), action.name.as_str(), action.target.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !action.location.is_empty() && action.location != UNKNOWN_LOCATION {
        sentence.push_str(" at ");
        sentence.push_str(&action.location);
    }
    sentence.push('.');
    sentence
}

#[async_trait::async_trait]
impl TransformBackend for TemplateBackend {
    async fn try_extract(&self, text: &str) -> Result<Visuals, ProviderError> {
        self.lookup(text)
            .map(|sample| sample.visuals.clone())
            .ok_or(ProviderError::Unsupported)
    }

    async fn try_rewrite(
        &self,
        entities: &[Entity],
        actions: &[Action],
    ) -> Result<String, ProviderError> {
        if entities.is_empty() && actions.is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        let sentences = introduce(entities)
            .into_iter()
            .chain(actions.iter().map(narrate))
            .collect::<Vec<_>>();
        Ok(sentences.join(" "))
    }
}
