// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const ENTITY_PREFIX: &str = "entity-";
const LOCATION_PREFIX: &str = "location-";
const ACTION_PREFIX: &str = "action-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Entity,
    Location,
}

impl NodeKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Entity => ENTITY_PREFIX,
            Self::Location => LOCATION_PREFIX,
        }
    }
}

/// Graph node identifier, derived from the category and the unique name.
///
/// Rendered as `entity-<name>` or `location-<name>`. Two distinct names within the same
/// category can never produce the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    kind: NodeKind,
    name: String,
}

impl NodeId {
    pub fn entity(name: impl Into<String>) -> Self {
        Self { kind: NodeKind::Entity, name: name.into() }
    }

    pub fn location(name: impl Into<String>) -> Self {
        Self { kind: NodeKind::Location, name: name.into() }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The entity or location name this id was derived from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_entity(&self) -> bool {
        self.kind == NodeKind::Entity
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.prefix())?;
        f.write_str(&self.name)
    }
}

impl FromStr for NodeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix(ENTITY_PREFIX) {
            return Ok(Self::entity(name));
        }
        if let Some(name) = s.strip_prefix(LOCATION_PREFIX) {
            return Ok(Self::location(name));
        }
        Err(IdError::UnknownNodePrefix(s.to_owned()))
    }
}

/// Action edge identifier: `action-<index>-<source>-<target>`.
///
/// The index is the action's position in the (filtered) action list at the moment the graph
/// was built, so edge identity depends on construction order and not only on content.
/// Selection correlation recovers that position through [`EdgeId::index`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn for_action(index: usize, source: &str, target: &str) -> Self {
        Self(format!("{ACTION_PREFIX}{index}-{source}-{target}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Array position embedded at construction time.
    ///
    /// Only the numeric segment is parsed, so names containing `-` do not confuse it.
    pub fn index(&self) -> Option<usize> {
        parse_action_index(&self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EdgeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for EdgeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if parse_action_index(s).is_none() {
            return Err(IdError::MalformedEdgeId(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }
}

fn parse_action_index(raw: &str) -> Option<usize> {
    let rest = raw.strip_prefix(ACTION_PREFIX)?;
    let (digits, _) = rest.split_once('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("node id must start with 'entity-' or 'location-' (got '{0}')")]
    UnknownNodePrefix(String),
    #[error("edge id must look like 'action-<index>-<source>-<target>' (got '{0}')")]
    MalformedEdgeId(String),
}
