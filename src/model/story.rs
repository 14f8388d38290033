// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Narrative records exchanged with the transform provider.

/// Location name used by actions whose setting was not stated.
pub const UNKNOWN_LOCATION: &str = "unknown";

pub const MAX_ENTITY_PROPERTIES: usize = 3;
pub const PROPERTY_VALUE_MIN: u8 = 1;
pub const PROPERTY_VALUE_MAX: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityProperty {
    pub name: String,
    pub value: u8,
}

impl EntityProperty {
    pub fn new(name: impl Into<String>, value: u8) -> Self {
        Self { name: name.into(), value }
    }
}

/// A character or notable object. `name` is the join key used by nodes and actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub emoji: String,
    pub properties: Vec<EntityProperty>,
}

impl Entity {
    pub fn new(name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self { name: name.into(), emoji: emoji.into(), properties: Vec::new() }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: u8) -> Self {
        self.properties.push(EntityProperty::new(name, value));
        self
    }

    /// Keeps at most three properties and clamps each value into `1..=10`.
    pub fn normalize(&mut self) {
        self.properties.truncate(MAX_ENTITY_PROPERTIES);
        for property in &mut self.properties {
            property.value = property.value.clamp(PROPERTY_VALUE_MIN, PROPERTY_VALUE_MAX);
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub name: String,
    pub emoji: String,
}

impl Location {
    pub fn new(name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self { name: name.into(), emoji: emoji.into() }
    }
}

/// One chronological event. The order of actions in a list is the narrative order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub source: String,
    pub target: String,
    pub location: String,
    pub passage: String,
}

impl Action {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        location: impl Into<String>,
        passage: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            target: target.into(),
            location: location.into(),
            passage: passage.into(),
        }
    }
}

/// The extraction triple.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visuals {
    pub entities: Vec<Entity>,
    pub locations: Vec<Location>,
    pub actions: Vec<Action>,
}

impl Visuals {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.locations.is_empty() && self.actions.is_empty()
    }
}

/// A seed document: prose plus visuals that already match it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleStory {
    pub text: String,
    pub visuals: Visuals,
}
