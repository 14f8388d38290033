// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A document holds prose (raw and structured) plus the entity/location/action graph derived
//! from it, and the selection state that correlates the two.

pub mod document;
pub mod fixtures;
pub mod graph;
pub mod ids;
pub mod rich_text;
pub mod segment;
pub mod story;

pub use document::{Document, Tab};
pub use graph::{
    ActionEdge, ActionEdgeData, EntityNode, GraphState, LocationNode, Node, NodeRef, Position,
};
pub use ids::{EdgeId, IdError, NodeId, NodeKind};
pub use rich_text::{Block, InlineRun, RichText};
pub use segment::{effective_segment, Segment, SegmentSlots};
pub use story::{
    Action, Entity, EntityProperty, Location, SampleStory, Visuals, MAX_ENTITY_PROPERTIES,
    PROPERTY_VALUE_MAX, PROPERTY_VALUE_MIN, UNKNOWN_LOCATION,
};
