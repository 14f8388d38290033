// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Inkgraph: keeps a story's prose and its entity/action graph in sync.
//!
//! The [`model::Document`] holds both representations. [`sync::SyncOrchestrator`] runs the
//! text-to-graph and graph-to-text pipelines through a [`provider::TransformProvider`], and
//! [`mcp::InkgraphMcp`] exposes the whole document to agents over MCP.

pub mod build;
pub mod config;
pub mod layout;
pub mod logging;
pub mod mcp;
pub mod model;
pub mod ops;
pub mod provider;
pub mod query;
pub mod sync;
