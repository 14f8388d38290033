// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text/graph synchronization.
//!
//! [`Staleness`] tracks whether the two representations have diverged. [`SyncOrchestrator`]
//! owns the document and runs the two transformation pipelines against a provider.

mod orchestrator;
mod staleness;

pub use orchestrator::{Pipeline, SyncError, SyncOrchestrator, SyncReport};
pub use staleness::{EditOrigin, Staleness};

#[cfg(test)]
mod tests;
