// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over a document.
//!
//! Queries locate action passages in the text and map selections in either representation
//! onto segments of the ordered action list.

pub mod highlight;
pub mod passage;
pub mod selection;

pub use highlight::{displayed_edges, highlighted_action_indices, text_highlights, TextHighlight};
pub use passage::{
    byte_range_to_chars, char_range_to_bytes, first_occurrence, locate, locate_actions,
    PassageReport,
};
pub use selection::{
    action_refs, apply_correlation, correlate, edge_index, segment_for_edges, segment_for_nodes,
    segment_for_text_range, ActionRef,
};
