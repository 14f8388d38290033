// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Exact-substring passage lookup.
//!
//! Offsets are byte offsets into the UTF-8 text. A valid UTF-8 needle can only match at char
//! boundaries, so every returned range can be used to slice the text directly. Callers that
//! speak in character offsets convert at their boundary with [`char_range_to_bytes`] and
//! [`byte_range_to_chars`].

use std::ops::Range;

use memchr::memmem;

use crate::model::ActionEdge;

/// Every non-overlapping occurrence of `passage` in `text`, left to right.
///
/// Scanning resumes at the end of each match. A passage that does not occur verbatim (or is
/// empty) yields no ranges; that is a miss, not an error.
pub fn locate(text: &str, passage: &str) -> Vec<Range<usize>> {
    if passage.is_empty() {
        return Vec::new();
    }
    memmem::find_iter(text.as_bytes(), passage.as_bytes())
        .map(|start| start..start + passage.len())
        .collect()
}

/// First occurrence only, used for selection coverage.
pub fn first_occurrence(text: &str, passage: &str) -> Option<Range<usize>> {
    if passage.is_empty() {
        return None;
    }
    memmem::find(text.as_bytes(), passage.as_bytes()).map(|start| start..start + passage.len())
}

/// Byte range spanned by the characters `chars` of `text`. Offsets past the end clamp to the
/// end of the text.
pub fn char_range_to_bytes(text: &str, chars: Range<usize>) -> Range<usize> {
    let byte_at = |offset: usize| {
        text.char_indices().nth(offset).map_or(text.len(), |(byte, _)| byte)
    };
    let start = byte_at(chars.start);
    start..byte_at(chars.end).max(start)
}

/// Character range covering the byte range `bytes` of `text`.
pub fn byte_range_to_chars(text: &str, bytes: Range<usize>) -> Range<usize> {
    let char_at =
        |offset: usize| text.char_indices().take_while(|(byte, _)| *byte < offset).count();
    char_at(bytes.start)..char_at(bytes.end)
}

/// Passage ranges for every edge, by edge position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassageReport {
    pub ranges: Vec<Vec<Range<usize>>>,
    /// Edge positions whose passage was not found verbatim.
    pub missed: Vec<usize>,
}

pub fn locate_actions(text: &str, edges: &[ActionEdge]) -> PassageReport {
    let mut report = PassageReport::default();
    for (index, edge) in edges.iter().enumerate() {
        let ranges = locate(text, edge.passage());
        if ranges.is_empty() {
            tracing::debug!(index, edge = %edge.id(), "passage not found verbatim");
            report.missed.push(index);
        }
        report.ranges.push(ranges);
    }
    report
}
