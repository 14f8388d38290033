// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Whether the text and the graph are known to disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Staleness {
    #[default]
    Clean,
    Stale,
}

/// Where a text replacement came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EditOrigin {
    /// Typed or pasted by the user.
    #[default]
    User,
    /// Output of the rewrite pipeline; derived from the current graph.
    Rewrite,
}

impl Staleness {
    pub fn is_stale(self) -> bool {
        self == Self::Stale
    }

    /// Text replaced. Only a user edit that changes the content marks the document stale;
    /// unchanged content (cursor or selection moves) and rewrite output never transition.
    pub fn on_text_edit(&mut self, changed: bool, origin: EditOrigin) {
        if changed && origin == EditOrigin::User {
            *self = Self::Stale;
        }
    }

    /// Structural graph edit made by the user (drag, reconnect, edge change).
    pub fn on_graph_edit(&mut self) {
        *self = Self::Stale;
    }

    /// Either transformation pipeline completed.
    pub fn on_sync_complete(&mut self) {
        *self = Self::Clean;
    }
}
