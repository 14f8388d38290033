// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Initial node placement.
//!
//! Positions computed here are placeholders; an interactive front end is expected to run its
//! own force-directed pass on top of them.

pub mod grid;

pub use grid::{GraphLayout, GridLayout};
