// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::Position;

/// Row-major tiling with a fixed column count and spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub origin: Position,
    pub columns: usize,
    pub spacing_x: f64,
    pub spacing_y: f64,
}

impl GridLayout {
    /// Entities: three per row, 250 x 200 apart, starting at (100, 100).
    pub fn entities() -> Self {
        Self { origin: Position::new(100.0, 100.0), columns: 3, spacing_x: 250.0, spacing_y: 200.0 }
    }

    /// Locations: four per row, 200 x 200 apart, starting at (150, 150).
    pub fn locations() -> Self {
        Self { origin: Position::new(150.0, 150.0), columns: 4, spacing_x: 200.0, spacing_y: 200.0 }
    }

    pub fn position(&self, index: usize) -> Position {
        let columns = self.columns.max(1);
        let col = (index % columns) as f64;
        let row = (index / columns) as f64;
        Position::new(self.origin.x + col * self.spacing_x, self.origin.y + row * self.spacing_y)
    }
}

/// One grid per node category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphLayout {
    pub entities: GridLayout,
    pub locations: GridLayout,
}

impl Default for GraphLayout {
    fn default() -> Self {
        Self { entities: GridLayout::entities(), locations: GridLayout::locations() }
    }
}
