// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration loaded from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::layout::{GraphLayout, GridLayout};
use crate::model::Position;

pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound for a single provider call; 0 waits forever.
    pub provider_timeout_ms: u64,
    pub layout: LayoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self { provider_timeout_ms: DEFAULT_PROVIDER_TIMEOUT_MS, layout: LayoutConfig::default() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub entities: GridOverride,
    pub locations: GridOverride,
}

/// Partial grid settings; unset fields keep the built-in grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOverride {
    pub origin_x: Option<f64>,
    pub origin_y: Option<f64>,
    pub columns: Option<usize>,
    pub spacing_x: Option<f64>,
    pub spacing_y: Option<f64>,
}

impl GridOverride {
    fn apply(&self, base: GridLayout) -> Result<GridLayout, ConfigError> {
        if self.columns == Some(0) {
            return Err(ConfigError::InvalidLayout("columns must be at least 1".to_owned()));
        }
        Ok(GridLayout {
            origin: Position::new(
                self.origin_x.unwrap_or(base.origin.x),
                self.origin_y.unwrap_or(base.origin.y),
            ),
            columns: self.columns.unwrap_or(base.columns),
            spacing_x: self.spacing_x.unwrap_or(base.spacing_x),
            spacing_y: self.spacing_y.unwrap_or(base.spacing_y),
        })
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::parse(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.graph_layout()?;
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn provider_timeout(&self) -> Option<Duration> {
        (self.provider_timeout_ms > 0).then(|| Duration::from_millis(self.provider_timeout_ms))
    }

    pub fn graph_layout(&self) -> Result<GraphLayout, ConfigError> {
        let base = GraphLayout::default();
        Ok(GraphLayout {
            entities: self.layout.entities.apply(base.entities)?,
            locations: self.layout.locations.apply(base.locations)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Config, ConfigError};
    use crate::layout::GraphLayout;
    use crate::model::Position;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").expect("parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.provider_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.graph_layout().expect("layout"), GraphLayout::default());
    }

    #[test]
    fn zero_timeout_disables_it() {
        let config = Config::parse("provider_timeout_ms = 0").expect("parse");
        assert_eq!(config.provider_timeout(), None);
    }

    #[test]
    fn grid_overrides_are_partial() {
        let config = Config::parse(
            r#"
            [layout.entities]
            columns = 2
            origin_x = 0.0

            [layout.locations]
            spacing_y = 50.0
            "#,
        )
        .expect("parse");

        let layout = config.graph_layout().expect("layout");
        assert_eq!(layout.entities.columns, 2);
        assert_eq!(layout.entities.origin, Position::new(0.0, 100.0));
        assert_eq!(layout.entities.spacing_x, 250.0);
        assert_eq!(layout.locations.columns, 4);
        assert_eq!(layout.locations.spacing_y, 50.0);
    }

    #[test]
    fn zero_columns_is_rejected() {
        let config = Config::parse("[layout.locations]\ncolumns = 0").expect("parse");
        assert!(matches!(config.graph_layout(), Err(ConfigError::InvalidLayout(_))));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load(std::path::Path::new("/nonexistent/inkgraph.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().starts_with("failed to read /nonexistent/inkgraph.toml"));
    }

    #[test]
    fn unknown_value_types_fail_to_parse() {
        assert!(Config::parse("provider_timeout_ms = \"soon\"").is_err());
    }
}
