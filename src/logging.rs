// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. Output goes to stderr so a stdio MCP transport keeps stdout
/// to itself. `RUST_LOG` overrides the default `info` filter.
///
/// Calling this twice is harmless; the second call leaves the first subscriber in place.
pub fn init_logging(ansi: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_ansi(ansi).with_target(false);

    let _ = tracing_subscriber::registry().with(filter).with(stderr_layer).try_init();
}
