// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Inkgraph CLI entrypoint.
//!
//! By default this serves MCP over streamable HTTP at `http://127.0.0.1:<port>/mcp` until
//! interrupted.
//!
//! Use `--mcp` to run the MCP server over stdio instead (intended for tool integrations).

use std::error::Error;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use inkgraph::config::Config;
use inkgraph::mcp::InkgraphMcp;
use inkgraph::model::{fixtures, Document};
use inkgraph::provider::{FailClosed, TemplateBackend};
use inkgraph::sync::SyncOrchestrator;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};

const DEFAULT_MCP_HTTP_PORT: u16 = 27436;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--config <file>] [--mcp-http-port <port>] [--demo]\n  {program} [--config <file>] --mcp [--demo]\n  {program} [--config <file>] --demo\n\nServes MCP over streamable HTTP at `http://127.0.0.1:<port>/mcp` by default.\n--mcp-http-port selects the port (0 = ephemeral; default {DEFAULT_MCP_HTTP_PORT}).\n--mcp serves MCP over stdio instead.\n\n--demo alone loads the sample story, rewrites it from its graph and prints the result.\nCombined with a server mode it preloads the sample story instead.\n\n--config reads a TOML file (provider_timeout_ms, [layout.entities], [layout.locations])."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    mcp: bool,
    demo: bool,
    mcp_http_port: Option<u16>,
    config_path: Option<PathBuf>,
}

impl CliOptions {
    /// `--demo` on its own prints and exits instead of serving.
    fn serves(&self) -> bool {
        self.mcp || self.mcp_http_port.is_some() || !self.demo
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mcp" => {
                if options.mcp {
                    return Err(());
                }
                options.mcp = true;
            }
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--mcp-http-port" => {
                if options.mcp_http_port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.mcp_http_port = Some(port);
            }
            "--config" => {
                if options.config_path.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.config_path = Some(PathBuf::from(path));
            }
            _ => return Err(()),
        }
    }

    if options.mcp && options.mcp_http_port.is_some() {
        return Err(());
    }

    Ok(options)
}

fn build_orchestrator(config: &Config) -> Result<SyncOrchestrator, Box<dyn Error>> {
    let provider =
        FailClosed::new(TemplateBackend::new()).with_timeout(config.provider_timeout());
    Ok(SyncOrchestrator::with_document(Document::new(), Arc::new(provider), config.graph_layout()?))
}

async fn run_demo(sync: &SyncOrchestrator) {
    let dropped = sync.load_sample(&fixtures::alice_in_wonderland()).await;
    for action in &dropped {
        println!("dropped action #{} '{}' ({:?})", action.index, action.name, action.reason);
    }

    let report = sync.rewrite_from_visuals().await;
    let text = sync.read(|document| document.text().to_owned()).await;
    println!("{text}");
    if let Some(reason) = report.fallback {
        println!("(fallback: {reason})");
    }
}

async fn serve_http(mcp: InkgraphMcp, port: u16) -> Result<(), Box<dyn Error>> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "serving MCP over streamable HTTP at /mcp");

    let config =
        StreamableHttpServerConfig { stateful_mode: true, ..StreamableHttpServerConfig::default() };
    let shutdown_token = config.cancellation_token.clone();

    let session_manager = Arc::new(LocalSessionManager::default());
    let mcp_service = StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config);

    let router = Router::new().nest_service("/mcp", mcp_service);
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            shutdown_token.cancel();
        })
        .await?;
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "inkgraph".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        inkgraph::logging::init_logging(std::io::stderr().is_terminal());

        let config = match &options.config_path {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        let sync = build_orchestrator(&config)?;

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        if !options.serves() {
            runtime.block_on(run_demo(&sync));
            return Ok(());
        }

        let mcp = InkgraphMcp::new(sync.clone());
        runtime.block_on(async move {
            if options.demo {
                sync.load_sample(&fixtures::alice_in_wonderland()).await;
            }
            if options.mcp {
                mcp.serve_stdio().await?;
            } else {
                serve_http(mcp, options.mcp_http_port.unwrap_or(DEFAULT_MCP_HTTP_PORT)).await?;
            }
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("inkgraph: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{parse_options, CliOptions};

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn parses_empty_args() {
        let options = parse(&[]).expect("parse options");
        assert_eq!(options, CliOptions::default());
        assert!(options.serves());
    }

    #[test]
    fn demo_alone_does_not_serve() {
        let options = parse(&["--demo"]).expect("parse options");
        assert!(options.demo);
        assert!(!options.serves());

        let options = parse(&["--demo", "--mcp"]).expect("parse options");
        assert!(options.serves());

        let options = parse(&["--mcp-http-port", "0", "--demo"]).expect("parse options");
        assert_eq!(options.mcp_http_port, Some(0));
        assert!(options.serves());
    }

    #[test]
    fn parses_config_path() {
        let options = parse(&["--config", "inkgraph.toml", "--mcp"]).expect("parse options");
        assert_eq!(options.config_path, Some(PathBuf::from("inkgraph.toml")));
        assert!(options.mcp);
    }

    #[test]
    fn rejects_mcp_http_port_with_stdio_mcp_mode() {
        parse(&["--mcp", "--mcp-http-port", "0"]).unwrap_err();
    }

    #[test]
    fn rejects_bad_values() {
        parse(&["--mcp-http-port", "seventy"]).unwrap_err();
        parse(&["--mcp-http-port"]).unwrap_err();
        parse(&["--config"]).unwrap_err();
    }

    #[test]
    fn rejects_unknown_and_positional_args() {
        parse(&["--nope"]).unwrap_err();
        parse(&["story.txt"]).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse(&["--demo", "--demo"]).unwrap_err();
        parse(&["--mcp", "--mcp"]).unwrap_err();
        parse(&["--config", "a", "--config", "b"]).unwrap_err();
    }
}
