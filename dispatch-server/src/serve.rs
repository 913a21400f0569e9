//! `serve` subcommand: run the HTTP endpoint.

use clap::Parser;
use dispatch_solver_vrp::VrpEngineConfig;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::engine::{EngineFactory, VrpEngineFactory, engine_config};
use crate::http::{DEFAULT_BODY_LIMIT, SharedEngine, router_with_body_limit};
use crate::{ARG_HOST, ARG_MAX_BODY_BYTES, ARG_MAX_GENERATIONS, ARG_PORT, ARG_TIME_LIMIT, CliError};

/// Host used when none is configured.
pub(crate) const DEFAULT_HOST: &str = "0.0.0.0";

/// Port used when none is configured.
pub(crate) const DEFAULT_PORT: u16 = 5000;

/// CLI arguments for the `serve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Listen for routing requests on POST /. Options can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Serve routing requests over HTTP"
)]
#[ortho_config(prefix = "DISPATCH")]
pub(crate) struct ServeArgs {
    /// Address to listen on.
    #[arg(long = ARG_HOST, value_name = "host")]
    #[serde(default)]
    pub(crate) host: Option<String>,
    /// Port to listen on.
    #[arg(long = ARG_PORT, value_name = "port")]
    #[serde(default)]
    pub(crate) port: Option<u16>,
    /// Upper bound on search generations per request.
    #[arg(long = ARG_MAX_GENERATIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_generations: Option<usize>,
    /// Search time per request in seconds, replacing the size-derived budget.
    #[arg(long = ARG_TIME_LIMIT, value_name = "secs")]
    #[serde(default)]
    pub(crate) time_limit: Option<u64>,
    /// Largest accepted request body in bytes.
    #[arg(long = ARG_MAX_BODY_BYTES, value_name = "bytes")]
    #[serde(default)]
    pub(crate) max_body_bytes: Option<usize>,
}

impl ServeArgs {
    pub(crate) fn into_config(self) -> Result<ServeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ServeConfig::try_from(merged)
    }
}

/// Resolved `serve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServeConfig {
    /// Address to listen on.
    pub(crate) host: String,
    /// Port to listen on.
    pub(crate) port: u16,
    /// Largest accepted request body in bytes.
    pub(crate) body_limit: usize,
    /// Engine settings shared by every request.
    pub(crate) engine: VrpEngineConfig,
}

impl ServeConfig {
    pub(crate) fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = CliError;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        let host = args.host.unwrap_or_else(|| DEFAULT_HOST.to_owned());
        if host.trim().is_empty() {
            return Err(CliError::EmptyHost);
        }
        let body_limit = args.max_body_bytes.unwrap_or(DEFAULT_BODY_LIMIT);
        if body_limit == 0 {
            return Err(CliError::EmptyBodyLimit);
        }
        Ok(Self {
            host,
            port: args.port.unwrap_or(DEFAULT_PORT),
            body_limit,
            engine: engine_config(args.max_generations, args.time_limit),
        })
    }
}

pub(super) fn run_serve(args: ServeArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let engine = VrpEngineFactory.build(&config.engine);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime.block_on(serve(&config, engine))
}

async fn serve(config: &ServeConfig, engine: SharedEngine) -> Result<(), CliError> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|source| CliError::Bind {
            address: config.address(),
            source,
        })?;
    let local = listener.local_addr().map_err(CliError::Serve)?;
    tracing::info!(%local, "dispatch listening");

    axum::serve(listener, router_with_body_limit(engine, config.body_limit))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(CliError::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for the shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ServeConfig, CliError> {
    let merged = ServeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ServeConfig::try_from(merged)
}
