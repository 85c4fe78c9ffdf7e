//! Serve command - start the HTTP API and browser front end
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to playox-server crate)
//! - Level 4: configuration validation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use playox_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port number to listen on
    #[arg(long, default_value = "8000")]
    pub port: u16,

    /// Directory containing the browser front end
    #[arg(long, default_value = "html")]
    pub static_dir: PathBuf,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run serve command
///
/// 1. Configure server
/// 2. Start server (blocks until Ctrl-C)
pub fn run(args: ServerArgs, seed: Option<u64>) -> Result<()> {
    let config = configure_server(&args, seed)?;

    tracing::info!("Starting PlayOX server on {}:{}", config.host, config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
///
/// The host is resolved when the server binds, so names and IPv6 literals pass through.
fn configure_server(args: &ServerArgs, seed: Option<u64>) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;

    let config = ServerConfig {
        host: args.host.clone(),
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
        seed,
    };

    Ok(config)
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(run_server(config))
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Validate that static directory exists
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. The API will work but no front end is served.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
