//! `grab <url> [<tool>]` – build one download command, print it, run it.

use anyhow::{Context, Result};
use clap::Parser;
use grabkit_core::command::build_command;
use grabkit_core::config;
use grabkit_core::exec::{exit_code, print_command, run_command};
use grabkit_core::request::DownloadRequest;
use std::io;

#[derive(Debug, Parser)]
#[command(name = "grab", version)]
#[command(about = "Build and run a download command for one URL", long_about = None)]
pub struct GrabCli {
    /// URL to download. A path ending in `/` is mirrored recursively.
    pub url: Option<String>,

    /// Downloader for file URLs (default from config, normally aria2c).
    pub tool: Option<String>,

    /// Print the command line without running it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Parse the process arguments and run. Returns the status to exit with.
pub fn run_from_args() -> Result<i32> {
    run(GrabCli::parse())
}

pub fn run(cli: GrabCli) -> Result<i32> {
    // Validate before touching the config file.
    let request = DownloadRequest::parse(cli.url.as_deref(), cli.tool.as_deref())?;

    let cfg = config::load_or_init().context("load config")?;
    tracing::debug!(
        default_downloader = %cfg.default_downloader,
        credential_hosts = cfg.credentials.len(),
        "loaded config"
    );

    let command = build_command(&request, &cfg);
    tracing::info!(
        host = %request.host(),
        tool = %request.tool_or(&cfg.default_downloader),
        kind = ?command.kind,
        "built download command"
    );

    print_command(&command, io::stdout().lock()).context("write command line")?;
    if cli.dry_run {
        return Ok(0);
    }

    let status = run_command(&command)?;
    Ok(exit_code(status))
}
