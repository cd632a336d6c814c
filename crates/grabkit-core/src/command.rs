//! Download command construction.
//!
//! A [`DownloadCommand`] is an argument vector; it is never handed to a shell.
//! Its `Display` form is the audit line printed before the command runs.

use crate::config::GrabConfig;
use crate::request::DownloadRequest;
use std::fmt;

/// Index pages skipped while mirroring a directory listing.
const MIRROR_REJECT: &str = "index.html*";

/// Which of the three command shapes a request turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Recursive mirror of a directory-like URL.
    Mirror,
    /// Multi-connection download with the default downloader.
    Segmented,
    /// `<tool> <url>` for any other tool.
    Plain,
}

/// External program plus arguments, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadCommand {
    pub kind: CommandKind,
    pub program: String,
    pub args: Vec<String>,
    /// Send the child's stderr to stdout.
    pub merge_stderr: bool,
}

/// Build the single command for `request`.
pub fn build_command(request: &DownloadRequest, cfg: &GrabConfig) -> DownloadCommand {
    let url = request.effective_url(&cfg.credentials);

    if request.is_directory() {
        return DownloadCommand {
            kind: CommandKind::Mirror,
            program: cfg.mirror_tool.clone(),
            args: vec![
                "-c".to_string(),
                "-r".to_string(),
                "-np".to_string(),
                "-R".to_string(),
                MIRROR_REJECT.to_string(),
                url,
            ],
            merge_stderr: false,
        };
    }

    let tool = request.tool_or(&cfg.default_downloader);
    if tool != cfg.default_downloader {
        return DownloadCommand {
            kind: CommandKind::Plain,
            program: tool.to_string(),
            args: vec![url],
            merge_stderr: false,
        };
    }

    let mut args = Vec::with_capacity(10);
    let program = if cfg.unbuffered {
        args.push("-o0".to_string());
        args.push(tool.to_string());
        "stdbuf".to_string()
    } else {
        tool.to_string()
    };
    args.extend([
        format!("-x{}", cfg.connections),
        format!("-s{}", cfg.segments),
        "--file-allocation=none".to_string(),
        "--continue=true".to_string(),
        "--allow-overwrite=false".to_string(),
        "--auto-file-renaming=false".to_string(),
        "--show-console-readout=true".to_string(),
        url,
    ]);

    DownloadCommand {
        kind: CommandKind::Segmented,
        program,
        args,
        merge_stderr: true,
    }
}

impl fmt::Display for DownloadCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            f.write_str(" ")?;
            if needs_quotes(arg) {
                write_quoted(f, arg)?;
            } else {
                f.write_str(arg)?;
            }
        }
        if self.merge_stderr {
            f.write_str(" 2>&1")?;
        }
        Ok(())
    }
}

/// URLs are always quoted; anything else only when a shell would touch it.
fn needs_quotes(arg: &str) -> bool {
    arg.is_empty()
        || arg.contains("://")
        || arg.chars().any(|c| {
            c.is_whitespace()
                || matches!(
                    c,
                    '*' | '?' | '[' | ']' | '"' | '\'' | '$' | '`' | '\\' | '&' | ';' | '|'
                        | '<' | '>' | '(' | ')' | '#' | '~' | '!'
                )
        })
}

fn write_quoted(f: &mut fmt::Formatter<'_>, arg: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in arg.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}
