//! Running a [`DownloadCommand`] with its output streamed live.

use crate::command::DownloadCommand;
use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// Conventional shell status for "command not found".
pub const EXIT_NOT_FOUND: i32 = 127;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{program}: command not found")]
    NotFound { program: String },
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl ExecError {
    /// Status this tool should exit with when the launch itself failed.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecError::NotFound { .. } => EXIT_NOT_FOUND,
            ExecError::Spawn { .. } | ExecError::Wait { .. } => 1,
        }
    }
}

/// Write the audit line for `cmd` and flush it before anything is spawned.
pub fn print_command<W: Write>(cmd: &DownloadCommand, mut out: W) -> io::Result<()> {
    writeln!(out, "{cmd}")?;
    out.flush()
}

/// Spawn `cmd` and wait for it.
///
/// stdin and stdout are inherited, so the child's output reaches the terminal
/// as it is produced. With `merge_stderr` the child's stderr goes to our
/// stdout as well.
pub fn run_command(cmd: &DownloadCommand) -> Result<ExitStatus, ExecError> {
    let mut command = Command::new(&cmd.program);
    command
        .args(&cmd.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit());
    if cmd.merge_stderr {
        command.stderr(Stdio::from(io::stdout()));
    } else {
        command.stderr(Stdio::inherit());
    }

    tracing::info!(program = %cmd.program, kind = ?cmd.kind, "spawning downloader");
    let mut child = command.spawn().map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ExecError::NotFound {
                program: cmd.program.clone(),
            }
        } else {
            ExecError::Spawn {
                program: cmd.program.clone(),
                source,
            }
        }
    })?;

    let status = child.wait().map_err(|source| ExecError::Wait {
        program: cmd.program.clone(),
        source,
    })?;
    tracing::info!(program = %cmd.program, %status, "downloader finished");
    Ok(status)
}

/// Exit status to propagate for a finished child.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
