//! Optional post-processing after all files are rewritten.
//!
//! The formatter is an external program; its outcome never affects the
//! rewrite itself, the caller only logs a failure.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Something that runs once over the root after the batch.
pub trait PostProcessor {
    /// Name used in log lines.
    fn name(&self) -> &str;

    fn run(&self, root: &Path) -> Result<()>;
}

/// Runs a command line with the root directory appended as last argument.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    /// Split a command line on whitespace, e.g. `npx prettier --write`.
    pub fn parse(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .context("formatter command is empty")?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl PostProcessor for CommandFormatter {
    fn name(&self) -> &str {
        &self.program
    }

    fn run(&self, root: &Path) -> Result<()> {
        log::info!("running {} on {}", self.program, root.display());
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(root)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to execute {}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }
        Ok(())
    }
}
