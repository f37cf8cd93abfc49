//! Import resolution through an external outline command
//!
//! The command receives the document's base path and imports as JSON on
//! stdin and answers with an [`OutlineResponse`] on stdout.

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::{ImportResolver, OutlineResponse, ResolveError, ResolvedModule};
use crate::scanner::ImportDecl;

#[derive(Serialize)]
struct OutlineRequest<'a> {
    base: &'a str,
    imports: &'a [ImportDecl],
}

/// Resolves imports by running a configured program
#[derive(Debug, Clone)]
pub struct CommandResolver {
    program: String,
    args: Vec<String>,
}

impl CommandResolver {
    /// `command[0]` is the program, the rest its arguments. `None` if empty.
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn io_error(&self, source: std::io::Error) -> ResolveError {
        ResolveError::Io {
            path: PathBuf::from(&self.program),
            source,
        }
    }
}

#[async_trait]
impl ImportResolver for CommandResolver {
    async fn resolve(
        &self,
        base: &str,
        imports: &[ImportDecl],
    ) -> Result<Vec<ResolvedModule>, ResolveError> {
        let request = serde_json::to_vec(&OutlineRequest { base, imports })?;

        // Killed on drop so a timed out resolution does not leave it running
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.io_error(e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&request).await.map_err(|e| self.io_error(e))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| self.io_error(e))?;
        if !output.status.success() {
            return Err(ResolveError::Other(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let response = OutlineResponse::from_json(&String::from_utf8_lossy(&output.stdout))?;
        debug!(
            "{} returned {} modules",
            self.program,
            response.modules.len()
        );
        Ok(response.modules)
    }

    fn resolver_name(&self) -> &'static str {
        "command"
    }
}
