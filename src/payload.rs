//! Hands decoded content to an external interpreter.
//!
//! The content is passed as the inline program argument (`-c`) of the
//! interpreter and runs with the caller's privileges. There is no sandbox,
//! no timeout and no output capture; the child inherits stdio.

use std::process::Command;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{HexCipherError, Result};
use crate::utils::converter;

/// Interpreter a payload is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InterpreterKind {
    Python,
    Bash,
}

impl InterpreterKind {
    /// Program name looked up on `PATH`.
    pub fn program(&self) -> &'static str {
        match self {
            InterpreterKind::Python => "python3",
            InterpreterKind::Bash => "bash",
        }
    }
}

/// Runs decoded content.
pub trait PayloadExecutor {
    /// Executes `payload` and returns the exit status code.
    ///
    /// # Errors
    /// Returns [`HexCipherError::Payload`] if the payload cannot be started
    /// or was terminated without an exit code.
    fn execute(&self, payload: &[u8], kind: InterpreterKind) -> Result<i32>;
}

/// Executes payloads as `python3 -c <text>` or `bash -c <text>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubprocessExecutor;

impl PayloadExecutor for SubprocessExecutor {
    fn execute(&self, payload: &[u8], kind: InterpreterKind) -> Result<i32> {
        let program = converter::lossy_utf8(payload);
        info!(
            interpreter = kind.program(),
            bytes = payload.len(),
            "executing payload"
        );
        let status = Command::new(kind.program())
            .arg("-c")
            .arg(&program)
            .status()
            .map_err(|e| HexCipherError::Payload(format!("{}: {}", kind.program(), e)))?;
        status.code().ok_or_else(|| {
            HexCipherError::Payload(format!("{} terminated by signal", kind.program()))
        })
    }
}
