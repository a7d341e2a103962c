//! Command-line front end.
//!
//! Single-file commands write a new file next to the input; mass commands
//! rewrite a directory in place. Every command returns a short summary that
//! the binary prints on stdout.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::bit_codec::Strictness;
use crate::config::CipherConfig;
use crate::error::{HexCipherError, Result};
use crate::hash::EngineKind;
use crate::hexcipher::HexCipher;
use crate::logging::LogFormat;
use crate::mass::{FileStatus, MassDirectoryProcessor, MassMode, MassReport};
use crate::payload::{InterpreterKind, PayloadExecutor, SubprocessExecutor};

/// HexCipher CLI - I Ching hexagram encoding with optional passphrase scrambling
#[derive(Parser, Debug)]
#[command(name = "hexcipher", version)]
#[command(about = "Encode files as I Ching hexagram glyphs, optionally scrambled by a passphrase")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (same as --log-level debug)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Round implementation used for seed generation
    #[arg(long, global = true, value_enum)]
    pub engine: Option<EngineKind>,
}

/// Passphrase and round count shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct KeyArgs {
    /// Passphrase; empty means no scrambling
    #[arg(short = 'p', long, default_value = "")]
    pub passphrase: String,

    /// Hardening and scrambling rounds (overrides the config file)
    #[arg(short = 'x', long)]
    pub iterations: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode a file into hexagram glyph text
    Encode {
        /// File to encode
        file: PathBuf,
        #[command(flatten)]
        key: KeyArgs,
        /// Output path (default: hexed_<name> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode a hexagram glyph file
    Decode {
        /// File to decode
        file: PathBuf,
        #[command(flatten)]
        key: KeyArgs,
        /// Output path (default: decoded_<name> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Fail on characters outside the hexagram alphabet
        #[arg(long)]
        strict: bool,
    },
    /// Encode every file of a directory in place
    MassEncode {
        /// Directory to process
        #[arg(default_value = ".")]
        dir: PathBuf,
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Decode every file of a directory in place
    MassDecode {
        /// Directory to process
        #[arg(default_value = ".")]
        dir: PathBuf,
        #[command(flatten)]
        key: KeyArgs,
        /// Fail on characters outside the hexagram alphabet
        #[arg(long)]
        strict: bool,
    },
    /// Decode a file and run it with an interpreter
    Run {
        /// Encoded payload
        file: PathBuf,
        /// Interpreter for the decoded program
        #[arg(long, value_enum)]
        interpreter: InterpreterKind,
        #[command(flatten)]
        key: KeyArgs,
        /// Fail on characters outside the hexagram alphabet
        #[arg(long)]
        strict: bool,
    },
}

impl Cli {
    /// Loads the configuration file, if any, and applies flag overrides.
    ///
    /// # Errors
    /// Returns [`HexCipherError::Input`] or [`HexCipherError::Config`] when
    /// the configuration file cannot be used, and [`HexCipherError::Config`]
    /// for an invalid `--log-level`.
    pub fn resolve_config(&self) -> Result<CipherConfig> {
        let mut config = match &self.config {
            Some(path) => CipherConfig::load_from_file(path)?,
            None => CipherConfig::default(),
        };
        if let Some(engine) = self.engine {
            config.engine = engine;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        config.logging.validate()?;
        Ok(config)
    }
}

/// CLI context for executing commands
pub struct CliContext {
    config: CipherConfig,
    self_name: Option<OsString>,
    executor: Box<dyn PayloadExecutor>,
}

impl CliContext {
    /// Create a new CLI context
    ///
    /// The running executable's file name is remembered so mass commands
    /// leave the tool itself untouched.
    pub fn new(config: CipherConfig) -> Self {
        let self_name = std::env::current_exe()
            .ok()
            .and_then(|path| path.file_name().map(|name| name.to_os_string()));
        CliContext {
            config,
            self_name,
            executor: Box::new(SubprocessExecutor),
        }
    }

    /// Overrides the file name skipped by mass commands.
    pub fn with_self_name(mut self, name: Option<OsString>) -> Self {
        self.self_name = name;
        self
    }

    /// Replaces the executor used by `run`.
    pub fn with_executor(mut self, executor: Box<dyn PayloadExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String> {
        match command {
            Commands::Encode { file, key, output } => {
                self.handle_encode(file, key, output.as_deref())
            }
            Commands::Decode {
                file,
                key,
                output,
                strict,
            } => self.handle_decode(file, key, output.as_deref(), *strict),
            Commands::MassEncode { dir, key } => {
                self.handle_mass(dir, key, false, MassMode::Encrypt)
            }
            Commands::MassDecode { dir, key, strict } => {
                self.handle_mass(dir, key, *strict, MassMode::Decrypt)
            }
            Commands::Run {
                file,
                interpreter,
                key,
                strict,
            } => self.handle_run(file, *interpreter, key, *strict),
        }
    }

    fn build_cipher(&self, key: &KeyArgs, strict: bool) -> Result<HexCipher> {
        let mut cipher = HexCipher::from_config(&self.config);
        if let Some(iterations) = key.iterations {
            cipher.set_iterations(iterations);
        }
        if strict {
            cipher.set_strictness(Strictness::Strict);
        }
        if !key.passphrase.is_empty() {
            cipher.passphrase(&key.passphrase)?;
        }
        Ok(cipher)
    }

    fn handle_encode(&self, file: &Path, key: &KeyArgs, output: Option<&Path>) -> Result<String> {
        let cipher = self.build_cipher(key, false)?;
        let content = read_input(file)?;
        let glyphs = cipher.encode(&content);
        let target = match output {
            Some(path) => path.to_path_buf(),
            None => default_output(file, "hexed_")?,
        };
        write_output(&target, glyphs.as_bytes())?;
        info!(input = %file.display(), output = %target.display(), "file encoded");
        Ok(format!(
            "Encoded {} ({} bytes) -> {} ({} glyphs)",
            file.display(),
            content.len(),
            target.display(),
            glyphs.chars().count()
        ))
    }

    fn handle_decode(
        &self,
        file: &Path,
        key: &KeyArgs,
        output: Option<&Path>,
        strict: bool,
    ) -> Result<String> {
        let cipher = self.build_cipher(key, strict)?;
        let text = read_glyph_text(file)?;
        let decoded = cipher.decode(&text)?;
        let target = match output {
            Some(path) => path.to_path_buf(),
            None => default_output(file, "decoded_")?,
        };
        write_output(&target, &decoded.bytes)?;
        info!(input = %file.display(), output = %target.display(), "file decoded");
        let mut summary = format!(
            "Decoded {} -> {} ({} bytes)",
            file.display(),
            target.display(),
            decoded.bytes.len()
        );
        if !decoded.is_clean() {
            summary.push_str(&format!(
                "\nWarning: {} unknown glyph(s) decoded as zero",
                decoded.substitutions
            ));
        }
        Ok(summary)
    }

    fn handle_mass(
        &self,
        dir: &Path,
        key: &KeyArgs,
        strict: bool,
        mode: MassMode,
    ) -> Result<String> {
        let cipher = self.build_cipher(key, strict)?;
        let report =
            MassDirectoryProcessor::new(&cipher).run(dir, self.self_name.as_deref(), mode)?;
        Ok(format_mass_report(dir, &report))
    }

    fn handle_run(
        &self,
        file: &Path,
        interpreter: InterpreterKind,
        key: &KeyArgs,
        strict: bool,
    ) -> Result<String> {
        let cipher = self.build_cipher(key, strict)?;
        let text = read_glyph_text(file)?;
        let decoded = cipher.decode(&text)?;
        let code = self.executor.execute(&decoded.bytes, interpreter)?;
        Ok(format!(
            "{} payload {} exited with status {}",
            interpreter.program(),
            file.display(),
            code
        ))
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| HexCipherError::Input {
        path: path.to_path_buf(),
        source,
    })
}

fn read_glyph_text(path: &Path) -> Result<String> {
    let bytes = read_input(path)?;
    String::from_utf8(bytes).map_err(|_| HexCipherError::NotUtf8 {
        path: path.to_path_buf(),
    })
}

fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content).map_err(|source| HexCipherError::Output {
        path: path.to_path_buf(),
        source,
    })
}

/// `<prefix><name>` in the input's directory.
fn default_output(input: &Path, prefix: &str) -> Result<PathBuf> {
    let name = input.file_name().ok_or_else(|| HexCipherError::Input {
        path: input.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    let mut prefixed = OsString::from(prefix);
    prefixed.push(name);
    Ok(input.with_file_name(prefixed))
}

fn format_mass_report(dir: &Path, report: &MassReport) -> String {
    let verb = match report.mode {
        MassMode::Encrypt => "Encoded",
        MassMode::Decrypt => "Decoded",
    };
    let mut lines = vec![format!(
        "{} {} file(s) in {} ({} skipped, {} failed)",
        verb,
        report.processed(),
        dir.display(),
        report.skipped(),
        report.failed()
    )];
    for outcome in &report.outcomes {
        if let FileStatus::Failed(e) = &outcome.status {
            lines.push(format!("  failed: {}: {}", outcome.path.display(), e));
        }
    }
    lines.join("\n")
}
