//! MassDirectoryProcessor: in-place batch encoding and decoding.
//!
//! Walks the direct entries of one directory (no recursion), skipping
//! sub-directories, symbolic links and the entry named like the running
//! tool, and rewrites every other file with the output of the single-item
//! pipeline. Links are never followed, so a link to a sibling file cannot
//! get that file transformed twice in one run.
//!
//! Each entry is independent: a failure is recorded in the [`MassReport`]
//! and the batch moves on. Nothing is rolled back and nothing is locked. A
//! crash or a concurrent run against the same directory can leave a mix of
//! transformed and untransformed files, and the encoded format carries no
//! marker to tell them apart.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{HexCipherError, Result};
use crate::hexcipher::HexCipher;

/// Direction of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassMode {
    /// Replace each file's bytes with glyph text.
    Encrypt,
    /// Replace each file's glyph text with the decoded bytes.
    Decrypt,
}

/// Why an entry was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry is a directory.
    Directory,
    /// The entry is a symbolic link.
    Symlink,
    /// The entry carries the running tool's own name.
    SelfEntry,
}

/// Result for one directory entry.
#[derive(Debug)]
pub enum FileStatus {
    /// The file was rewritten.
    Processed {
        bytes_read: usize,
        bytes_written: usize,
        substitutions: usize,
    },
    /// The entry was not touched.
    Skipped(SkipReason),
    /// Reading, transforming or writing failed; the file is unchanged
    /// unless the write itself failed part-way.
    Failed(HexCipherError),
}

/// One entry of a [`MassReport`].
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
}

/// Per-entry results of a batch run, in file-name order.
#[derive(Debug)]
pub struct MassReport {
    pub mode: MassMode,
    pub outcomes: Vec<FileOutcome>,
}

impl MassReport {
    /// Number of rewritten files.
    pub fn processed(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Processed { .. }))
    }

    /// Number of skipped entries.
    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Skipped(_)))
    }

    /// Number of failed entries.
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Failed(_)))
    }

    /// Returns `true` when no entry failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Returns the outcome recorded for `file_name`, if any.
    pub fn outcome(&self, file_name: &str) -> Option<&FileOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.path.file_name() == Some(OsStr::new(file_name)))
    }

    fn count(&self, predicate: impl Fn(&FileStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.status)).count()
    }
}

/// Applies a [`HexCipher`] to every file of a directory.
pub struct MassDirectoryProcessor<'a> {
    cipher: &'a HexCipher,
}

impl<'a> MassDirectoryProcessor<'a> {
    /// Creates a processor that uses `cipher` for every file.
    pub fn new(cipher: &'a HexCipher) -> Self {
        MassDirectoryProcessor { cipher }
    }

    /// Processes the direct entries of `base_path`.
    ///
    /// # Parameters
    /// - `base_path`: Directory whose files are rewritten.
    /// - `self_name`: File name to leave untouched (the running tool).
    /// - `mode`: Encode or decode.
    ///
    /// # Errors
    /// Returns [`HexCipherError::Input`] if `base_path` is not a readable
    /// directory. Per-file failures never abort the batch; they are recorded
    /// in the report.
    pub fn run(
        &self,
        base_path: &Path,
        self_name: Option<&OsStr>,
        mode: MassMode,
    ) -> Result<MassReport> {
        let metadata = fs::metadata(base_path).map_err(|source| HexCipherError::Input {
            path: base_path.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(HexCipherError::Input {
                path: base_path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "not a directory",
                ),
            });
        }

        info!(
            directory = %base_path.display(),
            ?mode,
            keyed = self.cipher.is_keyed(),
            iterations = self.cipher.iterations(),
            "mass run started"
        );

        let self_name: Option<OsString> = self_name.map(OsStr::to_os_string);
        let mut outcomes = Vec::new();
        let entries = WalkDir::new(base_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(HexCipherError::Input {
                        path: base_path.to_path_buf(),
                        source: e
                            .into_io_error()
                            .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
                    });
                }
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    warn!(path = %path.display(), error = %e, "unreadable entry");
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                    outcomes.push(FileOutcome {
                        status: FileStatus::Failed(HexCipherError::Input {
                            path: path.clone(),
                            source,
                        }),
                        path,
                    });
                    continue;
                }
            };

            let path = entry.path().to_path_buf();
            let status = if self_name.as_deref() == Some(entry.file_name()) {
                FileStatus::Skipped(SkipReason::SelfEntry)
            } else if entry.path_is_symlink() {
                FileStatus::Skipped(SkipReason::Symlink)
            } else if entry.file_type().is_dir() {
                FileStatus::Skipped(SkipReason::Directory)
            } else {
                match self.process_file(&path, mode) {
                    Ok(status) => status,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "entry failed");
                        FileStatus::Failed(e)
                    }
                }
            };
            debug!(path = %path.display(), ?status, "entry done");
            outcomes.push(FileOutcome { path, status });
        }

        let report = MassReport { mode, outcomes };
        info!(
            processed = report.processed(),
            skipped = report.skipped(),
            failed = report.failed(),
            "mass run finished"
        );
        Ok(report)
    }

    fn process_file(&self, path: &Path, mode: MassMode) -> Result<FileStatus> {
        let content = fs::read(path).map_err(|source| HexCipherError::Input {
            path: path.to_path_buf(),
            source,
        })?;

        let (output, substitutions) = match mode {
            MassMode::Encrypt => (self.cipher.encode(&content).into_bytes(), 0),
            MassMode::Decrypt => {
                let text = std::str::from_utf8(&content).map_err(|_| HexCipherError::NotUtf8 {
                    path: path.to_path_buf(),
                })?;
                let decoded = self.cipher.decode(text)?;
                let substitutions = decoded.substitutions;
                (decoded.into_bytes(), substitutions)
            }
        };

        fs::write(path, &output).map_err(|source| HexCipherError::Output {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(FileStatus::Processed {
            bytes_read: content.len(),
            bytes_written: output.len(),
            substitutions,
        })
    }
}
