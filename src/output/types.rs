// src/output/types.rs
//! Type definitions for output operations.
//!
//! Rendering produces an [`OutputPlan`]; nothing touches the output
//! directory until the plan is delivered.

use std::path::PathBuf;

/// Every file operation of one build, in order. Paths are relative to the
/// output directory.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    pub operations: Vec<DeliveryTarget>,
}

impl OutputPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an operation to the plan.
    pub fn with_operation(mut self, operation: DeliveryTarget) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn push(&mut self, operation: DeliveryTarget) {
        self.operations.push(operation);
    }

    pub fn write_file(&mut self, path: impl Into<PathBuf>, content: String) {
        self.push(DeliveryTarget::WriteFile {
            path: path.into(),
            content,
        });
    }

    /// Paths of every file the plan writes, for inspection in tests and logs.
    pub fn written_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.operations.iter().filter_map(|operation| match operation {
            DeliveryTarget::WriteFile { path, .. } => Some(path),
            _ => None,
        })
    }

    /// The content planned for `path`, if the plan writes it.
    pub fn content_of(&self, path: &str) -> Option<&str> {
        self.operations.iter().find_map(|operation| match operation {
            DeliveryTarget::WriteFile { path: p, content } if p.as_path() == std::path::Path::new(path) => {
                Some(content.as_str())
            }
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Represents a single output operation.
#[derive(Debug, Clone)]
pub enum DeliveryTarget {
    /// Write content to a file, creating parent directories.
    WriteFile { path: PathBuf, content: String },
    /// Copy every file of a directory (not recursive). `from` is absolute,
    /// `to` relative to the output directory.
    CopyDirectory { from: PathBuf, to: PathBuf },
    /// Create a directory
    CreateDirectory { path: PathBuf },
}

/// Result of executing an output plan.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    /// Successfully completed operations
    pub completed: Vec<CompletedOperation>,
    /// Failed operations with errors
    pub failed: Vec<FailedOperation>,
    /// Execution statistics
    pub stats: ExecutionStats,
}

impl OutputReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a completed operation to the report.
    pub fn with_completed(mut self, operation: CompletedOperation) -> Self {
        self.stats.operations_completed += 1;
        self.stats.bytes_written += operation.bytes_written;
        self.completed.push(operation);
        self
    }

    /// Adds a failed operation to the report.
    pub fn with_failed(mut self, operation: FailedOperation) -> Self {
        self.stats.operations_failed += 1;
        self.failed.push(operation);
        self
    }

    /// Checks if all operations succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A successfully completed operation.
#[derive(Debug, Clone)]
pub struct CompletedOperation {
    pub operation: DeliveryTarget,
    pub bytes_written: usize,
    pub duration_ms: u64,
}

/// A failed operation with error information.
#[derive(Debug, Clone)]
pub struct FailedOperation {
    pub operation: DeliveryTarget,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    pub operations_completed: usize,
    pub operations_failed: usize,
    pub bytes_written: usize,
    pub total_duration_ms: u64,
}
