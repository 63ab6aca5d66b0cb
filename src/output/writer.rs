// src/output/writer.rs
//! Executes output operations by performing actual I/O.
//!
//! This module is the only place where the output directory is written,
//! keeping rendering pure and testable.

use super::types::*;
use crate::error::AppError;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Deletes `out_dir` if it exists and recreates it empty.
pub fn reset_directory(out_dir: &Path) -> Result<(), AppError> {
    if out_dir.exists() {
        log::info!("Removing previous output at {}", out_dir.display());
        fs::remove_dir_all(out_dir)?;
    }
    fs::create_dir_all(out_dir)?;
    Ok(())
}

/// Delivers the output plan under `root`, performing all I/O operations.
///
/// Every operation is attempted; if any failed the whole delivery fails
/// with the list of failures.
pub fn deliver(plan: OutputPlan, root: &Path) -> Result<OutputReport, AppError> {
    let mut report = OutputReport::new();
    let start_time = Instant::now();

    log::info!(
        "Executing output plan with {} operations into {}",
        plan.operations.len(),
        root.display()
    );

    for operation in plan.operations {
        let op_start = Instant::now();
        match execute_operation(&operation, root) {
            Ok(bytes_written) => {
                let duration_ms = op_start.elapsed().as_millis() as u64;
                report = report.with_completed(CompletedOperation {
                    operation,
                    bytes_written,
                    duration_ms,
                });
            }
            Err(e) => {
                log::error!("Operation failed: {}", e);
                report = report.with_failed(FailedOperation {
                    operation,
                    error: e.to_string(),
                });
            }
        }
    }

    report.stats.total_duration_ms = start_time.elapsed().as_millis() as u64;

    log::info!(
        "Output plan execution complete: {} succeeded, {} failed, {} bytes in {}ms",
        report.stats.operations_completed,
        report.stats.operations_failed,
        report.stats.bytes_written,
        report.stats.total_duration_ms
    );

    if !report.is_success() {
        return Err(AppError::DeliveryFailed {
            failures: report.failed.iter().map(|f| f.error.clone()).collect(),
        });
    }
    Ok(report)
}

/// Executes a single output operation.
fn execute_operation(operation: &DeliveryTarget, root: &Path) -> Result<usize, AppError> {
    match operation {
        DeliveryTarget::WriteFile { path, content } => write_file(&root.join(path), content),
        DeliveryTarget::CopyDirectory { from, to } => copy_directory(from, &root.join(to)),
        DeliveryTarget::CreateDirectory { path } => {
            create_directory(&root.join(path))?;
            Ok(0)
        }
    }
}

/// Writes content to a file.
fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(content.len())
}

/// Copies the regular files of `from` into `to`.
fn copy_directory(from: &Path, to: &Path) -> Result<usize, AppError> {
    create_directory(to)?;
    let mut bytes = 0;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            log::warn!("Skipping non-file asset {}", entry.path().display());
            continue;
        }
        let copied = fs::copy(entry.path(), to.join(entry.file_name()))?;
        bytes += copied as usize;
    }
    log::info!("Copied assets from {} to {}", from.display(), to.display());
    Ok(bytes)
}

/// Creates a directory.
fn create_directory(path: &Path) -> Result<(), AppError> {
    if path.exists() {
        if path.is_dir() {
            log::debug!("Directory already exists: {}", path.display());
            return Ok(());
        }
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", path.display()),
        )));
    }

    fs::create_dir_all(path)?;
    log::debug!("Created directory: {}", path.display());
    Ok(())
}
