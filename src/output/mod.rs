// src/output/mod.rs
//! Output handling with clear separation of planning and execution.
//!
//! Rendering builds an [`OutputPlan`] without touching the disk;
//! [`deliver`] executes it against the output directory.

mod types;
mod writer;

pub use types::{
    CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan, OutputReport,
};
pub use writer::{deliver, reset_directory};
