//! DSL (Domain Specific Language) for table transformation
//!
//! This module provides:
//! - `operations`: Configured matrix and record operations
//! - `executor`: Run operation lists, compose stages
//! - `chain`: Saved pipelines (operations + output format) as JSON
//!
//! ## Usage Flow
//!
//! ```text
//! text → parse → [Operation, Operation, ...] → serialize / to_markup_table
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tabulate::{Operation, OutputFormat, Pipeline};
//!
//! let pipeline = Pipeline::new()
//!     .then(Operation::SwapColumns { n: 1, m: 2 })
//!     .with_output(OutputFormat::Csv);
//!
//! assert_eq!(pipeline.run("A,B\nC,D").unwrap(), "B,A\nD,C");
//! ```

pub mod chain;
pub mod executor;
pub mod operations;

// Re-exports for convenience
pub use chain::{example_pipeline, OutputFormat, Pipeline};
pub use executor::{compose, compose_all, execute, execute_records, Stage};
pub use operations::{operations_description, Operation, RecordOperation};
