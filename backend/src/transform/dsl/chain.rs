//! Saved operation chains.
//!
//! A [`Pipeline`] bundles an ordered operation list with an output format,
//! so a whole text → text transformation can be stored as JSON and replayed.

use serde::{Deserialize, Serialize};

use crate::error::TransformResult;
use crate::models::{Matrix, Row};
use crate::parser::{parse, serialize};
use crate::render::to_markup_table;
use crate::transform::sort::SortDirection;

use super::executor::execute;
use super::operations::Operation;

/// What a pipeline run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Comma/newline delimited text
    #[default]
    Csv,
    /// Markup table fragment
    Html,
}

/// An ordered list of matrix operations plus an output format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Version of the pipeline format
    #[serde(default = "default_version")]
    pub version: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Operations, applied left to right
    #[serde(default)]
    pub operations: Vec<Operation>,

    /// Output of [`Pipeline::run`]
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self {
            version: default_version(),
            description: String::new(),
            operations: Vec::new(),
            output: OutputFormat::default(),
        }
    }

    /// Parse a pipeline from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Append an operation
    pub fn then(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    /// Set the output format
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Apply the operations to a matrix.
    pub fn apply(&self, matrix: &[Row]) -> TransformResult<Matrix> {
        execute(matrix, &self.operations)
    }

    /// Parse `text`, apply the operations and render the configured output.
    pub fn run(&self, text: &str) -> TransformResult<String> {
        let matrix = self.apply(&parse(text))?;
        Ok(match self.output {
            OutputFormat::Csv => serialize(&matrix),
            OutputFormat::Html => to_markup_table(&matrix),
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate an example pipeline for documentation
pub fn example_pipeline() -> Pipeline {
    Pipeline::new()
        .with_description("Swap the first and third columns, drop row 2, sort by column 2")
        .then(Operation::SwapColumns { n: 1, m: 3 })
        .then(Operation::DeleteRow { n: 2 })
        .then(Operation::SortByColumn {
            col: 2,
            direction: SortDirection::Descending,
        })
        .with_output(OutputFormat::Html)
}
