use serde::Serialize;
use serde_json::Value;

use crate::error::MappingIssue;

/// Output of one mapping run: the built tree plus recorded diagnostics.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingResult {
    output: Value,
    errors: Vec<String>,
}

impl MappingResult {
    pub fn new(output: Value, issues: &[MappingIssue]) -> Self {
        Self {
            output,
            errors: issues.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn output(&self) -> &Value {
        &self.output
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_output(self) -> Value {
        self.output
    }
}
