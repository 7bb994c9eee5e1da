//! Configuration options for mapping.

use serde::{Deserialize, Serialize};

/// What to do with transform ops and constraint kinds the engine does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnknownOpPolicy {
    /// Treat unknown ops as no-ops and unknown constraints as passing.
    #[default]
    Ignore,
    /// Record an error for the rule and skip it.
    Reject,
}

/// Options controlling mapping behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingOptions {
    pub unknown_ops: UnknownOpPolicy,
}

impl MappingOptions {
    /// Create options that reject rules using unsupported operations.
    pub fn strict() -> Self {
        Self {
            unknown_ops: UnknownOpPolicy::Reject,
        }
    }
}
