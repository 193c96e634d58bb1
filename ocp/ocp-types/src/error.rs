//! Error types for field injection.

use thiserror::Error;

use crate::plan::{CostVariant, FunctionKind, IntegratorVariant, NlpSolverVariant};

/// Errors that can occur while setting a field on an OCP solver instance.
///
/// Every variant is terminal for the call that produced it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OcpError {
    /// The field name is not in the recognized set.
    #[error("field '{field}' is not supported; supported fields are: {supported}")]
    UnsupportedField {
        /// The rejected field name.
        field: String,
        /// Comma-separated list of recognized field names.
        supported: String,
    },

    /// Stage index past the last stage the field admits.
    #[error("field '{field}': stage {stage} is out of range (last admissible stage is {last})")]
    StageOutOfRange {
        /// Field or attribute being addressed.
        field: String,
        /// The requested stage.
        stage: usize,
        /// Last stage the field accepts.
        last: usize,
    },

    /// The field cannot be addressed the way the caller asked.
    #[error("field '{field}' does not support {mode} addressing")]
    UnsupportedAddressingMode {
        /// Field being addressed.
        field: String,
        /// The rejected mode ("whole-horizon" or "single-stage").
        mode: &'static str,
    },

    /// Buffer element count differs from the required size.
    #[error("field '{field}': expected {expected} elements, got {actual}")]
    DimensionMismatch {
        /// Field or attribute being set.
        field: String,
        /// Required element count.
        expected: usize,
        /// Element count supplied.
        actual: usize,
    },

    /// Matrix buffer has the wrong row or column count.
    #[error(
        "field '{field}': expected a {expected_rows}x{expected_cols} matrix, got {rows}x{cols}"
    )]
    MatrixDimensionMismatch {
        /// Field being set.
        field: String,
        /// Required row count.
        expected_rows: usize,
        /// Required column count.
        expected_cols: usize,
        /// Row count supplied.
        rows: usize,
        /// Column count supplied.
        cols: usize,
    },

    /// The stage's cost formulation does not have this field.
    #[error("field '{field}' is not supported for cost variant {variant} at stage {stage}")]
    IncompatibleFieldForVariant {
        /// Field being set.
        field: String,
        /// Stage whose cost variant rejected the field.
        stage: usize,
        /// Configured cost variant at that stage.
        variant: CostVariant,
    },

    /// The field needs a specific dynamics integrator.
    #[error(
        "field '{field}' is only supported for integrator {required} (stage {stage} uses {actual})"
    )]
    FieldOnlySupportedForIntegrator {
        /// Field being set.
        field: String,
        /// Stage where the integrator was checked.
        stage: usize,
        /// Integrator the field requires.
        required: IntegratorVariant,
        /// Integrator configured at the stage.
        actual: IntegratorVariant,
    },

    /// The field needs a specific NLP solver variant.
    #[error("field '{field}' is only supported for NLP solver {required}")]
    FieldOnlySupportedForSolver {
        /// Field being set.
        field: String,
        /// Solver variant the field requires.
        required: NlpSolverVariant,
    },

    /// External-function kind tag not recognized.
    #[error("function group '{group}': unsupported function kind '{kind}' (expected casadi or generic)")]
    UnsupportedFunctionKind {
        /// Function group being routed.
        group: String,
        /// The unrecognized tag.
        kind: String,
    },

    /// A function instance does not match the kind declared for its phase.
    #[error("function group '{group}' phase {phase}: expected {expected} function, found {actual}")]
    FunctionKindMismatch {
        /// Function group being routed.
        group: String,
        /// Phase index inside the group.
        phase: usize,
        /// Kind declared by the phase layout.
        expected: FunctionKind,
        /// Kind reported by the instance.
        actual: FunctionKind,
    },

    /// The dimension or option store has no quantity with this name.
    #[error("unknown attribute '{attribute}'")]
    UnknownAttribute {
        /// The unrecognized attribute name.
        attribute: String,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },
}

impl OcpError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an unknown attribute error.
    #[must_use]
    pub fn unknown_attribute(attribute: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            attribute: attribute.into(),
        }
    }

    /// Create a vector dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Check if this is a vector or matrix dimension error.
    #[must_use]
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::MatrixDimensionMismatch { .. }
        )
    }

    /// Check if this error came from a model-variant gate.
    #[must_use]
    pub fn is_gate_error(&self) -> bool {
        matches!(
            self,
            Self::IncompatibleFieldForVariant { .. }
                | Self::FieldOnlySupportedForIntegrator { .. }
                | Self::FieldOnlySupportedForSolver { .. }
        )
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}
