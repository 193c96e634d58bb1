//! Compatibility of fields with the configured model variants.

use ocp_types::{IntegratorVariant, NlpSolverVariant, OcpError, Result, StagePlan};

/// Model-variant requirement attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantGate {
    /// Accepted under every configuration.
    None,
    /// Stage cost must be linear or nonlinear least squares.
    LeastSquaresCost,
    /// Stage must be integrated with this integrator.
    Integrator(IntegratorVariant),
    /// Nonzero values need the real-time iteration solver.
    RtiSolver,
}

impl VariantGate {
    /// Check a stage-indexed write at `stage`.
    pub fn check_stage(self, field: &str, stage: usize, plan: &StagePlan) -> Result<()> {
        match self {
            Self::LeastSquaresCost => match plan.cost_at(stage) {
                Some(variant) if !variant.is_least_squares() => {
                    Err(OcpError::IncompatibleFieldForVariant {
                        field: field.to_string(),
                        stage,
                        variant,
                    })
                }
                Some(_) => Ok(()),
                None => Err(missing_variant(field, stage, "cost")),
            },
            Self::Integrator(required) => match plan.dynamics_at(stage) {
                Some(actual) if actual != required => {
                    Err(OcpError::FieldOnlySupportedForIntegrator {
                        field: field.to_string(),
                        stage,
                        required,
                        actual,
                    })
                }
                Some(_) => Ok(()),
                None => Err(missing_variant(field, stage, "integrator")),
            },
            Self::None | Self::RtiSolver => Ok(()),
        }
    }

    /// Check a scalar option write of `value`.
    pub fn check_option(self, field: &str, value: i64, plan: &StagePlan) -> Result<()> {
        match self {
            Self::RtiSolver if value != 0 && plan.nlp_solver != NlpSolverVariant::SqpRti => {
                Err(OcpError::FieldOnlySupportedForSolver {
                    field: field.to_string(),
                    required: NlpSolverVariant::SqpRti,
                })
            }
            _ => Ok(()),
        }
    }
}

fn missing_variant(field: &str, stage: usize, what: &str) -> OcpError {
    OcpError::invalid_config(format!("{field}: stage plan has no {what} variant at stage {stage}"))
}
