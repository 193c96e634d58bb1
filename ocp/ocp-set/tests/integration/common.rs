//! Shared fixtures.

use ocp_model::OcpNlp;
use ocp_types::{CostVariant, IntegratorVariant, OcpConfig, OcpDims, StagePlan};

/// Horizon length used by most fixtures.
pub const N: usize = 4;

/// Dimensions exercising every quantity.
///
/// `nx = 3`, `nu = 2`, all states and controls bounded, two general and one
/// nonlinear constraint, two slacks, `ny = 4` (`ny_e = 3`), one algebraic
/// state and two GNSF outputs.
pub fn dims() -> OcpDims {
    OcpDims::new(N, 3, 2)
        .with_state_bounds(3)
        .with_input_bounds(2)
        .with_general_constraints(2)
        .with_nonlinear_constraints(1)
        .with_slacks(2)
        .with_outputs(4, 3)
        .with_algebraic_states(1)
        .with_gnsf_outputs(2)
}

/// Linear least-squares cost and explicit integration everywhere.
pub fn nlp() -> OcpNlp {
    OcpNlp::new(OcpConfig::linear_ls(dims())).unwrap()
}

/// Instance with the given per-stage plan.
pub fn nlp_with(plan: StagePlan) -> OcpNlp {
    OcpNlp::new(OcpConfig::new(dims(), plan)).unwrap()
}

/// Same cost everywhere and the given integrator.
pub fn nlp_integrated_with(integrator: IntegratorVariant) -> OcpNlp {
    nlp_with(StagePlan::uniform(N, CostVariant::LinearLs, integrator))
}

/// `len` consecutive values starting at `start`.
pub fn ramp(start: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| start + i as f64).collect()
}
