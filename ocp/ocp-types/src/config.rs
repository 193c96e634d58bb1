//! Configuration of an OCP solver instance.
//!
//! [`OcpConfig`] bundles everything fixed at problem construction: the
//! dimensions, the per-stage plan, the initial solver options and the phase
//! layout of the parametric external functions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    CostVariant, IntegratorVariant, NlpSolverVariant, OcpDims, OcpError, Result, SolverOptions,
    StagePlan,
};

/// One phase of the external-function layout.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionPhase {
    /// Number of consecutive stages sharing this phase's function array.
    pub length: usize,
    /// Function kind tag (`casadi` or `generic`).
    pub kind: String,
}

impl FunctionPhase {
    /// Create a phase.
    #[must_use]
    pub fn new(length: usize, kind: impl Into<String>) -> Self {
        Self {
            length,
            kind: kind.into(),
        }
    }
}

/// Ordered phases of the external-function arrays.
///
/// Phase lengths must add up to `N + 1`, one slot per stage.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseLayout {
    phases: Vec<FunctionPhase>,
}

impl PhaseLayout {
    /// Create a layout from explicit phases.
    #[must_use]
    pub fn new(phases: Vec<FunctionPhase>) -> Self {
        Self { phases }
    }

    /// The usual layout: one phase repeated over the `n` path stages and a
    /// single terminal instance.
    #[must_use]
    pub fn interior_terminal(n: usize, interior: &str, terminal: &str) -> Self {
        Self::new(vec![
            FunctionPhase::new(n, interior),
            FunctionPhase::new(1, terminal),
        ])
    }

    /// The phases in routing order.
    #[must_use]
    pub fn phases(&self) -> &[FunctionPhase] {
        &self.phases
    }

    /// Number of phases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Whether the layout has no phases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Sum of phase lengths.
    #[must_use]
    pub fn total_length(&self) -> usize {
        self.phases.iter().map(|p| p.length).sum()
    }

    /// Validate against a horizon of `n` intervals.
    pub fn validate(&self, n: usize) -> Result<()> {
        if self.phases.iter().any(|p| p.length == 0) {
            return Err(OcpError::invalid_config("function phases must be non-empty"));
        }
        if self.total_length() != n + 1 {
            return Err(OcpError::invalid_config(format!(
                "function phase lengths sum to {}, expected {}",
                self.total_length(),
                n + 1
            )));
        }
        Ok(())
    }
}

/// Complete configuration of an OCP solver instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OcpConfig {
    /// Problem dimensions.
    pub dims: OcpDims,
    /// Per-stage model variants.
    pub plan: StagePlan,
    /// Initial solver options.
    pub options: SolverOptions,
    /// External-function phase layout.
    pub phases: PhaseLayout,
}

impl OcpConfig {
    /// Create a configuration with default options and an all-`casadi`
    /// interior/terminal phase layout.
    #[must_use]
    pub fn new(dims: OcpDims, plan: StagePlan) -> Self {
        let phases = PhaseLayout::interior_terminal(dims.n, "casadi", "casadi");
        Self {
            dims,
            plan,
            options: SolverOptions::default(),
            phases,
        }
    }

    /// Linear least-squares cost and explicit integration on every stage.
    #[must_use]
    pub fn linear_ls(dims: OcpDims) -> Self {
        let plan = StagePlan::uniform(dims.n, CostVariant::LinearLs, IntegratorVariant::Erk);
        Self::new(dims, plan)
    }

    /// Set the solver options.
    #[must_use]
    pub fn options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the NLP solver variant.
    #[must_use]
    pub fn nlp_solver(mut self, solver: NlpSolverVariant) -> Self {
        self.plan.nlp_solver = solver;
        self
    }

    /// Set the function kind tags of the interior and terminal phases.
    #[must_use]
    pub fn function_kinds(mut self, interior: &str, terminal: &str) -> Self {
        self.phases = PhaseLayout::interior_terminal(self.dims.n, interior, terminal);
        self
    }

    /// Set an explicit phase layout.
    #[must_use]
    pub fn phases(mut self, phases: PhaseLayout) -> Self {
        self.phases = phases;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.dims.validate()?;
        self.plan.validate(self.dims.n)?;
        self.options.validate()?;
        self.phases.validate(self.dims.n)?;
        Ok(())
    }
}
