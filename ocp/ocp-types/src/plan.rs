//! Per-stage model variants.
//!
//! The [`StagePlan`] records which cost formulation and which dynamics
//! integrator each stage uses, plus the NLP solver algorithm. It is fixed at
//! problem construction and only read by the field-injection core.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{OcpError, Result};

// ============================================================================
// Variants
// ============================================================================

/// Cost formulation of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CostVariant {
    /// Linear least squares: `y = Vx x + Vu u`.
    #[default]
    LinearLs,
    /// Nonlinear least squares on a user residual `y(x, u)`.
    NonlinearLs,
    /// User-supplied external cost function.
    External,
}

impl CostVariant {
    /// Parse a cost variant from its solver name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LINEAR_LS" => Some(Self::LinearLs),
            "NONLINEAR_LS" => Some(Self::NonlinearLs),
            "EXTERNAL" => Some(Self::External),
            _ => None,
        }
    }

    /// Get the solver name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinearLs => "LINEAR_LS",
            Self::NonlinearLs => "NONLINEAR_LS",
            Self::External => "EXTERNAL",
        }
    }

    /// Whether this is one of the least-squares formulations.
    #[must_use]
    pub const fn is_least_squares(self) -> bool {
        matches!(self, Self::LinearLs | Self::NonlinearLs)
    }
}

impl std::fmt::Display for CostVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dynamics discretization scheme of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IntegratorVariant {
    /// Explicit Runge-Kutta.
    #[default]
    Erk,
    /// Implicit Runge-Kutta (supports algebraic states).
    Irk,
    /// Implicit integrator on the generalized nonlinear static feedback form.
    Gnsf,
    /// Discrete-time dynamics supplied directly.
    Discrete,
}

impl IntegratorVariant {
    /// Parse an integrator from its solver name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ERK" => Some(Self::Erk),
            "IRK" => Some(Self::Irk),
            "GNSF" | "IRK_GNSF" => Some(Self::Gnsf),
            "DISCRETE" => Some(Self::Discrete),
            _ => None,
        }
    }

    /// Get the solver name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Erk => "ERK",
            Self::Irk => "IRK",
            Self::Gnsf => "GNSF",
            Self::Discrete => "DISCRETE",
        }
    }
}

impl std::fmt::Display for IntegratorVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NLP solver algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NlpSolverVariant {
    /// Full sequential quadratic programming.
    #[default]
    Sqp,
    /// Real-time iteration: one SQP step split in preparation/feedback phases.
    SqpRti,
}

impl NlpSolverVariant {
    /// Parse a solver variant from its solver name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "SQP" => Some(Self::Sqp),
            "SQP_RTI" => Some(Self::SqpRti),
            _ => None,
        }
    }

    /// Get the solver name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqp => "SQP",
            Self::SqpRti => "SQP_RTI",
        }
    }
}

impl std::fmt::Display for NlpSolverVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a parametric external function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FunctionKind {
    /// Generated, compiled code (tag `casadi`).
    AnalyticCompiled,
    /// Hand-written callback (tag `generic`).
    GenericCallback,
}

impl FunctionKind {
    /// Parse a kind from its phase tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "casadi" => Some(Self::AnalyticCompiled),
            "generic" => Some(Self::GenericCallback),
            _ => None,
        }
    }

    /// Get the phase tag.
    #[must_use]
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::AnalyticCompiled => "casadi",
            Self::GenericCallback => "generic",
        }
    }
}

impl std::fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

// ============================================================================
// Stage plan
// ============================================================================

/// Discrete configuration of every stage of the horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StagePlan {
    /// Cost variant for stages `0..=N`.
    pub cost: Vec<CostVariant>,
    /// Integrator for the shooting intervals `0..N`.
    pub dynamics: Vec<IntegratorVariant>,
    /// NLP solver algorithm.
    pub nlp_solver: NlpSolverVariant,
}

impl StagePlan {
    /// Same cost and integrator on every stage of an `n`-interval horizon.
    #[must_use]
    pub fn uniform(n: usize, cost: CostVariant, dynamics: IntegratorVariant) -> Self {
        Self {
            cost: vec![cost; n + 1],
            dynamics: vec![dynamics; n],
            nlp_solver: NlpSolverVariant::default(),
        }
    }

    /// Set the NLP solver variant.
    #[must_use]
    pub fn nlp_solver(mut self, solver: NlpSolverVariant) -> Self {
        self.nlp_solver = solver;
        self
    }

    /// Override the cost variant of one stage. Out-of-range stages are ignored.
    #[must_use]
    pub fn with_stage_cost(mut self, stage: usize, cost: CostVariant) -> Self {
        if let Some(slot) = self.cost.get_mut(stage) {
            *slot = cost;
        }
        self
    }

    /// Override the cost variant of the terminal stage.
    #[must_use]
    pub fn with_terminal_cost(mut self, cost: CostVariant) -> Self {
        if let Some(slot) = self.cost.last_mut() {
            *slot = cost;
        }
        self
    }

    /// Cost variant at `stage`.
    #[must_use]
    pub fn cost_at(&self, stage: usize) -> Option<CostVariant> {
        self.cost.get(stage).copied()
    }

    /// Integrator of the interval starting at `stage`. `None` at the terminal stage.
    #[must_use]
    pub fn dynamics_at(&self, stage: usize) -> Option<IntegratorVariant> {
        self.dynamics.get(stage).copied()
    }

    /// Validate the plan against a horizon of `n` intervals.
    pub fn validate(&self, n: usize) -> Result<()> {
        if self.cost.len() != n + 1 {
            return Err(OcpError::invalid_config(format!(
                "stage plan has {} cost entries, expected {}",
                self.cost.len(),
                n + 1
            )));
        }
        if self.dynamics.len() != n {
            return Err(OcpError::invalid_config(format!(
                "stage plan has {} dynamics entries, expected {n}",
                self.dynamics.len()
            )));
        }
        Ok(())
    }
}
