//! The solver instance that fields are injected into.

use ocp_types::{OcpConfig, OcpDims, PhaseLayout, Result, SolverOptions, StagePlan};
use tracing::debug;

use crate::constraints::ConstraintsModel;
use crate::cost::CostModel;
use crate::external::{ExternalFunctionTable, FunctionGroup};
use crate::guesses::IntegratorGuesses;
use crate::iterate::Trajectory;

/// An OCP solver instance: configuration plus every sub-model the caller
/// writes into.
///
/// Sub-model storage is sized once from [`OcpDims`] and never reallocated.
#[derive(Debug)]
pub struct OcpNlp {
    dims: OcpDims,
    plan: StagePlan,
    phases: PhaseLayout,
    options: SolverOptions,
    constraints: ConstraintsModel,
    cost: CostModel,
    trajectory: Trajectory,
    guesses: IntegratorGuesses,
    functions: ExternalFunctionTable,
}

impl OcpNlp {
    /// Build an instance from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ocp_types::OcpError::InvalidConfig`] if the configuration is
    /// inconsistent.
    pub fn new(config: OcpConfig) -> Result<Self> {
        config.validate()?;
        let OcpConfig {
            dims,
            plan,
            options,
            phases,
        } = config;

        debug!(
            n = dims.n,
            phases = phases.len(),
            solver = plan.nlp_solver.as_str(),
            "Creating OCP solver instance"
        );

        Ok(Self {
            constraints: ConstraintsModel::new(&dims),
            cost: CostModel::new(&dims),
            trajectory: Trajectory::new(&dims),
            guesses: IntegratorGuesses::new(&dims),
            functions: ExternalFunctionTable::new(),
            dims,
            plan,
            phases,
            options,
        })
    }

    /// Attach a parametric function group.
    ///
    /// # Errors
    ///
    /// Returns [`ocp_types::OcpError::InvalidConfig`] if the group does not
    /// fit the phase layout.
    pub fn with_function_group(mut self, group: FunctionGroup) -> Result<Self> {
        self.insert_function_group(group)?;
        Ok(self)
    }

    /// Attach a parametric function group, replacing one with the same name.
    pub fn insert_function_group(&mut self, group: FunctionGroup) -> Result<()> {
        group.validate(&self.phases)?;
        debug!(group = group.name(), phases = group.num_phases(), "Adding function group");
        self.functions.insert(group);
        Ok(())
    }

    /// Problem dimensions.
    #[must_use]
    pub fn dims(&self) -> &OcpDims {
        &self.dims
    }

    /// Per-stage model variants.
    #[must_use]
    pub fn plan(&self) -> &StagePlan {
        &self.plan
    }

    /// External-function phase layout.
    #[must_use]
    pub fn phases(&self) -> &PhaseLayout {
        &self.phases
    }

    /// Solver options.
    #[must_use]
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Constraint model.
    #[must_use]
    pub fn constraints(&self) -> &ConstraintsModel {
        &self.constraints
    }

    /// Cost model.
    #[must_use]
    pub fn cost(&self) -> &CostModel {
        &self.cost
    }

    /// Primal-dual iterate.
    #[must_use]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Integrator guesses.
    #[must_use]
    pub fn guesses(&self) -> &IntegratorGuesses {
        &self.guesses
    }

    /// Parametric external functions.
    #[must_use]
    pub fn functions(&self) -> &ExternalFunctionTable {
        &self.functions
    }

    /// Mutable solver options.
    pub fn options_mut(&mut self) -> &mut SolverOptions {
        &mut self.options
    }

    /// Mutable constraint model.
    pub fn constraints_mut(&mut self) -> &mut ConstraintsModel {
        &mut self.constraints
    }

    /// Mutable cost model.
    pub fn cost_mut(&mut self) -> &mut CostModel {
        &mut self.cost
    }

    /// Mutable primal-dual iterate.
    pub fn trajectory_mut(&mut self) -> &mut Trajectory {
        &mut self.trajectory
    }

    /// Mutable integrator guesses.
    pub fn guesses_mut(&mut self) -> &mut IntegratorGuesses {
        &mut self.guesses
    }

    /// Mutable parametric external functions.
    pub fn functions_mut(&mut self) -> &mut ExternalFunctionTable {
        &mut self.functions
    }
}
