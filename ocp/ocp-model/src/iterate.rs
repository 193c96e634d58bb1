//! Primal-dual iterate used to initialize the solver.

use nalgebra::DVector;
use ocp_types::{OcpDims, OcpError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::store::{StageStore, copy_into, stage_out_of_range};

const ATTRIBUTES: &[&str] = &["x", "u", "pi", "lam", "t", "sl", "su"];

/// Iterate values of a single stage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StageIterate {
    /// States (`nx`).
    pub x: DVector<f64>,
    /// Controls (`nu`).
    pub u: DVector<f64>,
    /// Equality multipliers of the dynamics to the next stage (`nx[i + 1]`).
    pub pi: DVector<f64>,
    /// Inequality multipliers (`2 * ni`).
    pub lam: DVector<f64>,
    /// Inequality slacks (`2 * ni`).
    pub t: DVector<f64>,
    /// Lower soft-constraint slacks (`ns`).
    pub sl: DVector<f64>,
    /// Upper soft-constraint slacks (`ns`).
    pub su: DVector<f64>,
}

impl StageIterate {
    /// Zero iterate sized for `stage`.
    #[must_use]
    pub fn zeros(dims: &OcpDims, stage: usize) -> Self {
        let pi = if stage < dims.n { dims.nx(stage + 1) } else { 0 };
        let ni2 = 2 * dims.ni(stage);
        Self {
            x: DVector::zeros(dims.nx(stage)),
            u: DVector::zeros(dims.nu(stage)),
            pi: DVector::zeros(pi),
            lam: DVector::zeros(ni2),
            t: DVector::zeros(ni2),
            sl: DVector::zeros(dims.ns(stage)),
            su: DVector::zeros(dims.ns(stage)),
        }
    }

    fn slot(&self, attribute: &str) -> Option<&DVector<f64>> {
        match attribute {
            "x" => Some(&self.x),
            "u" => Some(&self.u),
            "pi" => Some(&self.pi),
            "lam" => Some(&self.lam),
            "t" => Some(&self.t),
            "sl" => Some(&self.sl),
            "su" => Some(&self.su),
            _ => None,
        }
    }

    fn slot_mut(&mut self, attribute: &str) -> Option<&mut DVector<f64>> {
        match attribute {
            "x" => Some(&mut self.x),
            "u" => Some(&mut self.u),
            "pi" => Some(&mut self.pi),
            "lam" => Some(&mut self.lam),
            "t" => Some(&mut self.t),
            "sl" => Some(&mut self.sl),
            "su" => Some(&mut self.su),
            _ => None,
        }
    }
}

/// Solver iterate over the whole horizon (stages `0..=N`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trajectory {
    stages: Vec<StageIterate>,
}

impl Trajectory {
    /// Create a zero iterate sized from `dims`.
    #[must_use]
    pub fn new(dims: &OcpDims) -> Self {
        Self {
            stages: (0..=dims.n).map(|i| StageIterate::zeros(dims, i)).collect(),
        }
    }

    /// Iterate of `stage`.
    #[must_use]
    pub fn stage(&self, stage: usize) -> Option<&StageIterate> {
        self.stages.get(stage)
    }
}

impl StageStore for Trajectory {
    fn attributes(&self) -> &'static [&'static str] {
        ATTRIBUTES
    }

    fn num_stages(&self) -> usize {
        self.stages.len()
    }

    fn set(&mut self, stage: usize, attribute: &str, values: &[f64]) -> Result<()> {
        let num_stages = self.stages.len();
        let data = self
            .stages
            .get_mut(stage)
            .ok_or_else(|| stage_out_of_range(attribute, stage, num_stages))?;
        let slot = data
            .slot_mut(attribute)
            .ok_or_else(|| OcpError::unknown_attribute(attribute))?;
        copy_into(slot.as_mut_slice(), attribute, values)
    }

    fn get(&self, stage: usize, attribute: &str) -> Result<&[f64]> {
        let data = self
            .stages
            .get(stage)
            .ok_or_else(|| stage_out_of_range(attribute, stage, self.stages.len()))?;
        data.slot(attribute)
            .map(|v| v.as_slice())
            .ok_or_else(|| OcpError::unknown_attribute(attribute))
    }
}
