//! Constraint model: bounds, general linear and nonlinear constraints.
//!
//! Per stage the solver enforces
//!
//! ```text
//! lbx <= Jbx x <= ubx
//! lbu <= Jbu u <= ubu
//! lg  <= C x + D u <= ug
//! lh  <= h(x, u) <= uh
//! ```

use nalgebra::{DMatrix, DVector};
use ocp_types::{OcpDims, OcpError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::store::{StageStore, copy_into, stage_out_of_range};

const ATTRIBUTES: &[&str] = &["lbx", "ubx", "lbu", "ubu", "lg", "ug", "lh", "uh", "C", "D"];

/// Constraint data of a single stage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StageConstraints {
    /// Lower state bounds (`nbx`).
    pub lbx: DVector<f64>,
    /// Upper state bounds (`nbx`).
    pub ubx: DVector<f64>,
    /// Lower control bounds (`nbu`).
    pub lbu: DVector<f64>,
    /// Upper control bounds (`nbu`).
    pub ubu: DVector<f64>,
    /// Lower general constraint bounds (`ng`).
    pub lg: DVector<f64>,
    /// Upper general constraint bounds (`ng`).
    pub ug: DVector<f64>,
    /// Lower nonlinear constraint bounds (`nh`).
    pub lh: DVector<f64>,
    /// Upper nonlinear constraint bounds (`nh`).
    pub uh: DVector<f64>,
    /// State coefficients of the general constraints (`ng x nx`).
    pub c: DMatrix<f64>,
    /// Control coefficients of the general constraints (`ng x nu`).
    pub d: DMatrix<f64>,
}

impl StageConstraints {
    /// Zero-initialized constraints sized for `stage`.
    #[must_use]
    pub fn zeros(dims: &OcpDims, stage: usize) -> Self {
        let ng = dims.ng(stage);
        Self {
            lbx: DVector::zeros(dims.nbx(stage)),
            ubx: DVector::zeros(dims.nbx(stage)),
            lbu: DVector::zeros(dims.nbu(stage)),
            ubu: DVector::zeros(dims.nbu(stage)),
            lg: DVector::zeros(ng),
            ug: DVector::zeros(ng),
            lh: DVector::zeros(dims.nh(stage)),
            uh: DVector::zeros(dims.nh(stage)),
            c: DMatrix::zeros(ng, dims.nx(stage)),
            d: DMatrix::zeros(ng, dims.nu(stage)),
        }
    }

    fn slot(&self, attribute: &str) -> Option<&[f64]> {
        let slot = match attribute {
            "lbx" => self.lbx.as_slice(),
            "ubx" => self.ubx.as_slice(),
            "lbu" => self.lbu.as_slice(),
            "ubu" => self.ubu.as_slice(),
            "lg" => self.lg.as_slice(),
            "ug" => self.ug.as_slice(),
            "lh" => self.lh.as_slice(),
            "uh" => self.uh.as_slice(),
            "C" => self.c.as_slice(),
            "D" => self.d.as_slice(),
            _ => return None,
        };
        Some(slot)
    }

    fn slot_mut(&mut self, attribute: &str) -> Option<&mut [f64]> {
        let slot = match attribute {
            "lbx" => self.lbx.as_mut_slice(),
            "ubx" => self.ubx.as_mut_slice(),
            "lbu" => self.lbu.as_mut_slice(),
            "ubu" => self.ubu.as_mut_slice(),
            "lg" => self.lg.as_mut_slice(),
            "ug" => self.ug.as_mut_slice(),
            "lh" => self.lh.as_mut_slice(),
            "uh" => self.uh.as_mut_slice(),
            "C" => self.c.as_mut_slice(),
            "D" => self.d.as_mut_slice(),
            _ => return None,
        };
        Some(slot)
    }
}

/// Constraint model over the whole horizon (stages `0..=N`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintsModel {
    stages: Vec<StageConstraints>,
}

impl ConstraintsModel {
    /// Create a zero-initialized model sized from `dims`.
    #[must_use]
    pub fn new(dims: &OcpDims) -> Self {
        Self {
            stages: (0..=dims.n).map(|i| StageConstraints::zeros(dims, i)).collect(),
        }
    }

    /// Constraint data of `stage`.
    #[must_use]
    pub fn stage(&self, stage: usize) -> Option<&StageConstraints> {
        self.stages.get(stage)
    }
}

impl StageStore for ConstraintsModel {
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
        copy_into(slot, attribute, values)
    }

    fn get(&self, stage: usize, attribute: &str) -> Result<&[f64]> {
        let data = self
            .stages
            .get(stage)
            .ok_or_else(|| stage_out_of_range(attribute, stage, self.stages.len()))?;
        data.slot(attribute)
            .ok_or_else(|| OcpError::unknown_attribute(attribute))
    }
}
