//! Cost model: least-squares terms and slack penalties.
//!
//! A least-squares stage minimizes `|| Vx x + Vu u - y_ref ||_W^2`; the slack
//! penalties `Zl`, `Zu` (quadratic, diagonal) and `zl`, `zu` (linear) apply
//! to every cost variant.

use nalgebra::{DMatrix, DVector};
use ocp_types::{OcpDims, OcpError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::store::{StageStore, copy_into, stage_out_of_range};

// "Z" and "z" are write-only shorthands for both sides of the slack penalty.
const ATTRIBUTES: &[&str] = &[
    "y_ref", "Vx", "Vu", "W", "Z", "Zl", "Zu", "z", "zl", "zu",
];

/// Cost data of a single stage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StageCost {
    /// Residual reference (`ny`).
    pub y_ref: DVector<f64>,
    /// State output selection (`ny x nx`).
    pub vx: DMatrix<f64>,
    /// Control output selection (`ny x nu`).
    pub vu: DMatrix<f64>,
    /// Residual weight (`ny x ny`).
    pub w: DMatrix<f64>,
    /// Quadratic penalty on lower slacks (`ns`).
    pub zl_quad: DVector<f64>,
    /// Quadratic penalty on upper slacks (`ns`).
    pub zu_quad: DVector<f64>,
    /// Linear penalty on lower slacks (`ns`).
    pub zl_lin: DVector<f64>,
    /// Linear penalty on upper slacks (`ns`).
    pub zu_lin: DVector<f64>,
}

impl StageCost {
    /// Zero-initialized cost sized for `stage`, with an identity weight.
    #[must_use]
    pub fn zeros(dims: &OcpDims, stage: usize) -> Self {
        let ny = dims.ny(stage);
        let ns = dims.ns(stage);
        Self {
            y_ref: DVector::zeros(ny),
            vx: DMatrix::zeros(ny, dims.nx(stage)),
            vu: DMatrix::zeros(ny, dims.nu(stage)),
            w: DMatrix::identity(ny, ny),
            zl_quad: DVector::zeros(ns),
            zu_quad: DVector::zeros(ns),
            zl_lin: DVector::zeros(ns),
            zu_lin: DVector::zeros(ns),
        }
    }

    fn slot(&self, attribute: &str) -> Option<&[f64]> {
        let slot = match attribute {
            "y_ref" => self.y_ref.as_slice(),
            "Vx" => self.vx.as_slice(),
            "Vu" => self.vu.as_slice(),
            "W" => self.w.as_slice(),
            "Zl" => self.zl_quad.as_slice(),
            "Zu" => self.zu_quad.as_slice(),
            "zl" => self.zl_lin.as_slice(),
            "zu" => self.zu_lin.as_slice(),
            _ => return None,
        };
        Some(slot)
    }

    fn slot_mut(&mut self, attribute: &str) -> Option<&mut [f64]> {
        let slot = match attribute {
            "y_ref" => self.y_ref.as_mut_slice(),
            "Vx" => self.vx.as_mut_slice(),
            "Vu" => self.vu.as_mut_slice(),
            "W" => self.w.as_mut_slice(),
            "Zl" => self.zl_quad.as_mut_slice(),
            "Zu" => self.zu_quad.as_mut_slice(),
            "zl" => self.zl_lin.as_mut_slice(),
            "zu" => self.zu_lin.as_mut_slice(),
            _ => return None,
        };
        Some(slot)
    }
}

/// Cost model over the whole horizon (stages `0..=N`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostModel {
    stages: Vec<StageCost>,
}

impl CostModel {
    /// Create a model sized from `dims`.
    #[must_use]
    pub fn new(dims: &OcpDims) -> Self {
        Self {
            stages: (0..=dims.n).map(|i| StageCost::zeros(dims, i)).collect(),
        }
    }

    /// Cost data of `stage`.
    #[must_use]
    pub fn stage(&self, stage: usize) -> Option<&StageCost> {
        self.stages.get(stage)
    }
}

impl StageStore for CostModel {
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

        let sides = match attribute {
            "Z" => Some(("Zl", "Zu")),
            "z" => Some(("zl", "zu")),
            _ => None,
        };
        if let Some((lower, upper)) = sides {
            // Check before writing so a bad buffer leaves both sides untouched.
            let expected = data.zl_quad.len();
            if values.len() != expected {
                return Err(OcpError::dimension_mismatch(attribute, expected, values.len()));
            }
            for side in [lower, upper] {
                if let Some(slot) = data.slot_mut(side) {
                    copy_into(slot, attribute, values)?;
                }
            }
            return Ok(());
        }

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
