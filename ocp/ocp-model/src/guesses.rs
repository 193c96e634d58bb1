//! Warm-start guesses for the implicit integrators.
//!
//! One record per shooting interval (`0..N`). The IRK integrator reads the
//! algebraic-state and state-derivative guesses, the GNSF integrator reads
//! the nonlinearity-output guess.

use nalgebra::DVector;
use ocp_types::{OcpDims, OcpError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::store::{StageStore, copy_into, stage_out_of_range};

const ATTRIBUTES: &[&str] = &["z", "xdot", "gnsf_phi"];

/// Integrator guesses of one shooting interval.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StageGuess {
    /// Algebraic states (`nz`).
    pub z: DVector<f64>,
    /// State derivatives (`nx`).
    pub xdot: DVector<f64>,
    /// GNSF nonlinearity outputs (`nphi`).
    pub gnsf_phi: DVector<f64>,
}

/// Integrator guesses over all shooting intervals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntegratorGuesses {
    stages: Vec<StageGuess>,
}

impl IntegratorGuesses {
    /// Zero guesses sized from `dims`.
    #[must_use]
    pub fn new(dims: &OcpDims) -> Self {
        let stages = (0..dims.n)
            .map(|i| StageGuess {
                z: DVector::zeros(dims.nz(i)),
                xdot: DVector::zeros(dims.nx(i)),
                gnsf_phi: DVector::zeros(dims.nphi(i)),
            })
            .collect();
        Self { stages }
    }

    /// Guesses of the interval starting at `stage`.
    #[must_use]
    pub fn stage(&self, stage: usize) -> Option<&StageGuess> {
        self.stages.get(stage)
    }
}

impl StageStore for IntegratorGuesses {
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
        let slot = match attribute {
            "z" => &mut data.z,
            "xdot" => &mut data.xdot,
            "gnsf_phi" => &mut data.gnsf_phi,
            _ => return Err(OcpError::unknown_attribute(attribute)),
        };
        copy_into(slot.as_mut_slice(), attribute, values)
    }

    fn get(&self, stage: usize, attribute: &str) -> Result<&[f64]> {
        let data = self
            .stages
            .get(stage)
            .ok_or_else(|| stage_out_of_range(attribute, stage, self.stages.len()))?;
        match attribute {
            "z" => Ok(data.z.as_slice()),
            "xdot" => Ok(data.xdot.as_slice()),
            "gnsf_phi" => Ok(data.gnsf_phi.as_slice()),
            _ => Err(OcpError::unknown_attribute(attribute)),
        }
    }
}
