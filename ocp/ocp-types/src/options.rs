//! NLP solver options.
//!
//! The options store is shared by the whole horizon. Scalar fields write into
//! it by name through [`SolverOptions::set`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{OcpError, Result};

/// Names accepted by [`SolverOptions::set`] and [`SolverOptions::get`].
pub const OPTION_NAMES: &[&str] = &[
    "max_iter",
    "rti_phase",
    "qp_warm_start",
    "warm_start_first_qp",
    "print_level",
];

/// Tuning knobs of the NLP solver.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverOptions {
    /// Maximum number of SQP iterations.
    pub max_iter: usize,
    /// Real-time iteration phase: 0 = both, 1 = preparation, 2 = feedback.
    pub rti_phase: u8,
    /// QP warm start: 0 = cold, 1 = warm, 2 = hot.
    pub qp_warm_start: u8,
    /// Warm start the first QP of each solve.
    pub warm_start_first_qp: bool,
    /// Verbosity of solver printing.
    pub print_level: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iter: 100,
            rti_phase: 0,
            qp_warm_start: 0,
            warm_start_first_qp: false,
            print_level: 0,
        }
    }
}

impl SolverOptions {
    /// Set the iteration cap.
    #[must_use]
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the print level.
    #[must_use]
    pub fn print_level(mut self, level: usize) -> Self {
        self.print_level = level;
        self
    }

    /// Write an option by name.
    ///
    /// Out-of-range values are rejected and leave the store unchanged.
    pub fn set(&mut self, name: &str, value: i64) -> Result<()> {
        match name {
            "max_iter" => self.max_iter = non_negative(name, value)?,
            "rti_phase" => self.rti_phase = bounded(name, value, 2)?,
            "qp_warm_start" => self.qp_warm_start = bounded(name, value, 2)?,
            "warm_start_first_qp" => self.warm_start_first_qp = value != 0,
            "print_level" => self.print_level = non_negative(name, value)?,
            _ => return Err(OcpError::unknown_attribute(name)),
        }
        Ok(())
    }

    /// Read an option by name.
    pub fn get(&self, name: &str) -> Result<i64> {
        let value = match name {
            "max_iter" => i64::try_from(self.max_iter).unwrap_or(i64::MAX),
            "rti_phase" => i64::from(self.rti_phase),
            "qp_warm_start" => i64::from(self.qp_warm_start),
            "warm_start_first_qp" => i64::from(self.warm_start_first_qp),
            "print_level" => i64::try_from(self.print_level).unwrap_or(i64::MAX),
            _ => return Err(OcpError::unknown_attribute(name)),
        };
        Ok(value)
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<()> {
        if self.rti_phase > 2 {
            return Err(OcpError::invalid_config(format!(
                "rti_phase must be 0, 1 or 2 (got {})",
                self.rti_phase
            )));
        }
        if self.qp_warm_start > 2 {
            return Err(OcpError::invalid_config(format!(
                "qp_warm_start must be 0, 1 or 2 (got {})",
                self.qp_warm_start
            )));
        }
        Ok(())
    }
}

fn non_negative(name: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| OcpError::invalid_config(format!("{name} cannot be negative (got {value})")))
}

fn bounded(name: &str, value: i64, max: u8) -> Result<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or_else(|| {
            OcpError::invalid_config(format!("{name} must be in 0..={max} (got {value})"))
        })
}
