//! Horizon dimensions.
//!
//! [`OcpDims`] holds the horizon length `N` and, for every stage `0..=N`, the
//! element counts that size each quantity the solver stores. Per-stage
//! vectors always have `N + 1` entries; the terminal stage carries no
//! controls, algebraic states or GNSF outputs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{OcpError, Result};

/// Problem dimensions of a discretized OCP.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OcpDims {
    /// Number of shooting intervals `N`.
    pub n: usize,
    /// States per stage.
    pub nx: Vec<usize>,
    /// Controls per stage (zero at the terminal stage).
    pub nu: Vec<usize>,
    /// Algebraic states per stage (zero at the terminal stage).
    pub nz: Vec<usize>,
    /// Bounded states per stage.
    pub nbx: Vec<usize>,
    /// Bounded controls per stage.
    pub nbu: Vec<usize>,
    /// General linear constraints per stage.
    pub ng: Vec<usize>,
    /// Nonlinear constraints per stage.
    pub nh: Vec<usize>,
    /// Soft constraints (slacks) per stage.
    pub ns: Vec<usize>,
    /// Least-squares residuals per stage.
    pub ny: Vec<usize>,
    /// GNSF nonlinearity outputs per stage (zero at the terminal stage).
    pub nphi: Vec<usize>,
}

impl OcpDims {
    /// Create dimensions for `n` intervals with `nx` states and `nu` controls.
    ///
    /// Every other count starts at zero.
    #[must_use]
    pub fn new(n: usize, nx: usize, nu: usize) -> Self {
        Self {
            n,
            nx: vec![nx; n + 1],
            nu: path_only(n, nu),
            nz: vec![0; n + 1],
            nbx: vec![0; n + 1],
            nbu: vec![0; n + 1],
            ng: vec![0; n + 1],
            nh: vec![0; n + 1],
            ns: vec![0; n + 1],
            ny: vec![0; n + 1],
            nphi: vec![0; n + 1],
        }
    }

    /// Bound `nbx` states on every stage.
    #[must_use]
    pub fn with_state_bounds(mut self, nbx: usize) -> Self {
        self.nbx = vec![nbx; self.n + 1];
        self
    }

    /// Bound `nbu` controls on every interval.
    #[must_use]
    pub fn with_input_bounds(mut self, nbu: usize) -> Self {
        self.nbu = path_only(self.n, nbu);
        self
    }

    /// `ng` general linear constraints on every stage.
    #[must_use]
    pub fn with_general_constraints(mut self, ng: usize) -> Self {
        self.ng = vec![ng; self.n + 1];
        self
    }

    /// `nh` nonlinear constraints on every stage.
    #[must_use]
    pub fn with_nonlinear_constraints(mut self, nh: usize) -> Self {
        self.nh = vec![nh; self.n + 1];
        self
    }

    /// `ns` soft constraints on every stage.
    #[must_use]
    pub fn with_slacks(mut self, ns: usize) -> Self {
        self.ns = vec![ns; self.n + 1];
        self
    }

    /// `ny` residuals on the path stages and `ny_e` on the terminal stage.
    #[must_use]
    pub fn with_outputs(mut self, ny: usize, ny_e: usize) -> Self {
        self.ny = vec![ny; self.n + 1];
        self.ny[self.n] = ny_e;
        self
    }

    /// `nz` algebraic states on every interval.
    #[must_use]
    pub fn with_algebraic_states(mut self, nz: usize) -> Self {
        self.nz = path_only(self.n, nz);
        self
    }

    /// `nphi` GNSF nonlinearity outputs on every interval.
    #[must_use]
    pub fn with_gnsf_outputs(mut self, nphi: usize) -> Self {
        self.nphi = path_only(self.n, nphi);
        self
    }

    /// Override the general constraint count of a single stage.
    #[must_use]
    pub fn with_stage_general_constraints(mut self, stage: usize, ng: usize) -> Self {
        if let Some(slot) = self.ng.get_mut(stage) {
            *slot = ng;
        }
        self
    }

    /// Override the bounded state count of a single stage.
    #[must_use]
    pub fn with_stage_state_bounds(mut self, stage: usize, nbx: usize) -> Self {
        if let Some(slot) = self.nbx.get_mut(stage) {
            *slot = nbx;
        }
        self
    }

    /// Override the soft constraint count of a single stage.
    #[must_use]
    pub fn with_stage_slacks(mut self, stage: usize, ns: usize) -> Self {
        if let Some(slot) = self.ns.get_mut(stage) {
            *slot = ns;
        }
        self
    }

    /// States at `stage`.
    #[must_use]
    pub fn nx(&self, stage: usize) -> usize {
        at(&self.nx, stage)
    }

    /// Controls at `stage`.
    #[must_use]
    pub fn nu(&self, stage: usize) -> usize {
        at(&self.nu, stage)
    }

    /// Algebraic states at `stage`.
    #[must_use]
    pub fn nz(&self, stage: usize) -> usize {
        at(&self.nz, stage)
    }

    /// Bounded states at `stage`.
    #[must_use]
    pub fn nbx(&self, stage: usize) -> usize {
        at(&self.nbx, stage)
    }

    /// Bounded controls at `stage`.
    #[must_use]
    pub fn nbu(&self, stage: usize) -> usize {
        at(&self.nbu, stage)
    }

    /// General linear constraints at `stage`.
    #[must_use]
    pub fn ng(&self, stage: usize) -> usize {
        at(&self.ng, stage)
    }

    /// Nonlinear constraints at `stage`.
    #[must_use]
    pub fn nh(&self, stage: usize) -> usize {
        at(&self.nh, stage)
    }

    /// Slacks at `stage`.
    #[must_use]
    pub fn ns(&self, stage: usize) -> usize {
        at(&self.ns, stage)
    }

    /// Residuals at `stage`.
    #[must_use]
    pub fn ny(&self, stage: usize) -> usize {
        at(&self.ny, stage)
    }

    /// GNSF outputs at `stage`.
    #[must_use]
    pub fn nphi(&self, stage: usize) -> usize {
        at(&self.nphi, stage)
    }

    /// Inequality count at `stage`: bounds, general, nonlinear and slack rows.
    #[must_use]
    pub fn ni(&self, stage: usize) -> usize {
        self.nbx(stage) + self.nbu(stage) + self.ng(stage) + self.nh(stage) + self.ns(stage)
    }

    /// Validate the dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(OcpError::invalid_config("horizon must have at least one interval"));
        }

        let stages = self.n + 1;
        let per_stage = [
            ("nx", &self.nx),
            ("nu", &self.nu),
            ("nz", &self.nz),
            ("nbx", &self.nbx),
            ("nbu", &self.nbu),
            ("ng", &self.ng),
            ("nh", &self.nh),
            ("ns", &self.ns),
            ("ny", &self.ny),
            ("nphi", &self.nphi),
        ];
        for (name, counts) in per_stage {
            if counts.len() != stages {
                return Err(OcpError::invalid_config(format!(
                    "{name} has {} entries, expected {stages}",
                    counts.len()
                )));
            }
        }

        for stage in 0..stages {
            if self.nbx[stage] > self.nx[stage] {
                return Err(OcpError::invalid_config(format!(
                    "stage {stage}: nbx = {} exceeds nx = {}",
                    self.nbx[stage], self.nx[stage]
                )));
            }
            if self.nbu[stage] > self.nu[stage] {
                return Err(OcpError::invalid_config(format!(
                    "stage {stage}: nbu = {} exceeds nu = {}",
                    self.nbu[stage], self.nu[stage]
                )));
            }
        }

        let terminal_path_only = [
            ("nu", self.nu[self.n]),
            ("nz", self.nz[self.n]),
            ("nphi", self.nphi[self.n]),
        ];
        for (name, count) in terminal_path_only {
            if count != 0 {
                return Err(OcpError::invalid_config(format!(
                    "{name} must be zero at the terminal stage (got {count})"
                )));
            }
        }

        Ok(())
    }
}

fn path_only(n: usize, count: usize) -> Vec<usize> {
    let mut counts = vec![count; n + 1];
    counts[n] = 0;
    counts
}

fn at(counts: &[usize], stage: usize) -> usize {
    counts.get(stage).copied().unwrap_or(0)
}
