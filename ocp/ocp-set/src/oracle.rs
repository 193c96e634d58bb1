//! Per-stage sizes of every injectable quantity.

use ocp_types::{OcpDims, OcpError, Result};

/// Answers "how many elements does `attribute` hold at stage `i`".
///
/// Sizes are read from [`OcpDims`] on every query, so stage-varying
/// dimensions are honored inside whole-horizon loops.
#[derive(Debug, Clone, Copy)]
pub struct DimensionOracle<'a> {
    dims: &'a OcpDims,
}

impl<'a> DimensionOracle<'a> {
    /// Create an oracle over `dims`.
    #[must_use]
    pub fn new(dims: &'a OcpDims) -> Self {
        Self { dims }
    }

    /// Element count of `attribute` at `stage`.
    ///
    /// Matrix attributes report `rows * cols`.
    pub fn required_size(&self, attribute: &str, stage: usize) -> Result<usize> {
        self.check_stage(attribute, stage)?;
        let d = self.dims;
        let size = match attribute {
            "x" | "xdot" => d.nx(stage),
            "u" => d.nu(stage),
            "z" => d.nz(stage),
            "pi" => {
                if stage < d.n {
                    d.nx(stage + 1)
                } else {
                    0
                }
            }
            "lbx" | "ubx" => d.nbx(stage),
            "lbu" | "ubu" => d.nbu(stage),
            "lg" | "ug" => d.ng(stage),
            "lh" | "uh" => d.nh(stage),
            "y_ref" => d.ny(stage),
            "sl" | "su" | "Zl" | "Zu" | "zl" | "zu" | "cost_Z" | "cost_z" => d.ns(stage),
            "lam" | "t" => 2 * d.ni(stage),
            "gnsf_phi" | "init_gnsf_phi" => d.nphi(stage),
            _ => {
                let (rows, cols) = self.matrix_shape(attribute, stage)?;
                rows * cols
            }
        };
        Ok(size)
    }

    /// Row and column count of a matrix attribute at `stage`.
    pub fn matrix_shape(&self, attribute: &str, stage: usize) -> Result<(usize, usize)> {
        self.check_stage(attribute, stage)?;
        let d = self.dims;
        let shape = match attribute {
            "C" => (d.ng(stage), d.nx(stage)),
            "D" => (d.ng(stage), d.nu(stage)),
            "Vx" => (d.ny(stage), d.nx(stage)),
            "Vu" => (d.ny(stage), d.nu(stage)),
            "W" => (d.ny(stage), d.ny(stage)),
            _ => return Err(OcpError::unknown_attribute(attribute)),
        };
        Ok(shape)
    }

    fn check_stage(&self, attribute: &str, stage: usize) -> Result<()> {
        if stage > self.dims.n {
            return Err(OcpError::StageOutOfRange {
                field: attribute.to_string(),
                stage,
                last: self.dims.n,
            });
        }
        Ok(())
    }
}
