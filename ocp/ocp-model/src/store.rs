//! Name-indexed per-stage storage.

use ocp_types::{OcpError, Result};

/// A sub-model holding one record per stage, written and read by attribute
/// name.
///
/// Buffers are contiguous and column-major for matrix attributes.
pub trait StageStore {
    /// Attribute names this store accepts.
    fn attributes(&self) -> &'static [&'static str];

    /// Number of stages held.
    fn num_stages(&self) -> usize;

    /// Overwrite `attribute` at `stage` with `values`.
    ///
    /// The element count must match the stored size exactly.
    fn set(&mut self, stage: usize, attribute: &str, values: &[f64]) -> Result<()>;

    /// Read `attribute` at `stage`.
    fn get(&self, stage: usize, attribute: &str) -> Result<&[f64]>;
}

pub(crate) fn copy_into(target: &mut [f64], attribute: &str, values: &[f64]) -> Result<()> {
    if target.len() != values.len() {
        return Err(OcpError::dimension_mismatch(
            attribute,
            target.len(),
            values.len(),
        ));
    }
    target.copy_from_slice(values);
    Ok(())
}

pub(crate) fn stage_out_of_range(attribute: &str, stage: usize, num_stages: usize) -> OcpError {
    OcpError::StageOutOfRange {
        field: attribute.to_string(),
        stage,
        last: num_stages.saturating_sub(1),
    }
}
