//! Integration tests for field injection.
//!
//! Each module drives [`ocp_set::set_field`] against a full solver instance
//! and reads the result back through the owning sub-model:
//! - Read-back of every field category
//! - Stage addressing and range errors
//! - Vector and matrix dimension checks
//! - Cost, integrator and solver variant gates
//! - Parameter routing over function phases
//! - Solver options
//! - Rejected calls leaving the instance unchanged
//! - One accepted write per entry of the field table

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

mod common;

mod dimensions;
mod parameters;
mod round_trip;
