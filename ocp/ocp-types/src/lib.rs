//! Core types for injecting data into a discretized optimal-control solver.
//!
//! This crate provides the configuration a solver instance is built from and
//! the error type every field setter reports through:
//!
//! - [`OcpDims`] - Horizon length and per-stage dimension counts
//! - [`StagePlan`] - Cost variant, integrator and NLP solver per stage
//! - [`SolverOptions`] - Name-indexed scalar solver options
//! - [`PhaseLayout`] - How stages map onto external-function arrays
//! - [`OcpConfig`] - All of the above, validated together
//! - [`OcpError`] - Failure taxonomy of field injection
//!
//! # Design Philosophy
//!
//! These types are **pure data** plus validation. They hold no solver
//! storage and perform no numerical work.
//!
//! # Example
//!
//! ```
//! use ocp_types::{CostVariant, IntegratorVariant, OcpConfig, OcpDims, StagePlan};
//!
//! let dims = OcpDims::new(20, 4, 1)
//!     .with_state_bounds(4)
//!     .with_outputs(5, 4);
//! let plan = StagePlan::uniform(20, CostVariant::LinearLs, IntegratorVariant::Irk);
//! let config = OcpConfig::new(dims, plan);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.dims.ny(20), 4);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,     // Vec-backed accessors can't be const
    clippy::should_implement_trait,   // from_str returns Option, not Result
    clippy::missing_errors_doc,       // Error docs added where non-obvious
)]

mod config;
mod dims;
mod error;
mod options;
mod plan;

pub use config::{FunctionPhase, OcpConfig, PhaseLayout};
pub use dims::OcpDims;
pub use error::OcpError;
pub use options::{OPTION_NAMES, SolverOptions};
pub use plan::{CostVariant, FunctionKind, IntegratorVariant, NlpSolverVariant, StagePlan};

/// Result type for field injection.
pub type Result<T> = std::result::Result<T, OcpError>;
