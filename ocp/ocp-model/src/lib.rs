//! Sub-model storage of a discretized optimal-control solver.
//!
//! [`OcpNlp`] owns every quantity a caller can inject before a solve:
//!
//! - [`ConstraintsModel`] - Bounds and constraint matrices per stage
//! - [`CostModel`] - Least-squares terms and slack penalties per stage
//! - [`Trajectory`] - Primal-dual iterate used as the initial guess
//! - [`IntegratorGuesses`] - Warm starts of the implicit integrators
//! - [`ExternalFunctionTable`] - Parametric functions grouped by phase
//!
//! The per-stage models implement [`StageStore`], a name-indexed interface
//! over flat column-major buffers. Sizes come from [`ocp_types::OcpDims`]
//! and are fixed at construction; a write whose element count differs from
//! the stored size is rejected without touching the stored data.
//!
//! # Example
//!
//! ```
//! use ocp_model::{OcpNlp, StageStore};
//! use ocp_types::{OcpConfig, OcpDims};
//!
//! let dims = OcpDims::new(10, 2, 1).with_state_bounds(2);
//! let mut nlp = OcpNlp::new(OcpConfig::linear_ls(dims)).unwrap();
//!
//! nlp.constraints_mut().set(0, "lbx", &[-1.0, -1.0]).unwrap();
//! assert_eq!(nlp.constraints().get(0, "lbx").unwrap(), &[-1.0, -1.0]);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
)]

mod constraints;
mod cost;
mod external;
mod guesses;
mod iterate;
mod nlp;
mod store;

pub use constraints::{ConstraintsModel, StageConstraints};
pub use cost::{CostModel, StageCost};
pub use external::{
    BoxedFunction, CallbackFunction, CompiledFunction, ExternalFunctionTable, FunctionGroup,
    ParametricFunction, ParamsHook,
};
pub use guesses::{IntegratorGuesses, StageGuess};
pub use iterate::{StageIterate, Trajectory};
pub use nlp::OcpNlp;
pub use store::StageStore;
