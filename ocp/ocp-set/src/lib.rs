//! Field injection for discretized optimal-control solvers.
//!
//! This crate maps symbolic field names onto the sub-models of an
//! [`OcpNlp`](ocp_model::OcpNlp):
//!
//! - [`field`] - The closed table of injectable fields
//! - [`range`] - Resolution of whole-horizon and single-stage addressing
//! - [`oracle`] - Required buffer sizes per stage
//! - [`gate`] - Compatibility of fields with cost, integrator and solver variants
//! - [`router`] - Distribution of the parameter vector over external functions
//! - [`set_field`] - The entry point tying them together
//!
//! # Addressing
//!
//! A stage argument of `None` addresses the whole horizon. Depending on the
//! field the buffer is then written to every stage (bounds, cost terms),
//! packed stage after stage (initial guesses) or rejected (multipliers and
//! slacks, which are set one stage at a time). Terminal-only fields such as
//! `cost_y_ref_e` and the scalar solver options take no stage argument.
//!
//! # Example
//!
//! ```
//! use ocp_model::OcpNlp;
//! use ocp_set::{FieldBuffer, set_field};
//! use ocp_types::{OcpConfig, OcpDims};
//!
//! let dims = OcpDims::new(3, 2, 1).with_outputs(3, 2);
//! let mut nlp = OcpNlp::new(OcpConfig::linear_ls(dims)).unwrap();
//!
//! // Initial state trajectory, all four nodes packed together.
//! let x: Vec<f64> = (0..8).map(f64::from).collect();
//! set_field(&mut nlp, "init_x", None, FieldBuffer::vector(&x)).unwrap();
//! assert_eq!(nlp.trajectory().stage(3).unwrap().x.as_slice(), &[6.0, 7.0]);
//!
//! let err = set_field(&mut nlp, "nlp_solver_max_iter", None, FieldBuffer::vector(&[1.0, 2.0]));
//! assert!(err.unwrap_err().is_dimension_error());
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
)]

pub mod buffer;
pub mod dispatch;
pub mod field;
pub mod gate;
pub mod oracle;
pub mod range;
pub mod router;

pub use buffer::FieldBuffer;
pub use dispatch::set_field;
pub use field::{AddressingMode, FIELDS, FieldDescriptor, ShapeRule, Target};
pub use gate::VariantGate;
pub use oracle::DimensionOracle;
pub use range::{Addressing, StageExtent, StageRange};
pub use router::Route;
