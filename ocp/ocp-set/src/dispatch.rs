//! Field dispatch.
//!
//! A call runs in two passes. The planning pass resolves the stage range,
//! checks every stage against the variant gate and the dimension oracle, and
//! records the writes it would make. The apply pass performs them. A call
//! that fails returns before the apply pass, so the solver instance is never
//! left half-written.

use ocp_model::{OcpNlp, StageStore};
use ocp_types::{OcpError, Result, SolverOptions};
use tracing::{debug, trace};

use crate::buffer::FieldBuffer;
use crate::field::{self, AddressingMode, FieldDescriptor, ShapeRule, Target};
use crate::oracle::DimensionOracle;
use crate::range::{Addressing, StageRange};
use crate::router::{self, Route};

/// Set `field` on `nlp` from `buffer`.
///
/// `stage == None` addresses the whole horizon; `Some(i)` addresses stage
/// `i`. Field names are case-sensitive and include the `init_*` aliases of
/// the initial guesses.
///
/// # Errors
///
/// Any [`OcpError`] describing why the write was rejected. On error the
/// instance is unchanged.
///
/// # Example
///
/// ```
/// use ocp_model::{OcpNlp, StageStore};
/// use ocp_set::{FieldBuffer, set_field};
/// use ocp_types::{OcpConfig, OcpDims};
///
/// let dims = OcpDims::new(10, 2, 1).with_state_bounds(2);
/// let mut nlp = OcpNlp::new(OcpConfig::linear_ls(dims)).unwrap();
///
/// set_field(&mut nlp, "constr_lbx", None, FieldBuffer::vector(&[-1.0, -2.0])).unwrap();
/// assert_eq!(nlp.constraints().get(4, "lbx").unwrap(), &[-1.0, -2.0]);
/// ```
pub fn set_field(
    nlp: &mut OcpNlp,
    field: &str,
    stage: Option<usize>,
    buffer: FieldBuffer<'_>,
) -> Result<()> {
    let result = plan(nlp, field, Addressing::from(stage), &buffer)
        .and_then(|plan| apply(nlp, plan, buffer.values()));
    if let Err(err) = &result {
        debug!(field, ?stage, error = %err, "Rejected field write");
    }
    result
}

/// Sub-model holding per-stage records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Store {
    Constraints,
    Cost,
    Trajectory,
    Guesses,
}

/// One validated write of `values[offset..offset + len]`.
#[derive(Debug, Clone, Copy)]
struct StageWrite {
    store: Store,
    stage: usize,
    attribute: &'static str,
    offset: usize,
    len: usize,
}

#[derive(Debug)]
enum WritePlan {
    Stages {
        field: &'static str,
        writes: Vec<StageWrite>,
    },
    Options {
        field: &'static str,
        options: SolverOptions,
    },
    Parameters {
        routes: Vec<Route>,
    },
}

fn plan(
    nlp: &OcpNlp,
    name: &str,
    addressing: Addressing,
    buffer: &FieldBuffer<'_>,
) -> Result<WritePlan> {
    let descriptor = field::lookup(name).ok_or_else(|| OcpError::UnsupportedField {
        field: name.to_string(),
        supported: field::supported_fields(),
    })?;
    let range = StageRange::resolve(name, addressing, descriptor.extent, nlp.dims().n)?;

    match descriptor.mode {
        AddressingMode::Scalar => plan_option(nlp, descriptor, buffer),
        AddressingMode::Parameters => {
            let stage = match addressing {
                Addressing::WholeHorizon => None,
                Addressing::Stage(s) => Some(s),
            };
            let routes = router::plan_routes(nlp.functions(), nlp.phases(), stage, buffer.values())?;
            Ok(WritePlan::Parameters { routes })
        }
        AddressingMode::Packed if addressing == Addressing::WholeHorizon => {
            plan_packed(nlp, descriptor, range, buffer)
        }
        AddressingMode::Broadcast => plan_broadcast(nlp, descriptor, range, buffer),
        AddressingMode::Initial => {
            let dims = nlp.dims();
            if dims.nbx(0) != dims.nx(0) {
                return Err(OcpError::invalid_config(format!(
                    "{name} needs every state bounded at stage 0 (nbx = {}, nx = {})",
                    dims.nbx(0),
                    dims.nx(0)
                )));
            }
            plan_per_stage(nlp, descriptor, range, buffer)
        }
        AddressingMode::PerStage
        | AddressingMode::Packed
        | AddressingMode::SingleStage
        | AddressingMode::Terminal => plan_per_stage(nlp, descriptor, range, buffer),
    }
}

fn store_of(descriptor: &FieldDescriptor) -> Result<Store> {
    match descriptor.target {
        Target::Constraints => Ok(Store::Constraints),
        Target::Cost => Ok(Store::Cost),
        Target::Trajectory => Ok(Store::Trajectory),
        Target::Guesses => Ok(Store::Guesses),
        Target::Options | Target::Functions => Err(OcpError::invalid_config(format!(
            "field '{}' has no per-stage storage",
            descriptor.name
        ))),
    }
}

fn push_writes(
    writes: &mut Vec<StageWrite>,
    store: Store,
    descriptor: &FieldDescriptor,
    stage: usize,
    offset: usize,
    len: usize,
) {
    writes.extend(descriptor.attributes.iter().map(|&attribute| StageWrite {
        store,
        stage,
        attribute,
        offset,
        len,
    }));
}

/// Each stage checked on its own and given the whole buffer.
fn plan_per_stage(
    nlp: &OcpNlp,
    descriptor: &FieldDescriptor,
    range: StageRange,
    buffer: &FieldBuffer<'_>,
) -> Result<WritePlan> {
    let store = store_of(descriptor)?;
    let oracle = DimensionOracle::new(nlp.dims());
    let mut writes = Vec::with_capacity(range.len() * descriptor.attributes.len());

    for stage in range.iter() {
        descriptor.gate.check_stage(descriptor.name, stage, nlp.plan())?;
        match descriptor.shape {
            ShapeRule::Matrix => check_matrix(&oracle, descriptor, stage, buffer)?,
            _ => check_len(&oracle, descriptor, stage, buffer.len())?,
        }
        push_writes(&mut writes, store, descriptor, stage, 0, buffer.len());
    }

    Ok(WritePlan::Stages {
        field: descriptor.name,
        writes,
    })
}

/// Whole-horizon trajectory initialization: stage `i` takes the slice that
/// follows the slices of stages `0..i`.
fn plan_packed(
    nlp: &OcpNlp,
    descriptor: &FieldDescriptor,
    range: StageRange,
    buffer: &FieldBuffer<'_>,
) -> Result<WritePlan> {
    let store = store_of(descriptor)?;
    let oracle = DimensionOracle::new(nlp.dims());
    let mut writes = Vec::with_capacity(range.len());
    let mut offset = 0;

    for stage in range.iter() {
        descriptor.gate.check_stage(descriptor.name, stage, nlp.plan())?;
        let len = oracle.required_size(descriptor.size, stage)?;
        push_writes(&mut writes, store, descriptor, stage, offset, len);
        offset += len;
    }

    if offset != buffer.len() {
        return Err(OcpError::dimension_mismatch(
            descriptor.name,
            offset,
            buffer.len(),
        ));
    }

    Ok(WritePlan::Stages {
        field: descriptor.name,
        writes,
    })
}

/// Slack penalties: sized at the first stage and copied to every stage.
fn plan_broadcast(
    nlp: &OcpNlp,
    descriptor: &FieldDescriptor,
    range: StageRange,
    buffer: &FieldBuffer<'_>,
) -> Result<WritePlan> {
    let store = store_of(descriptor)?;
    let oracle = DimensionOracle::new(nlp.dims());
    let mut writes = Vec::with_capacity(range.len() * descriptor.attributes.len());

    check_len(&oracle, descriptor, range.start, buffer.len())?;
    for stage in range.iter() {
        descriptor.gate.check_stage(descriptor.name, stage, nlp.plan())?;
        // Stages with a different slack count cannot take the shared buffer.
        if stage != range.start {
            check_len(&oracle, descriptor, stage, buffer.len())?;
        }
        push_writes(&mut writes, store, descriptor, stage, 0, buffer.len());
    }

    Ok(WritePlan::Stages {
        field: descriptor.name,
        writes,
    })
}

fn plan_option(
    nlp: &OcpNlp,
    descriptor: &FieldDescriptor,
    buffer: &FieldBuffer<'_>,
) -> Result<WritePlan> {
    let [value] = buffer.values() else {
        return Err(OcpError::dimension_mismatch(descriptor.name, 1, buffer.len()));
    };
    let name = descriptor.size;
    if !value.is_finite() {
        return Err(OcpError::invalid_config(format!(
            "{} must be finite, got {value}",
            descriptor.name
        )));
    }
    // Options are integers; fractional input is truncated toward zero.
    #[allow(clippy::cast_possible_truncation)]
    let value = *value as i64;

    descriptor.gate.check_option(descriptor.name, value, nlp.plan())?;
    let mut options = nlp.options().clone();
    options.set(name, value)?;

    Ok(WritePlan::Options {
        field: descriptor.name,
        options,
    })
}

fn check_len(
    oracle: &DimensionOracle<'_>,
    descriptor: &FieldDescriptor,
    stage: usize,
    actual: usize,
) -> Result<()> {
    let expected = oracle.required_size(descriptor.size, stage)?;
    if expected != actual {
        return Err(OcpError::dimension_mismatch(descriptor.name, expected, actual));
    }
    Ok(())
}

fn check_matrix(
    oracle: &DimensionOracle<'_>,
    descriptor: &FieldDescriptor,
    stage: usize,
    buffer: &FieldBuffer<'_>,
) -> Result<()> {
    let (rows, cols) = oracle.matrix_shape(descriptor.size, stage)?;
    // An empty matrix is empty whatever shape the caller declared.
    if rows * cols == 0 && buffer.is_empty() {
        return Ok(());
    }
    if buffer.rows() != rows || buffer.cols() != cols {
        return Err(OcpError::MatrixDimensionMismatch {
            field: descriptor.name.to_string(),
            expected_rows: rows,
            expected_cols: cols,
            rows: buffer.rows(),
            cols: buffer.cols(),
        });
    }
    if buffer.len() != rows * cols {
        return Err(OcpError::dimension_mismatch(
            descriptor.name,
            rows * cols,
            buffer.len(),
        ));
    }
    Ok(())
}

fn store_mut(nlp: &mut OcpNlp, store: Store) -> &mut dyn StageStore {
    match store {
        Store::Constraints => nlp.constraints_mut(),
        Store::Cost => nlp.cost_mut(),
        Store::Trajectory => nlp.trajectory_mut(),
        Store::Guesses => nlp.guesses_mut(),
    }
}

fn apply(nlp: &mut OcpNlp, plan: WritePlan, values: &[f64]) -> Result<()> {
    match plan {
        WritePlan::Stages { field, writes } => {
            for write in &writes {
                let slice = values
                    .get(write.offset..write.offset + write.len)
                    .ok_or_else(|| {
                        OcpError::dimension_mismatch(field, write.offset + write.len, values.len())
                    })?;
                trace!(
                    field,
                    stage = write.stage,
                    attribute = write.attribute,
                    len = write.len,
                    "Writing stage"
                );
                store_mut(nlp, write.store).set(write.stage, write.attribute, slice)?;
            }
            debug!(field, writes = writes.len(), "Applied field");
        }
        WritePlan::Options { field, options } => {
            *nlp.options_mut() = options;
            debug!(field, "Applied solver option");
        }
        WritePlan::Parameters { routes } => {
            router::apply_routes(nlp.functions_mut(), &routes, values)?;
            debug!(instances = routes.len(), "Applied parameters");
        }
    }
    Ok(())
}
