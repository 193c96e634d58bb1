//! Distribution of the parameter vector `p` over the external functions.
//!
//! Each function group stores one array of instances per phase, and phase
//! `j` covers the stages `[offset_j, offset_j + length_j)` where `offset_j`
//! is the sum of the lengths before it. A whole-horizon write reaches every
//! instance of every used phase; a single-stage write reaches the one
//! instance whose phase contains the stage, at its local index.

use ocp_model::{ExternalFunctionTable, FunctionGroup};
use ocp_types::{FunctionKind, OcpError, PhaseLayout, Result};
use tracing::trace;

/// Marker in the group name of dynamics functions, which are always generated code.
const DYNAMICS_MARKER: &str = "dyn_";

/// One parameter write, resolved to a function instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Index of the group in the function table.
    pub group: usize,
    /// Phase inside the group.
    pub phase: usize,
    /// Instance inside the phase.
    pub index: usize,
    /// Global stage the instance belongs to.
    pub stage: usize,
}

/// Kind of the functions in a phase of `group`.
pub fn phase_kind(group: &str, tag: &str) -> Result<FunctionKind> {
    if group.contains(DYNAMICS_MARKER) {
        return Ok(FunctionKind::AnalyticCompiled);
    }
    FunctionKind::from_tag(tag).ok_or_else(|| OcpError::UnsupportedFunctionKind {
        group: group.to_string(),
        kind: tag.to_string(),
    })
}

/// Resolve and validate every instance a write of `values` reaches.
///
/// `stage == None` addresses the whole horizon. Nothing is written.
pub fn plan_routes(
    functions: &ExternalFunctionTable,
    layout: &PhaseLayout,
    stage: Option<usize>,
    values: &[f64],
) -> Result<Vec<Route>> {
    let mut routes = Vec::new();
    for (g, group) in functions.groups().iter().enumerate() {
        route_group(g, group, layout, stage, values, &mut routes)?;
    }
    Ok(routes)
}

fn route_group(
    g: usize,
    group: &FunctionGroup,
    layout: &PhaseLayout,
    stage: Option<usize>,
    values: &[f64],
    routes: &mut Vec<Route>,
) -> Result<()> {
    let mut phase_offset = 0;
    for (j, phase) in layout.phases().iter().enumerate().take(group.num_phases()) {
        let kind = phase_kind(group.name(), &phase.kind)?;
        let instances = group.phase(j);
        let offset = phase_offset;
        phase_offset += phase.length;

        if instances.is_empty() {
            continue;
        }

        let local = match stage {
            None => 0..phase.length,
            Some(s) if offset <= s && s < offset + phase.length => {
                (s - offset)..(s - offset + 1)
            }
            Some(_) => continue,
        };

        for k in local {
            let Some(instance) = instances.get(k) else {
                return Err(OcpError::invalid_config(format!(
                    "function group '{}' phase {j} has no instance {k}",
                    group.name()
                )));
            };
            if instance.kind() != kind {
                return Err(OcpError::FunctionKindMismatch {
                    group: group.name().to_string(),
                    phase: j,
                    expected: kind,
                    actual: instance.kind(),
                });
            }
            if instance.num_params() != values.len() {
                return Err(OcpError::dimension_mismatch(
                    "p",
                    instance.num_params(),
                    values.len(),
                ));
            }
            routes.push(Route {
                group: g,
                phase: j,
                index: k,
                stage: offset + k,
            });
        }
    }
    Ok(())
}

/// Write `values` into every routed instance.
pub fn apply_routes(
    functions: &mut ExternalFunctionTable,
    routes: &[Route],
    values: &[f64],
) -> Result<()> {
    let groups = functions.groups_mut();
    for route in routes {
        let group = groups.get_mut(route.group).ok_or_else(|| {
            OcpError::invalid_config(format!("no function group at index {}", route.group))
        })?;
        trace!(
            group = group.name(),
            phase = route.phase,
            index = route.index,
            stage = route.stage,
            "Routing parameters"
        );
        let name = group.name().to_string();
        let instance = group.instance_mut(route.phase, route.index).ok_or_else(|| {
            OcpError::invalid_config(format!(
                "function group '{name}' phase {} has no instance {}",
                route.phase, route.index
            ))
        })?;
        instance.set_params(values)?;
    }
    Ok(())
}
