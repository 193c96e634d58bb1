//! Parametric external functions.
//!
//! User models embed functions (dynamics, cost residuals, constraint
//! functions) that accept a numeric parameter vector `p`. They are organized
//! as named [`FunctionGroup`]s, each split into phases that line up with the
//! solver's [`PhaseLayout`]: phase `j` holds one instance per stage of that
//! phase, or nothing when the model does not use the group there.

use ocp_types::{FunctionKind, OcpError, PhaseLayout, Result};

/// A function that accepts a parameter vector.
pub trait ParametricFunction: std::fmt::Debug {
    /// Kind of implementation behind this function.
    fn kind(&self) -> FunctionKind;

    /// Number of parameters the function declares.
    fn num_params(&self) -> usize;

    /// Replace the parameter vector.
    fn set_params(&mut self, params: &[f64]) -> Result<()>;

    /// Current parameter vector.
    fn params(&self) -> &[f64];

    /// Number of successful [`set_params`](Self::set_params) calls.
    fn updates(&self) -> usize;
}

/// Boxed function instance as stored in a [`FunctionGroup`].
pub type BoxedFunction = Box<dyn ParametricFunction>;

fn replace_params(
    name: &str,
    target: &mut [f64],
    params: &[f64],
    updates: &mut usize,
) -> Result<()> {
    if params.len() != target.len() {
        return Err(OcpError::dimension_mismatch(name, target.len(), params.len()));
    }
    target.copy_from_slice(params);
    *updates += 1;
    Ok(())
}

// ============================================================================
// Implementations
// ============================================================================

/// Generated, compiled function with a fixed parameter count.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFunction {
    name: String,
    params: Vec<f64>,
    updates: usize,
}

impl CompiledFunction {
    /// Create a function declaring `num_params` parameters, all zero.
    #[must_use]
    pub fn new(name: impl Into<String>, num_params: usize) -> Self {
        Self {
            name: name.into(),
            params: vec![0.0; num_params],
            updates: 0,
        }
    }

    /// `count` boxed instances, one per stage of a phase.
    #[must_use]
    pub fn array(name: &str, count: usize, num_params: usize) -> Vec<BoxedFunction> {
        (0..count)
            .map(|k| Box::new(Self::new(format!("{name}_{k}"), num_params)) as BoxedFunction)
            .collect()
    }

    /// Function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ParametricFunction for CompiledFunction {
    fn kind(&self) -> FunctionKind {
        FunctionKind::AnalyticCompiled
    }

    fn num_params(&self) -> usize {
        self.params.len()
    }

    fn set_params(&mut self, params: &[f64]) -> Result<()> {
        replace_params(&self.name, &mut self.params, params, &mut self.updates)
    }

    fn params(&self) -> &[f64] {
        &self.params
    }

    fn updates(&self) -> usize {
        self.updates
    }
}

/// Hook run after a callback function receives new parameters.
pub type ParamsHook = Box<dyn FnMut(&[f64])>;

/// Hand-written function notified through a hook on every parameter update.
pub struct CallbackFunction {
    name: String,
    params: Vec<f64>,
    updates: usize,
    on_update: Option<ParamsHook>,
}

impl CallbackFunction {
    /// Create a function declaring `num_params` parameters, all zero.
    #[must_use]
    pub fn new(name: impl Into<String>, num_params: usize) -> Self {
        Self {
            name: name.into(),
            params: vec![0.0; num_params],
            updates: 0,
            on_update: None,
        }
    }

    /// Run `hook` with the new parameters after every update.
    #[must_use]
    pub fn on_update(mut self, hook: impl FnMut(&[f64]) + 'static) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    /// `count` boxed instances without hooks.
    #[must_use]
    pub fn array(name: &str, count: usize, num_params: usize) -> Vec<BoxedFunction> {
        (0..count)
            .map(|k| Box::new(Self::new(format!("{name}_{k}"), num_params)) as BoxedFunction)
            .collect()
    }

    /// Function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for CallbackFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackFunction")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("updates", &self.updates)
            .field("has_hook", &self.on_update.is_some())
            .finish()
    }
}

impl ParametricFunction for CallbackFunction {
    fn kind(&self) -> FunctionKind {
        FunctionKind::GenericCallback
    }

    fn num_params(&self) -> usize {
        self.params.len()
    }

    fn set_params(&mut self, params: &[f64]) -> Result<()> {
        replace_params(&self.name, &mut self.params, params, &mut self.updates)?;
        if let Some(hook) = self.on_update.as_mut() {
            hook(&self.params);
        }
        Ok(())
    }

    fn params(&self) -> &[f64] {
        &self.params
    }

    fn updates(&self) -> usize {
        self.updates
    }
}

// ============================================================================
// Groups
// ============================================================================

/// Named set of function arrays, one array per phase.
#[derive(Debug, Default)]
pub struct FunctionGroup {
    name: String,
    phases: Vec<Vec<BoxedFunction>>,
}

impl FunctionGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phases: Vec::new(),
        }
    }

    /// Append a phase holding one instance per stage.
    #[must_use]
    pub fn with_phase(mut self, instances: Vec<BoxedFunction>) -> Self {
        self.phases.push(instances);
        self
    }

    /// Append a phase the model does not use.
    #[must_use]
    pub fn with_unused_phase(mut self) -> Self {
        self.phases.push(Vec::new());
        self
    }

    /// Group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of declared phases.
    #[must_use]
    pub fn num_phases(&self) -> usize {
        self.phases.len()
    }

    /// Instances of `phase`; empty when the phase is unused or undeclared.
    #[must_use]
    pub fn phase(&self, phase: usize) -> &[BoxedFunction] {
        self.phases.get(phase).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Instance `index` of `phase`.
    #[must_use]
    pub fn instance(&self, phase: usize, index: usize) -> Option<&dyn ParametricFunction> {
        self.phase(phase).get(index).map(|f| &**f)
    }

    /// Mutable instance `index` of `phase`.
    pub fn instance_mut(
        &mut self,
        phase: usize,
        index: usize,
    ) -> Option<&mut (dyn ParametricFunction + 'static)> {
        self.phases
            .get_mut(phase)
            .and_then(|instances| instances.get_mut(index))
            .map(|f| &mut **f)
    }

    /// Check the group against the solver's phase layout.
    pub fn validate(&self, layout: &PhaseLayout) -> Result<()> {
        if self.phases.len() > layout.len() {
            return Err(OcpError::invalid_config(format!(
                "function group '{}' declares {} phases, layout has {}",
                self.name,
                self.phases.len(),
                layout.len()
            )));
        }
        for (j, (instances, phase)) in self.phases.iter().zip(layout.phases()).enumerate() {
            if !instances.is_empty() && instances.len() != phase.length {
                return Err(OcpError::invalid_config(format!(
                    "function group '{}' phase {j} has {} instances, expected {}",
                    self.name,
                    instances.len(),
                    phase.length
                )));
            }
        }
        Ok(())
    }
}

/// All parametric function groups of a solver instance.
#[derive(Debug, Default)]
pub struct ExternalFunctionTable {
    groups: Vec<FunctionGroup>,
}

impl ExternalFunctionTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group, replacing any group with the same name.
    pub fn insert(&mut self, group: FunctionGroup) {
        if let Some(existing) = self.groups.iter_mut().find(|g| g.name == group.name) {
            *existing = group;
        } else {
            self.groups.push(group);
        }
    }

    /// Groups in insertion order.
    #[must_use]
    pub fn groups(&self) -> &[FunctionGroup] {
        &self.groups
    }

    /// Mutable groups in insertion order.
    pub fn groups_mut(&mut self) -> &mut [FunctionGroup] {
        &mut self.groups
    }

    /// Look up a group by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&FunctionGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the table holds no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
