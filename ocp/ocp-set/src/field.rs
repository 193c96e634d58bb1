//! The closed table of injectable fields.
//!
//! Every name a caller may pass to [`set_field`](crate::set_field) has one
//! [`FieldDescriptor`] in [`FIELDS`]. A descriptor says where the data goes,
//! how the buffer is sized and checked, which model variants accept it and
//! how the stage argument is interpreted. The table is fixed at compile time.

use ocp_types::IntegratorVariant;

use crate::gate::VariantGate;
use crate::range::StageExtent;

/// Sub-model a field writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Bounds and constraint matrices.
    Constraints,
    /// Least-squares cost terms and slack penalties.
    Cost,
    /// Primal-dual iterate.
    Trajectory,
    /// Implicit integrator warm starts.
    Guesses,
    /// NLP solver options.
    Options,
    /// Parametric external functions.
    Functions,
}

/// How a buffer's shape is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeRule {
    /// Element count only.
    Vector,
    /// Rows and columns checked independently.
    Matrix,
    /// Exactly one element.
    Scalar,
    /// Checked against each function's declared parameter count.
    PerFunction,
}

/// How the buffer is spread over the resolved stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// Each stage is checked and receives the whole buffer.
    PerStage,
    /// Size derived once, the same buffer written to every stage.
    Broadcast,
    /// Whole horizon packs all stages contiguously.
    Packed,
    /// One stage per call.
    SingleStage,
    /// Terminal stage only.
    Terminal,
    /// Initial stage only.
    Initial,
    /// Solver option, not stage-indexed.
    Scalar,
    /// Routed to the parametric external functions.
    Parameters,
}

/// Static description of one injectable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: &'static str,
    /// Alternative name.
    pub alias: Option<&'static str>,
    /// Sub-model written.
    pub target: Target,
    /// Attributes of the target written, in write order.
    pub attributes: &'static [&'static str],
    /// Attribute the required size is derived from.
    pub size: &'static str,
    /// Buffer shape check.
    pub shape: ShapeRule,
    /// Model-variant requirement.
    pub gate: VariantGate,
    /// Spreading of the buffer over stages.
    pub mode: AddressingMode,
    /// Admissible stages.
    pub extent: StageExtent,
}

impl FieldDescriptor {
    const fn new(
        name: &'static str,
        target: Target,
        attributes: &'static [&'static str],
        shape: ShapeRule,
        mode: AddressingMode,
        extent: StageExtent,
    ) -> Self {
        let size = match attributes {
            [first, ..] => *first,
            [] => "",
        };
        Self {
            name,
            alias: None,
            target,
            attributes,
            size,
            shape,
            gate: VariantGate::None,
            mode,
            extent,
        }
    }

    const fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    const fn sized_by(mut self, size: &'static str) -> Self {
        self.size = size;
        self
    }

    const fn gated(mut self, gate: VariantGate) -> Self {
        self.gate = gate;
        self
    }

    const fn with_mode(mut self, mode: AddressingMode) -> Self {
        self.mode = mode;
        self
    }

    const fn with_shape(mut self, shape: ShapeRule) -> Self {
        self.shape = shape;
        self
    }

    /// Whether `name` is this field's name or alias.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.alias == Some(name)
    }
}

const fn constraint(
    name: &'static str,
    attributes: &'static [&'static str],
    extent: StageExtent,
) -> FieldDescriptor {
    FieldDescriptor::new(
        name,
        Target::Constraints,
        attributes,
        ShapeRule::Vector,
        AddressingMode::PerStage,
        extent,
    )
}

const fn least_squares(
    name: &'static str,
    attribute: &'static [&'static str],
    shape: ShapeRule,
    extent: StageExtent,
) -> FieldDescriptor {
    FieldDescriptor::new(name, Target::Cost, attribute, shape, AddressingMode::PerStage, extent)
        .gated(VariantGate::LeastSquaresCost)
}

const fn slack_penalty(
    name: &'static str,
    attribute: &'static [&'static str],
    size: &'static str,
) -> FieldDescriptor {
    FieldDescriptor::new(
        name,
        Target::Cost,
        attribute,
        ShapeRule::Vector,
        AddressingMode::Broadcast,
        StageExtent::Stages,
    )
    .sized_by(size)
}

const fn initializer(
    name: &'static str,
    alias: &'static str,
    attribute: &'static [&'static str],
    target: Target,
    extent: StageExtent,
) -> FieldDescriptor {
    FieldDescriptor::new(
        name,
        target,
        attribute,
        ShapeRule::Vector,
        AddressingMode::Packed,
        extent,
    )
    .alias(alias)
}

const fn single_stage(
    name: &'static str,
    alias: &'static str,
    attribute: &'static [&'static str],
) -> FieldDescriptor {
    FieldDescriptor::new(
        name,
        Target::Trajectory,
        attribute,
        ShapeRule::Vector,
        AddressingMode::SingleStage,
        StageExtent::SingleNode,
    )
    .alias(alias)
}

const fn option(name: &'static str, option: &'static [&'static str]) -> FieldDescriptor {
    FieldDescriptor::new(
        name,
        Target::Options,
        option,
        ShapeRule::Scalar,
        AddressingMode::Scalar,
        StageExtent::Global,
    )
}

/// Every injectable field.
pub static FIELDS: &[FieldDescriptor] = &[
    // Constraints
    constraint("constr_x0", &["lbx", "ubx"], StageExtent::Initial)
        .sized_by("x")
        .with_mode(AddressingMode::Initial),
    constraint("constr_lbx", &["lbx"], StageExtent::Stages),
    constraint("constr_ubx", &["ubx"], StageExtent::Stages),
    constraint("constr_lbu", &["lbu"], StageExtent::Intervals),
    constraint("constr_ubu", &["ubu"], StageExtent::Intervals),
    constraint("constr_C", &["C"], StageExtent::Stages).with_shape(ShapeRule::Matrix),
    constraint("constr_D", &["D"], StageExtent::Intervals).with_shape(ShapeRule::Matrix),
    constraint("constr_lg", &["lg"], StageExtent::Stages),
    constraint("constr_ug", &["ug"], StageExtent::Stages),
    constraint("constr_lh", &["lh"], StageExtent::Stages),
    constraint("constr_uh", &["uh"], StageExtent::Stages),
    // Least-squares cost
    least_squares("cost_y_ref", &["y_ref"], ShapeRule::Vector, StageExtent::Stages),
    least_squares("cost_y_ref_e", &["y_ref"], ShapeRule::Vector, StageExtent::Terminal)
        .with_mode(AddressingMode::Terminal),
    least_squares("cost_Vu", &["Vu"], ShapeRule::Matrix, StageExtent::Intervals),
    least_squares("cost_Vx", &["Vx"], ShapeRule::Matrix, StageExtent::Stages),
    least_squares("cost_W", &["W"], ShapeRule::Matrix, StageExtent::Stages),
    // Slack penalties
    slack_penalty("cost_Z", &["Z"], "cost_Z"),
    slack_penalty("cost_Zl", &["Zl"], "Zl"),
    slack_penalty("cost_Zu", &["Zu"], "Zu"),
    slack_penalty("cost_z", &["z"], "cost_z"),
    slack_penalty("cost_zl", &["zl"], "zl"),
    slack_penalty("cost_zu", &["zu"], "zu"),
    // Initial guesses
    initializer("x", "init_x", &["x"], Target::Trajectory, StageExtent::Nodes),
    initializer("u", "init_u", &["u"], Target::Trajectory, StageExtent::Intervals),
    initializer("z", "init_z", &["z"], Target::Guesses, StageExtent::Intervals)
        .gated(VariantGate::Integrator(IntegratorVariant::Irk)),
    initializer("xdot", "init_xdot", &["xdot"], Target::Guesses, StageExtent::Intervals)
        .gated(VariantGate::Integrator(IntegratorVariant::Irk)),
    initializer(
        "gnsf_phi",
        "init_gnsf_phi",
        &["gnsf_phi"],
        Target::Guesses,
        StageExtent::Intervals,
    )
    .gated(VariantGate::Integrator(IntegratorVariant::Gnsf)),
    initializer("pi", "init_pi", &["pi"], Target::Trajectory, StageExtent::Intervals),
    single_stage("lam", "init_lam", &["lam"]),
    single_stage("t", "init_t", &["t"]),
    single_stage("sl", "init_sl", &["sl"]),
    single_stage("su", "init_su", &["su"]),
    // Parameters
    FieldDescriptor::new(
        "p",
        Target::Functions,
        &[],
        ShapeRule::PerFunction,
        AddressingMode::Parameters,
        StageExtent::Nodes,
    ),
    // Solver options
    option("nlp_solver_max_iter", &["max_iter"]),
    option("rti_phase", &["rti_phase"]).gated(VariantGate::RtiSolver),
    option("qp_warm_start", &["qp_warm_start"]),
    option("warm_start_first_qp", &["warm_start_first_qp"]),
    option("print_level", &["print_level"]),
];

/// Find the descriptor of `name`, by field name or alias.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static FieldDescriptor> {
    FIELDS.iter().find(|field| field.matches(name))
}

/// Comma-separated list of every recognized name, aliases included.
#[must_use]
pub fn supported_fields() -> String {
    FIELDS
        .iter()
        .flat_map(|field| std::iter::once(field.name).chain(field.alias))
        .collect::<Vec<_>>()
        .join(", ")
}
