//! Routing of the parameter vector `p` over external-function phases.

use std::cell::RefCell;
use std::rc::Rc;

use ocp_model::{CallbackFunction, CompiledFunction, FunctionGroup, OcpNlp, ParametricFunction};
use ocp_set::{FieldBuffer, set_field};
use ocp_types::{FunctionPhase, OcpConfig, OcpDims, OcpError, PhaseLayout};

/// Three intervals: phases of length 3 (interior) and 1 (terminal).
fn nlp_with_groups(interior: &str, terminal: &str, groups: Vec<FunctionGroup>) -> OcpNlp {
    let config = OcpConfig::linear_ls(OcpDims::new(3, 2, 1)).function_kinds(interior, terminal);
    let mut nlp = OcpNlp::new(config).unwrap();
    for group in groups {
        nlp.insert_function_group(group).unwrap();
    }
    nlp
}

fn cost_group(num_params: usize) -> FunctionGroup {
    FunctionGroup::new("cost_y_fun")
        .with_phase(CompiledFunction::array("cost_y_fun", 3, num_params))
        .with_phase(CompiledFunction::array("cost_y_fun_e", 1, num_params))
}

fn updates(nlp: &OcpNlp, group: &str, phase: usize, index: usize) -> usize {
    nlp.functions()
        .group(group)
        .and_then(|g| g.instance(phase, index))
        .map_or(0, |f| f.updates())
}

#[test]
fn single_stage_reaches_one_interior_instance() {
    let mut nlp = nlp_with_groups("casadi", "casadi", vec![cost_group(2)]);
    set_field(&mut nlp, "p", Some(2), FieldBuffer::vector(&[1.5, 2.5])).unwrap();

    let group = nlp.functions().group("cost_y_fun").unwrap();
    assert_eq!(group.instance(0, 2).unwrap().params(), &[1.5, 2.5]);
    for k in 0..2 {
        assert_eq!(group.instance(0, k).unwrap().params(), &[0.0, 0.0]);
    }
    assert_eq!(updates(&nlp, "cost_y_fun", 1, 0), 0);
}

#[test]
fn single_stage_n_reaches_terminal_instance() {
    let mut nlp = nlp_with_groups("casadi", "casadi", vec![cost_group(1)]);
    set_field(&mut nlp, "p", Some(3), FieldBuffer::vector(&[4.0])).unwrap();

    assert_eq!(updates(&nlp, "cost_y_fun", 1, 0), 1);
    assert_eq!((0..3).map(|k| updates(&nlp, "cost_y_fun", 0, k)).sum::<usize>(), 0);
}

#[test]
fn whole_horizon_reaches_every_instance() {
    let mut nlp = nlp_with_groups("casadi", "casadi", vec![cost_group(2)]);
    set_field(&mut nlp, "p", None, FieldBuffer::vector(&[7.0, 8.0])).unwrap();

    for k in 0..3 {
        assert_eq!(updates(&nlp, "cost_y_fun", 0, k), 1);
    }
    assert_eq!(updates(&nlp, "cost_y_fun", 1, 0), 1);
}

#[test]
fn every_group_receives_the_write() {
    let dynamics = FunctionGroup::new("dyn_expl_ode_fun")
        .with_phase(CompiledFunction::array("f", 3, 2))
        .with_unused_phase();
    let mut nlp = nlp_with_groups("casadi", "casadi", vec![cost_group(2), dynamics]);

    set_field(&mut nlp, "p", Some(1), FieldBuffer::vector(&[1.0, 1.0])).unwrap();
    assert_eq!(updates(&nlp, "cost_y_fun", 0, 1), 1);
    assert_eq!(updates(&nlp, "dyn_expl_ode_fun", 0, 1), 1);

    // The dynamics group has no terminal instance.
    set_field(&mut nlp, "p", Some(3), FieldBuffer::vector(&[1.0, 1.0])).unwrap();
    assert_eq!(updates(&nlp, "cost_y_fun", 1, 0), 1);
}

#[test]
fn callbacks_are_notified() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let interior: Vec<_> = (0..3)
        .map(|k| {
            let sink = Rc::clone(&seen);
            Box::new(
                CallbackFunction::new(format!("ext_cost_{k}"), 1)
                    .on_update(move |p| sink.borrow_mut().push((k, p[0]))),
            ) as Box<dyn ParametricFunction>
        })
        .collect();
    let group = FunctionGroup::new("ext_cost_fun")
        .with_phase(interior)
        .with_phase(CompiledFunction::array("ext_cost_e", 1, 1));
    let mut nlp = nlp_with_groups("generic", "casadi", vec![group]);

    set_field(&mut nlp, "p", None, FieldBuffer::vector(&[0.25])).unwrap();
    assert_eq!(*seen.borrow(), vec![(0, 0.25), (1, 0.25), (2, 0.25)]);
    assert_eq!(updates(&nlp, "ext_cost_fun", 1, 0), 1);
}

#[test]
fn dynamics_groups_are_routed_as_compiled() {
    let dynamics = FunctionGroup::new("dyn_impl_dae_fun")
        .with_phase(CompiledFunction::array("f", 3, 1))
        .with_unused_phase();
    let mut nlp = nlp_with_groups("generic", "generic", vec![dynamics]);

    assert!(set_field(&mut nlp, "p", Some(0), FieldBuffer::vector(&[1.0])).is_ok());
    assert_eq!(updates(&nlp, "dyn_impl_dae_fun", 0, 0), 1);
}

#[test]
fn instance_kind_must_match_phase() {
    let mut nlp = nlp_with_groups("generic", "casadi", vec![cost_group(1)]);
    let err = set_field(&mut nlp, "p", None, FieldBuffer::vector(&[1.0])).unwrap_err();
    assert!(matches!(
        err,
        OcpError::FunctionKindMismatch {
            phase: 0,
            ..
        }
    ));
}

#[test]
fn unknown_kind_tag_is_rejected() {
    let mut nlp = nlp_with_groups("matlab", "casadi", vec![cost_group(1)]);
    let err = set_field(&mut nlp, "p", Some(3), FieldBuffer::vector(&[1.0])).unwrap_err();
    assert_eq!(
        err,
        OcpError::UnsupportedFunctionKind {
            group: "cost_y_fun".to_string(),
            kind: "matlab".to_string(),
        }
    );
}

#[test]
fn parameter_count_checked_for_every_group_first() {
    let other = FunctionGroup::new("constr_h_fun")
        .with_phase(CompiledFunction::array("h", 3, 3))
        .with_unused_phase();
    let mut nlp = nlp_with_groups("casadi", "casadi", vec![cost_group(2), other]);

    let err = set_field(&mut nlp, "p", None, FieldBuffer::vector(&[1.0, 2.0])).unwrap_err();
    assert_eq!(
        err,
        OcpError::DimensionMismatch {
            field: "p".to_string(),
            expected: 3,
            actual: 2,
        }
    );
    // The first group passed its checks but was not written.
    assert_eq!(updates(&nlp, "cost_y_fun", 0, 0), 0);
}

#[test]
fn parameter_stage_range() {
    let mut nlp = nlp_with_groups("casadi", "casadi", vec![cost_group(1)]);
    assert!(matches!(
        set_field(&mut nlp, "p", Some(4), FieldBuffer::vector(&[1.0])).unwrap_err(),
        OcpError::StageOutOfRange { stage: 4, last: 3, .. }
    ));
}

#[test]
fn arbitrary_phase_count() {
    let layout = PhaseLayout::new(vec![
        FunctionPhase::new(1, "casadi"),
        FunctionPhase::new(2, "generic"),
        FunctionPhase::new(1, "casadi"),
    ]);
    let config = OcpConfig::linear_ls(OcpDims::new(3, 2, 1)).phases(layout);
    let group = FunctionGroup::new("constr_h_fun")
        .with_phase(CompiledFunction::array("h_0", 1, 1))
        .with_phase(CallbackFunction::array("h", 2, 1))
        .with_phase(CompiledFunction::array("h_e", 1, 1));
    let mut nlp = OcpNlp::new(config).unwrap().with_function_group(group).unwrap();

    set_field(&mut nlp, "p", Some(2), FieldBuffer::vector(&[9.0])).unwrap();
    let group = nlp.functions().group("constr_h_fun").unwrap();
    assert_eq!(group.instance(1, 1).unwrap().params(), &[9.0]);
    assert_eq!(group.instance(1, 0).unwrap().params(), &[0.0]);
    assert_eq!(group.instance(2, 0).unwrap().params(), &[0.0]);
}

#[test]
fn no_groups_is_a_no_op() {
    let mut nlp = nlp_with_groups("casadi", "casadi", Vec::new());
    assert!(set_field(&mut nlp, "p", None, FieldBuffer::vector(&[1.0, 2.0, 3.0])).is_ok());
}
