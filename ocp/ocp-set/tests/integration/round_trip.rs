//! Values written through `set_field` read back unchanged.

use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector};
use ocp_model::StageStore;
use ocp_set::{FieldBuffer, set_field};
use ocp_types::IntegratorVariant;

use crate::common::{N, nlp, nlp_integrated_with, ramp};

#[test]
fn bounds_whole_horizon_cover_path_stages() {
    let mut nlp = nlp();
    let lbx = [-1.0, -2.0, -3.0];
    set_field(&mut nlp, "constr_lbx", None, FieldBuffer::vector(&lbx)).unwrap();

    for stage in 0..N {
        assert_eq!(nlp.constraints().get(stage, "lbx").unwrap(), &lbx);
    }
    assert_eq!(nlp.constraints().get(N, "lbx").unwrap(), &[0.0; 3]);

    set_field(&mut nlp, "constr_ubx", Some(N), FieldBuffer::vector(&[1.0, 2.0, 3.0])).unwrap();
    assert_eq!(nlp.constraints().get(N, "ubx").unwrap(), &[1.0, 2.0, 3.0]);
}

#[test]
fn initial_state_sets_both_bounds() {
    let mut nlp = nlp();
    let x0 = DVector::from_vec(vec![0.1, 0.2, 0.3]);
    set_field(&mut nlp, "constr_x0", None, FieldBuffer::from(&x0)).unwrap();

    let first = nlp.constraints().stage(0).unwrap();
    assert_eq!(first.lbx, x0);
    assert_eq!(first.ubx, x0);
    assert_eq!(nlp.constraints().get(1, "lbx").unwrap(), &[0.0; 3]);
}

#[test]
fn general_constraint_matrices() {
    let mut nlp = nlp();
    let c = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let d = DMatrix::from_row_slice(2, 2, &[7.0, 8.0, 9.0, 10.0]);

    set_field(&mut nlp, "constr_C", None, FieldBuffer::from(&c)).unwrap();
    set_field(&mut nlp, "constr_D", Some(N - 1), FieldBuffer::from(&d)).unwrap();

    assert_eq!(nlp.constraints().stage(2).unwrap().c, c);
    assert_relative_eq!(nlp.constraints().stage(0).unwrap().c[(1, 0)], 4.0);
    assert_eq!(nlp.constraints().stage(N - 1).unwrap().d, d);
    assert_eq!(nlp.constraints().get(0, "D").unwrap(), &[0.0; 4]);

    set_field(&mut nlp, "constr_lg", Some(1), FieldBuffer::vector(&[-5.0, -6.0])).unwrap();
    set_field(&mut nlp, "constr_uh", None, FieldBuffer::vector(&[9.0])).unwrap();
    assert_eq!(nlp.constraints().get(1, "lg").unwrap(), &[-5.0, -6.0]);
    assert_eq!(nlp.constraints().get(3, "uh").unwrap(), &[9.0]);
}

#[test]
fn least_squares_terms() {
    let mut nlp = nlp();
    let vx = DMatrix::from_fn(4, 3, |r, c| (r * 3 + c) as f64);
    let vu = DMatrix::from_fn(4, 2, |r, c| (r + c) as f64);
    let w = DMatrix::from_diagonal(&DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0]));
    let w_e = DMatrix::from_diagonal(&DVector::from_vec(vec![10.0, 20.0, 30.0]));

    set_field(&mut nlp, "cost_Vx", None, FieldBuffer::from(&vx)).unwrap();
    set_field(&mut nlp, "cost_Vu", Some(0), FieldBuffer::from(&vu)).unwrap();
    set_field(&mut nlp, "cost_W", None, FieldBuffer::from(&w)).unwrap();
    set_field(&mut nlp, "cost_W", Some(N), FieldBuffer::from(&w_e)).unwrap();
    set_field(&mut nlp, "cost_y_ref", Some(2), FieldBuffer::vector(&ramp(1.0, 4))).unwrap();
    set_field(&mut nlp, "cost_y_ref_e", None, FieldBuffer::vector(&[7.0, 8.0, 9.0])).unwrap();

    let stage = nlp.cost().stage(1).unwrap();
    assert_eq!(stage.vx, vx);
    assert_eq!(stage.w, w);
    assert_eq!(nlp.cost().stage(0).unwrap().vu, vu);
    assert_eq!(nlp.cost().stage(N).unwrap().w, w_e);
    assert_eq!(nlp.cost().get(2, "y_ref").unwrap(), &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(nlp.cost().get(N, "y_ref").unwrap(), &[7.0, 8.0, 9.0]);
}

#[test]
fn slack_penalties_broadcast() {
    let mut nlp = nlp();
    set_field(&mut nlp, "cost_Z", None, FieldBuffer::vector(&[100.0, 200.0])).unwrap();
    set_field(&mut nlp, "cost_zl", None, FieldBuffer::vector(&[1.0, 2.0])).unwrap();
    set_field(&mut nlp, "cost_zu", Some(N), FieldBuffer::vector(&[3.0, 4.0])).unwrap();

    for stage in 0..N {
        assert_eq!(nlp.cost().get(stage, "Zl").unwrap(), &[100.0, 200.0]);
        assert_eq!(nlp.cost().get(stage, "Zu").unwrap(), &[100.0, 200.0]);
        assert_eq!(nlp.cost().get(stage, "zl").unwrap(), &[1.0, 2.0]);
        assert_eq!(nlp.cost().get(stage, "zu").unwrap(), &[0.0, 0.0]);
    }
    assert_eq!(nlp.cost().get(N, "zu").unwrap(), &[3.0, 4.0]);
    assert_eq!(nlp.cost().get(N, "Zl").unwrap(), &[0.0, 0.0]);
}

#[test]
fn packed_state_trajectory_covers_every_node() {
    let mut nlp = nlp();
    let x = ramp(0.0, 3 * (N + 1));
    set_field(&mut nlp, "x", None, FieldBuffer::vector(&x)).unwrap();

    for stage in 0..=N {
        assert_eq!(
            nlp.trajectory().get(stage, "x").unwrap(),
            &x[3 * stage..3 * stage + 3]
        );
    }

    set_field(&mut nlp, "init_x", Some(2), FieldBuffer::vector(&[-1.0, -1.0, -1.0])).unwrap();
    assert_eq!(nlp.trajectory().get(2, "x").unwrap(), &[-1.0; 3]);
    assert_eq!(nlp.trajectory().get(3, "x").unwrap(), &x[9..12]);
}

#[test]
fn packed_controls_and_multipliers_cover_intervals() {
    let mut nlp = nlp();
    let u = ramp(10.0, 2 * N);
    let pi = ramp(-20.0, 3 * N);
    set_field(&mut nlp, "u", None, FieldBuffer::vector(&u)).unwrap();
    set_field(&mut nlp, "init_pi", None, FieldBuffer::vector(&pi)).unwrap();

    assert_eq!(nlp.trajectory().get(N - 1, "u").unwrap(), &u[2 * (N - 1)..]);
    assert_eq!(nlp.trajectory().get(1, "pi").unwrap(), &pi[3..6]);
    assert!(nlp.trajectory().get(N, "u").unwrap().is_empty());
}

#[test]
fn integrator_guesses() {
    let mut irk = nlp_integrated_with(IntegratorVariant::Irk);
    let z = ramp(1.0, N);
    let xdot = ramp(0.5, 3 * N);
    set_field(&mut irk, "init_z", None, FieldBuffer::vector(&z)).unwrap();
    set_field(&mut irk, "xdot", None, FieldBuffer::vector(&xdot)).unwrap();

    assert_eq!(irk.guesses().get(3, "z").unwrap(), &[4.0]);
    assert_eq!(irk.guesses().get(1, "xdot").unwrap(), &xdot[3..6]);

    // GNSF outputs are packed at a stride of nphi, not nx.
    let mut gnsf = nlp_integrated_with(IntegratorVariant::Gnsf);
    let phi = ramp(0.0, 2 * N);
    set_field(&mut gnsf, "gnsf_phi", None, FieldBuffer::vector(&phi)).unwrap();
    assert_eq!(gnsf.guesses().get(2, "gnsf_phi").unwrap(), &[4.0, 5.0]);
}

#[test]
fn single_stage_multipliers_and_slacks() {
    let mut nlp = nlp();
    // 2 * (nbx + nbu + ng + nh + ns) = 2 * (3 + 2 + 2 + 1 + 2)
    let lam = ramp(0.0, 20);
    // No control bounds on the terminal stage.
    let t_e = ramp(0.0, 16);

    set_field(&mut nlp, "lam", Some(1), FieldBuffer::vector(&lam)).unwrap();
    set_field(&mut nlp, "init_t", Some(N), FieldBuffer::vector(&t_e)).unwrap();
    set_field(&mut nlp, "sl", Some(0), FieldBuffer::vector(&[0.1, 0.2])).unwrap();
    set_field(&mut nlp, "init_su", Some(N), FieldBuffer::vector(&[0.3, 0.4])).unwrap();

    assert_eq!(nlp.trajectory().get(1, "lam").unwrap(), lam.as_slice());
    assert_eq!(nlp.trajectory().get(N, "t").unwrap(), t_e.as_slice());
    assert_eq!(nlp.trajectory().get(0, "sl").unwrap(), &[0.1, 0.2]);
    assert_eq!(nlp.trajectory().get(N, "su").unwrap(), &[0.3, 0.4]);
}
