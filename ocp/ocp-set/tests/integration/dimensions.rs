//! Buffer size and shape checks.

use nalgebra::DMatrix;
use ocp_model::OcpNlp;
use ocp_set::{FieldBuffer, set_field};
use ocp_types::{OcpConfig, OcpDims, OcpError};

use crate::common::{N, nlp, ramp};

#[test]
fn vector_element_count() {
    let mut nlp = nlp();

    let err = set_field(&mut nlp, "constr_lbu", Some(0), FieldBuffer::vector(&[1.0])).unwrap_err();
    assert_eq!(
        err,
        OcpError::DimensionMismatch {
            field: "constr_lbu".to_string(),
            expected: 2,
            actual: 1,
        }
    );
    assert!(set_field(&mut nlp, "constr_lbu", Some(0), FieldBuffer::vector(&[1.0, 2.0])).is_ok());

    let err = set_field(&mut nlp, "cost_y_ref", None, FieldBuffer::vector(&[0.0; 3])).unwrap_err();
    assert!(err.is_dimension_error());
    assert!(set_field(&mut nlp, "cost_y_ref", None, FieldBuffer::vector(&[0.0; 4])).is_ok());
}

#[test]
fn terminal_sizes_differ_from_path_sizes() {
    let mut nlp = nlp();
    assert!(set_field(&mut nlp, "cost_y_ref_e", None, FieldBuffer::vector(&[0.0; 4])).is_err());
    assert!(set_field(&mut nlp, "cost_y_ref", Some(N), FieldBuffer::vector(&[0.0; 3])).is_ok());
}

#[test]
fn matrix_rows_and_columns() {
    let mut nlp = nlp();

    let vx = DMatrix::<f64>::zeros(4, 3);
    assert!(set_field(&mut nlp, "cost_Vx", Some(0), FieldBuffer::from(&vx)).is_ok());

    let wrong = DMatrix::<f64>::zeros(4, 2);
    let err = set_field(&mut nlp, "cost_Vx", Some(0), FieldBuffer::from(&wrong)).unwrap_err();
    assert!(matches!(
        err,
        OcpError::MatrixDimensionMismatch {
            expected_rows: 4,
            expected_cols: 3,
            rows: 4,
            cols: 2,
            ..
        }
    ));

    // Declared shape matches but the data is short.
    let err = set_field(&mut nlp, "constr_C", Some(0), FieldBuffer::matrix(&[0.0; 5], 2, 3))
        .unwrap_err();
    assert_eq!(
        err,
        OcpError::DimensionMismatch {
            field: "constr_C".to_string(),
            expected: 6,
            actual: 5,
        }
    );
}

#[test]
fn transposed_matrix_is_rejected() {
    let mut nlp = nlp();
    let c = DMatrix::from_fn(2, 3, |r, c| (r + 10 * c) as f64);
    let ct = c.transpose();

    let err = set_field(&mut nlp, "constr_C", Some(1), FieldBuffer::from(&ct)).unwrap_err();
    assert!(matches!(err, OcpError::MatrixDimensionMismatch { rows: 3, cols: 2, .. }));
    assert_eq!(nlp.constraints().stage(1).unwrap().c, DMatrix::zeros(2, 3));

    assert!(set_field(&mut nlp, "constr_C", Some(1), FieldBuffer::from(&c)).is_ok());
}

#[test]
fn flat_vector_is_not_a_matrix() {
    let mut nlp = nlp();
    let err = set_field(&mut nlp, "cost_W", Some(0), FieldBuffer::vector(&[0.0; 16])).unwrap_err();
    assert!(matches!(err, OcpError::MatrixDimensionMismatch { rows: 16, cols: 1, .. }));
}

#[test]
fn empty_matrix_accepts_any_declared_shape() {
    let mut nlp = nlp();
    // No general constraints and no residuals: C and Vu are zero-sized.
    let dims = OcpDims::new(2, 2, 1);
    let mut small = OcpNlp::new(OcpConfig::linear_ls(dims)).unwrap();
    assert!(set_field(&mut small, "constr_C", None, FieldBuffer::matrix(&[], 0, 0)).is_ok());
    assert!(set_field(&mut small, "cost_Vu", Some(1), FieldBuffer::matrix(&[], 3, 7)).is_ok());

    assert!(set_field(&mut nlp, "constr_D", Some(0), FieldBuffer::matrix(&[], 0, 0)).is_err());
}

#[test]
fn packed_total_must_match() {
    let mut nlp = nlp();
    let short = ramp(0.0, 3 * (N + 1) - 1);
    let err = set_field(&mut nlp, "x", None, FieldBuffer::vector(&short)).unwrap_err();
    assert_eq!(
        err,
        OcpError::DimensionMismatch {
            field: "x".to_string(),
            expected: 15,
            actual: 14,
        }
    );

    // A single stage takes one stage's worth.
    let err = set_field(&mut nlp, "u", Some(0), FieldBuffer::vector(&ramp(0.0, 2 * N))).unwrap_err();
    assert!(err.is_dimension_error());
}
