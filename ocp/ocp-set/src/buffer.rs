//! Caller-supplied numeric buffers.

use nalgebra::{DMatrix, DVector};

/// A flat numeric buffer with a declared shape.
///
/// Matrix buffers are column-major, the layout `nalgebra` stores them in.
/// Vectors are declared as `len x 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBuffer<'a> {
    values: &'a [f64],
    rows: usize,
    cols: usize,
}

impl<'a> FieldBuffer<'a> {
    /// A column vector.
    #[must_use]
    pub fn vector(values: &'a [f64]) -> Self {
        Self {
            values,
            rows: values.len(),
            cols: 1,
        }
    }

    /// A column-major `rows x cols` matrix.
    ///
    /// The shape is not checked against `values` here; the dispatcher
    /// rejects buffers whose element count disagrees with the field.
    #[must_use]
    pub fn matrix(values: &'a [f64], rows: usize, cols: usize) -> Self {
        Self { values, rows, cols }
    }

    /// A single value.
    #[must_use]
    pub fn scalar(value: &'a f64) -> Self {
        Self::vector(std::slice::from_ref(value))
    }

    /// The raw values.
    #[must_use]
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    /// Declared row count.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Declared column count.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the buffer holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> From<&'a DMatrix<f64>> for FieldBuffer<'a> {
    fn from(matrix: &'a DMatrix<f64>) -> Self {
        Self::matrix(matrix.as_slice(), matrix.nrows(), matrix.ncols())
    }
}

impl<'a> From<&'a DVector<f64>> for FieldBuffer<'a> {
    fn from(vector: &'a DVector<f64>) -> Self {
        Self::vector(vector.as_slice())
    }
}

impl<'a> From<&'a [f64]> for FieldBuffer<'a> {
    fn from(values: &'a [f64]) -> Self {
        Self::vector(values)
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for FieldBuffer<'a> {
    fn from(values: &'a [f64; N]) -> Self {
        Self::vector(values)
    }
}

impl<'a> From<&'a Vec<f64>> for FieldBuffer<'a> {
    fn from(values: &'a Vec<f64>) -> Self {
        Self::vector(values)
    }
}
