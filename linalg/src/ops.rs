use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};

use crate::{LinalgErr, Result};

/// Matrices with at least this many rows are multiplied against vectors in parallel.
const PAR_ROWS_THRESHOLD: usize = 1024;

/// Computes the matrix-vector product, one dot product per row of `matrix`.
///
/// Every row is reduced in the same order regardless of whether the rows are spread over
/// threads, so the result doesn't depend on the size of the matrix.
///
/// # Arguments
/// * `matrix` - A `rows x cols` matrix.
/// * `vector` - A vector of length `cols`.
///
/// # Returns
/// A vector of length `rows`, or `DimensionMismatch` if the vector length isn't `cols`.
pub fn dot(matrix: ArrayView2<f64>, vector: ArrayView1<f64>) -> Result<Array1<f64>> {
    ensure_rows("dot", matrix)?;
    ensure_dim("dot", vector.len(), matrix.ncols())?;

    let rows = Zip::from(matrix.rows());
    let out = if matrix.nrows() >= PAR_ROWS_THRESHOLD {
        rows.par_map_collect(|row| row.dot(&vector))
    } else {
        rows.map_collect(|row| row.dot(&vector))
    };

    Ok(out)
}

/// Subtracts `b` from `a` element-wise.
///
/// # Returns
/// A new vector, or `DimensionMismatch` if the lengths differ.
pub fn subtract(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<Array1<f64>> {
    ensure_dim("subtract", b.len(), a.len())?;
    Ok(&a - &b)
}

/// Returns a row-major copy of `matrix` with its rows and columns swapped.
pub fn transpose(matrix: ArrayView2<f64>) -> Result<Array2<f64>> {
    ensure_rows("transpose", matrix)?;
    Ok(matrix.t().as_standard_layout().into_owned())
}

/// Standard matrix product of an `m x k` and a `k x n` matrix.
///
/// # Returns
/// The `m x n` product, or `DimensionMismatch` if the inner dimensions differ.
pub fn matmul(a: ArrayView2<f64>, b: ArrayView2<f64>) -> Result<Array2<f64>> {
    ensure_rows("matmul", a)?;
    ensure_dim("matmul", b.nrows(), a.ncols())?;
    Ok(a.dot(&b))
}

/// Reshapes a vector of length `n` into an `n x 1` matrix.
pub fn expand_to_column(vector: ArrayView1<f64>) -> Array2<f64> {
    vector.to_owned().insert_axis(Axis(1))
}

/// Concatenates the rows of `matrix` into a single vector of length `rows * cols`.
pub fn flatten(matrix: ArrayView2<f64>) -> Array1<f64> {
    matrix.iter().copied().collect()
}

/// Multiplies every element of `vector` by `scalar`, leaving the input untouched.
pub fn scale(vector: ArrayView1<f64>, scalar: f64) -> Array1<f64> {
    vector.mapv(|v| v * scalar)
}

/// Builds a matrix out of rows of equal length.
///
/// # Returns
/// `DimensionMismatch` for the first row whose length differs from the first one.
pub fn from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let cols = rows.first().map_or(0, Vec::len);

    for row in rows {
        ensure_dim("from_rows", row.len(), cols)?;
    }

    Ok(Array2::from_shape_fn((rows.len(), cols), |(r, c)| rows[r][c]))
}

fn ensure_dim(op: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(LinalgErr::DimensionMismatch { op, got, expected });
    }

    Ok(())
}

fn ensure_rows(op: &'static str, matrix: ArrayView2<f64>) -> Result<()> {
    if matrix.nrows() == 0 {
        return Err(LinalgErr::Empty { op });
    }

    Ok(())
}
