/////////////////////////////////////////////////////////////////////////////////////////////
//
// Adds the SVD-based pseudo-inverse least-squares solve used to fit polynomial coefficients.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # linalg
//!
//! Least-squares solve through the Moore-Penrose pseudo-inverse.
//!
//! The design matrix `A` (`n x m`, `n >= m`) is decomposed as a thin SVD of its
//! transpose, `Aᵗ = U Σ Vᵗ`, so that `A⁺ = U Σ⁺ Vᵗ`. Singular values below the
//! cutoff are dropped instead of inverted, which truncates the rank of a
//! degenerate system and yields the minimum-norm solution.
//!
//! # References
//! 1. Golub, G. H., Van Loan, C. F. Matrix Computations, 4th ed., §5.5. 2013.

use crate::errors::RegressionError;
use faer::Mat;
use std::fmt;

/// Singular values below this are never inverted.
pub(crate) const SINGULAR_VALUE_CUTOFF: f64 = 1e-15;

#[derive(Debug, Clone, PartialEq)]
pub enum FactorizationError {
    NonFinite,       // NaN or infinite entry in the system
    NoConvergence,   // SVD iteration failed
    RowMismatch { design_rows: usize, rhs_rows: usize },
}

impl fmt::Display for FactorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorizationError::NonFinite => {
                write!(f, "the least-squares system contains non-finite values")
            }
            FactorizationError::NoConvergence => {
                write!(f, "the singular value decomposition did not converge")
            }
            FactorizationError::RowMismatch {
                design_rows,
                rhs_rows,
            } => write!(
                f,
                "design matrix has {} rows but the right-hand side has {}",
                design_rows, rhs_rows
            ),
        }
    }
}

impl From<FactorizationError> for RegressionError {
    fn from(value: FactorizationError) -> Self {
        RegressionError::Numerical {
            reason: value.to_string(),
        }
    }
}

/// Result of a pseudo-inverse solve.
#[derive(Debug, Clone)]
pub struct LeastSquaresSolution {
    /// `m x k` solution, one column per right-hand side.
    pub coefficients: Mat<f64>,

    /// Number of singular values that were inverted.
    pub rank: usize,
}

/// Solves `min ‖A x - b‖₂` with the SVD pseudo-inverse of `A`.
///
/// Every singular value at or above [`SINGULAR_VALUE_CUTOFF`] is inverted; the
/// rest are dropped. Returns the minimum-norm solution when `A` is rank deficient.
///
/// # Errors
/// - [`FactorizationError::RowMismatch`] if `A` and `b` have different row counts.
/// - [`FactorizationError::NonFinite`] if `A` or `b` contains `NaN` or infinity.
/// - [`FactorizationError::NoConvergence`] if the decomposition fails.
#[allow(non_snake_case)]
pub fn svd_least_squares(
    A: &Mat<f64>,
    b: &Mat<f64>,
) -> Result<LeastSquaresSolution, FactorizationError> {
    if A.nrows() != b.nrows() {
        return Err(FactorizationError::RowMismatch {
            design_rows: A.nrows(),
            rhs_rows: b.nrows(),
        });
    }

    if !all_finite(A) || !all_finite(b) {
        return Err(FactorizationError::NonFinite);
    }

    // Decompose Aᵗ (m x n): U is m x k, V is n x k with k = min(m, n).
    let At = A.transpose().to_owned();
    let svd = At
        .thin_svd()
        .map_err(|_| FactorizationError::NoConvergence)?;

    let U = svd.U();
    let V = svd.V();
    let sigma: Vec<f64> = svd.S().column_vector().iter().cloned().collect();
    let k = sigma.len();

    // Square pseudo-inverse diagonal: reciprocals of the retained singular values.
    let sigma_pinv = Mat::<f64>::from_fn(k, k, |i, j| {
        if i == j && sigma[i] >= SINGULAR_VALUE_CUTOFF {
            1.0 / sigma[i]
        } else {
            0.0
        }
    });

    let rank = sigma.iter().filter(|s| **s >= SINGULAR_VALUE_CUTOFF).count();

    // x = U Σ⁺ᵗ Vᵗ b, evaluated right to left to keep intermediates k x 1.
    let projected = V.transpose() * b;
    let weighted = sigma_pinv.transpose() * &projected;
    let coefficients = U * &weighted;

    Ok(LeastSquaresSolution { coefficients, rank })
}

fn all_finite(matrix: &Mat<f64>) -> bool {
    matrix
        .col_iter()
        .all(|col| col.iter().all(|value| value.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::{linalg::solvers::Solve, mat, utils::approx::*};

    #[test]
    fn square_system_matches_lu_solve() {
        let a = mat![[4.0, 1.0, 0.5], [1.0, 3.0, -1.0], [0.5, -1.0, 2.0f64],];
        let b = mat![[1.0], [2.0], [3.0f64]];

        let solution = svd_least_squares(&a, &b).unwrap();
        let x_lu = a.full_piv_lu().solve(&b);

        let approx_eq = CwiseMat(ApproxEq::eps() * 128.0 * (3 as f64));
        assert!(&solution.coefficients ~ &x_lu);
        assert_eq!(solution.rank, 3);
    }

    #[test]
    fn overdetermined_residual_is_orthogonal_to_columns() {
        let a = Mat::<f64>::from_fn(12, 3, |i, j| {
            let t = i as f64 / 11.0;
            t.powi(j as i32)
        });
        let b = Mat::<f64>::from_fn(12, 1, |i, _| ((i as f64) * 0.7).sin());

        let solution = svd_least_squares(&a, &b).unwrap();
        let residual = &(&a * &solution.coefficients) - &b;
        let normal = a.transpose() * &residual;

        for i in 0..3 {
            assert!(normal[(i, 0)].abs() < 1e-12);
        }
    }

    #[test]
    fn duplicated_columns_give_minimum_norm_solution() {
        // Columns 1 and 2 are identical; b = 2 * col1.
        let a = mat![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0f64],];
        let b = mat![[2.0], [4.0], [6.0f64]];

        let solution = svd_least_squares(&a, &b).unwrap();

        assert_eq!(solution.rank, 1);
        assert!((solution.coefficients[(0, 0)] - 1.0).abs() < 1e-12);
        assert!((solution.coefficients[(1, 0)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_matrix_gives_zero_solution() {
        let a = Mat::<f64>::zeros(4, 2);
        let b = mat![[1.0], [2.0], [3.0], [4.0f64]];

        let solution = svd_least_squares(&a, &b).unwrap();

        assert_eq!(solution.rank, 0);
        assert_eq!(solution.coefficients, Mat::<f64>::zeros(2, 1));
    }

    #[test]
    fn non_finite_entries_are_rejected() {
        let a = mat![[1.0, f64::NAN], [2.0, 1.0f64]];
        let b = mat![[1.0], [2.0f64]];
        assert_eq!(
            svd_least_squares(&a, &b).unwrap_err(),
            FactorizationError::NonFinite
        );

        let a = mat![[1.0, 0.0], [0.0, 1.0f64]];
        let b = mat![[f64::INFINITY], [2.0f64]];
        assert_eq!(
            svd_least_squares(&a, &b).unwrap_err(),
            FactorizationError::NonFinite
        );
    }

    #[test]
    fn small_singular_values_above_cutoff_are_inverted() {
        // σ = [10, 2e-15]: the second value sits above the fixed cutoff even
        // though it is tiny next to σ_max.
        let a = mat![[10.0, 0.0], [0.0, 2e-15], [0.0, 0.0f64]];
        let b = mat![[1.0], [2e-15], [0.0f64]];

        let solution = svd_least_squares(&a, &b).unwrap();

        assert_eq!(solution.rank, 2);
        assert!((solution.coefficients[(0, 0)] - 0.1).abs() < 1e-12);
        assert!((solution.coefficients[(1, 0)] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn singular_values_below_cutoff_are_dropped() {
        let a = mat![[10.0, 0.0], [0.0, 5e-16], [0.0, 0.0f64]];
        let b = mat![[1.0], [5e-16], [0.0f64]];

        let solution = svd_least_squares(&a, &b).unwrap();

        assert_eq!(solution.rank, 1);
        assert!((solution.coefficients[(0, 0)] - 0.1).abs() < 1e-12);
        assert!(solution.coefficients[(1, 0)].abs() < 1e-12);
    }

    #[test]
    fn row_mismatch_is_an_error() {
        let a = Mat::<f64>::zeros(3, 2);
        let b = Mat::<f64>::zeros(2, 1);
        assert_eq!(
            svd_least_squares(&a, &b).unwrap_err(),
            FactorizationError::RowMismatch {
                design_rows: 3,
                rhs_rows: 2
            }
        );
    }
}
