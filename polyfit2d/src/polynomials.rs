/////////////////////////////////////////////////////////////////////////////////////////////
//
// Enumerates bivariate monomials and evaluates the design matrix used for least-squares fits.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use faer::{unzip, zip, ColRef, Mat};

/// Number of monomials `x^i * y^j` with `i + j <= order`.
///
/// Saturates at `usize::MAX` for orders whose count does not fit in a `usize`,
/// so such an order never matches a real coefficient or observation count.
#[inline]
pub fn number_of_coefficients(order: usize) -> usize {
    let a = order.saturating_add(1);
    let b = order.saturating_add(2);

    // One of two consecutive integers is even, halve it before multiplying.
    if a % 2 == 0 {
        (a / 2).saturating_mul(b)
    } else {
        a.saturating_mul(b / 2)
    }
}

/// Iterates the exponent pairs `(i, j)` in column order: `i` from `0` to `order`,
/// and for each `i`, `j` from `0` to `order - i`.
///
/// This ordering indexes the coefficients everywhere, including the serialized model.
pub fn monomial_exponents(order: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..=order).flat_map(move |i| (0..=order - i).map(move |j| (i, j)))
}

/// Builds the `n x m` design matrix whose column `k` is `x1^i * x2^j` for the
/// `k`-th exponent pair of [`monomial_exponents`].
pub fn evaluate_monomials(x1: ColRef<'_, f64>, x2: ColRef<'_, f64>, order: usize) -> Mat<f64> {
    let n = x1.nrows();
    let basis_size = number_of_coefficients(order);
    let mut monomials = Mat::<f64>::zeros(n, basis_size);

    for (col, (i, j)) in monomial_exponents(order).enumerate() {
        let mut dst = monomials.col_mut(col);

        // constant column
        if i == 0 && j == 0 {
            dst.fill(1.0);
            continue;
        }

        zip!(&mut dst, &x1, &x2).for_each(|unzip!(dst, x1, x2)| {
            *dst = x1.powi(i as i32) * x2.powi(j as i32);
        });
    }

    monomials
}

/// Evaluates `sum(c_k * x^i * y^j)` at a single point.
#[inline]
pub fn evaluate_polynomial(coefficients: &[f64], order: usize, x: f64, y: f64) -> f64 {
    monomial_exponents(order)
        .zip(coefficients.iter())
        .map(|((i, j), c)| x.powi(i as i32) * y.powi(j as i32) * c)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::{col, mat, utils::approx::*, Col, Mat};

    fn run_case(x1: Col<f64>, x2: Col<f64>, order: usize, expected: Mat<f64>) {
        assert_eq!(x1.nrows(), expected.nrows(), "row mismatch in test setup");
        assert_eq!(number_of_coefficients(order), expected.ncols());

        let monomials = evaluate_monomials(x1.as_ref(), x2.as_ref(), order);

        let approx_eq = CwiseMat(ApproxEq::eps() * 128.0 * (2 as f64));
        assert!(&monomials ~ &expected);
    }

    #[test]
    fn coefficient_counts() {
        assert_eq!(number_of_coefficients(0), 1);
        assert_eq!(number_of_coefficients(1), 3);
        assert_eq!(number_of_coefficients(2), 6);
        assert_eq!(number_of_coefficients(3), 10);
    }

    #[test]
    fn coefficient_count_saturates() {
        assert_eq!(number_of_coefficients(usize::MAX), usize::MAX);
        assert_eq!(number_of_coefficients(usize::MAX - 1), usize::MAX);
    }

    #[test]
    fn exponent_order_matches_serialized_layout() {
        let exponents: Vec<_> = monomial_exponents(2).collect();
        assert_eq!(
            exponents,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (2, 0)]
        );
        assert_eq!(monomial_exponents(0).collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn monomials_constant() {
        // Basis: [1]
        let expected = mat![[1.0], [1.0]];
        run_case(col![1.0, 3.0], col![2.0, 4.0], 0, expected);
    }

    #[test]
    fn monomials_linear() {
        // Basis: [1, y, x]
        let expected = mat![[1.0, 2.0, 1.0], [1.0, 4.0, 3.0]];
        run_case(col![1.0, 3.0], col![2.0, 4.0], 1, expected);
    }

    #[test]
    fn monomials_quadratic() {
        // Basis: [1, y, y^2, x, x*y, x^2]
        let expected = mat![
            [1.0, 2.0,  4.0, 1.0,  2.0, 1.0],
            [1.0, 4.0, 16.0, 3.0, 12.0, 9.0],
        ];
        run_case(col![1.0, 3.0], col![2.0, 4.0], 2, expected);
    }

    #[test]
    fn monomials_cubic_last_column() {
        let monomials = evaluate_monomials(col![2.0, -1.0].as_ref(), col![5.0, 7.0].as_ref(), 3);
        assert_eq!(monomials.ncols(), 10);
        // (3, 0) is the final column.
        assert_eq!(monomials[(0, 9)], 8.0);
        assert_eq!(monomials[(1, 9)], -1.0);
        // (1, 2) sits after (0, *) and (1, 0), (1, 1).
        assert_eq!(monomials[(0, 6)], 2.0 * 25.0);
    }

    #[test]
    fn polynomial_matches_design_row() {
        let coefficients = [1.5, -2.0, 0.25, 3.0, 0.5, -0.75];
        let monomials = evaluate_monomials(col![1.5].as_ref(), col![-2.5].as_ref(), 2);
        let expected: f64 = (0..6).map(|k| monomials[(0, k)] * coefficients[k]).sum();

        let value = evaluate_polynomial(&coefficients, 2, 1.5, -2.5);
        assert!((value - expected).abs() < 1e-12);
    }
}
