/////////////////////////////////////////////////////////////////////////////////////////////
//
// Provides 2D benchmark surfaces for validating and demonstrating polynomial fits.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Franke's function is taken from [1]; the remaining surfaces are exact
//! low-order polynomials that a fit of sufficient order reproduces.
//!
//! # References
//! 1. Franke, R. (1979). A critical comparison of some methods for interpolation
//!    of scattered data. Naval Postgraduate School, NPS-53-79-003.
use crate::{errors::ShapeError, observations::ObservationSet};
use faer::Mat;

/// Surfaces `z = f(x, y)` evaluated on `n x 2` point matrices, returning `n x 1` values.
pub struct SurfaceTestFunctions;

impl SurfaceTestFunctions {
    /// Franke's two-dimensional test function on the unit square. Not a
    /// polynomial, so any fit leaves a residual.
    pub fn franke_2d(points: &Mat<f64>) -> Mat<f64> {
        Self::map(points, |x, y| {
            let (nx, ny) = (9.0 * x, 9.0 * y);

            let term1 = 0.75 * (-((nx - 2.0).powi(2) + (ny - 2.0).powi(2)) / 4.0).exp();
            let term2 = 0.75 * (-(nx + 1.0).powi(2) / 49.0 - (ny + 1.0).powi(2) / 10.0).exp();
            let term3 = 0.5 * (-((nx - 7.0).powi(2) + (ny - 3.0).powi(2)) / 4.0).exp();
            let term4 = -0.2 * (-(nx - 4.0).powi(2) - (ny - 7.0).powi(2)).exp();

            term1 + term2 + term3 + term4
        })
    }

    /// `1 + 2x - 3y`, exact for order 1 and above.
    pub fn plane(points: &Mat<f64>) -> Mat<f64> {
        Self::map(points, |x, y| 1.0 + 2.0 * x - 3.0 * y)
    }

    /// `x² - y² + xy`, exact for order 2 and above.
    pub fn saddle(points: &Mat<f64>) -> Mat<f64> {
        Self::map(points, |x, y| x * x - y * y + x * y)
    }

    /// `0.5 + x³ - 3xy² + y`, exact for order 3 and above.
    pub fn monkey_saddle(points: &Mat<f64>) -> Mat<f64> {
        Self::map(points, |x, y| 0.5 + x.powi(3) - 3.0 * x * y * y + y)
    }

    /// Samples `function` at `points` and packs the result as observations.
    pub fn sample(
        points: &Mat<f64>,
        function: fn(&Mat<f64>) -> Mat<f64>,
    ) -> Result<ObservationSet, ShapeError> {
        let values = function(points);
        ObservationSet::from_points(points, polyfit2d_utils::column_to_vec(values.as_ref(), 0))
    }

    fn map(points: &Mat<f64>, f: impl Fn(f64, f64) -> f64) -> Mat<f64> {
        assert_eq!(points.ncols(), 2);
        Mat::from_fn(points.nrows(), 1, |i, _| f(points[(i, 0)], points[(i, 1)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::generate_random_points, regression::PolynomialRegression2D, RegressionSettings};

    #[test]
    fn franke_reference_value() {
        let points = faer::mat![[0.0, 0.0f64]];
        let value = SurfaceTestFunctions::franke_2d(&points)[(0, 0)];

        // sum of the four exponentials at the origin
        let expected = 0.75 * (-2.0f64).exp()
            + 0.75 * (-1.0f64 / 49.0 - 0.1).exp()
            + 0.5 * (-(49.0f64 + 9.0) / 4.0).exp()
            - 0.2 * (-(16.0f64 + 49.0)).exp();
        assert!((value - expected).abs() < 1e-14);
    }

    #[test]
    fn polynomial_surfaces_are_fitted_exactly() {
        let points = generate_random_points(60, Some(11));

        let cases: [(fn(&Mat<f64>) -> Mat<f64>, usize); 3] = [
            (SurfaceTestFunctions::plane, 1),
            (SurfaceTestFunctions::saddle, 2),
            (SurfaceTestFunctions::monkey_saddle, 3),
        ];

        for (function, order) in cases {
            let observations = SurfaceTestFunctions::sample(&points, function).unwrap();
            let settings = RegressionSettings::builder().order(order).build();
            let model = PolynomialRegression2D::train(&observations, settings).unwrap();

            let score = model.score().unwrap();
            assert!(score.rmsd < 1e-9, "order {} rmsd {}", order, score.rmsd);
        }
    }

    #[test]
    fn franke_fit_improves_with_order() {
        let points = generate_random_points(200, Some(3));
        let observations = SurfaceTestFunctions::sample(&points, SurfaceTestFunctions::franke_2d).unwrap();

        let rmsd = |order: usize| {
            let settings = RegressionSettings::builder().order(order).build();
            PolynomialRegression2D::train(&observations, settings)
                .unwrap()
                .score()
                .unwrap()
                .rmsd
        };

        assert!(rmsd(4) < rmsd(1));
    }
}
