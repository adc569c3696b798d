/////////////////////////////////////////////////////////////////////////////////////////////
//
// Computes max-abs scale factors for conditioning and maps coefficients back to data units.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    errors::{RegressionError, Variable},
    observations::ObservationSet,
    polynomials,
};
use faer::Mat;
use polyfit2d_utils;

/// Per-variable scale factors `1 / max(|v|)` used only while training.
///
/// Scaling maps every observation vector into `[-1, 1]`, which keeps the
/// monomial columns of the design matrix within a comparable range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ScaleFactors {
    /// Computes the scale factors of an observation set.
    ///
    /// Fails with [`RegressionError::DegenerateInput`] if a vector is all zeros,
    /// since its scale factor would be infinite.
    pub fn from_observations(observations: &ObservationSet) -> Result<Self, RegressionError> {
        Ok(Self {
            x: scale_factor(observations.x(), Variable::X)?,
            y: scale_factor(observations.y(), Variable::Y)?,
            z: scale_factor(observations.z(), Variable::Z)?,
        })
    }

    /// Returns the scaled `(x, y, z)` vectors as `n x 1` columns.
    pub fn apply(&self, observations: &ObservationSet) -> (Mat<f64>, Mat<f64>, Mat<f64>) {
        let n = observations.len();
        let x = observations.x();
        let y = observations.y();
        let z = observations.z();

        (
            Mat::from_fn(n, 1, |i, _| x[i] * self.x),
            Mat::from_fn(n, 1, |i, _| y[i] * self.y),
            Mat::from_fn(n, 1, |i, _| z[i] * self.z),
        )
    }

    /// Maps coefficients solved in scaled units back to data units:
    /// `c(i, j) * sx^i * sy^j / sz`.
    pub fn unscale_coefficients(&self, raw_coefficients: &Mat<f64>, order: usize) -> Vec<f64> {
        polynomials::monomial_exponents(order)
            .enumerate()
            .map(|(col, (i, j))| {
                raw_coefficients[(col, 0)] * self.x.powi(i as i32) * self.y.powi(j as i32)
                    / self.z
            })
            .collect()
    }
}

fn scale_factor(values: &[f64], variable: Variable) -> Result<f64, RegressionError> {
    let max_abs = polyfit2d_utils::max_abs(values);
    if max_abs == 0.0 {
        return Err(RegressionError::DegenerateInput { variable });
    }
    Ok(1.0 / max_abs)
}
