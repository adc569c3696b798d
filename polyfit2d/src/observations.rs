/////////////////////////////////////////////////////////////////////////////////////////////
//
// Holds scattered (x, y, z) observations and validates their shape before fitting.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::errors::ShapeError;
use faer::Mat;
use polyfit2d_utils;

/// Checks that `x`, `y` and `z` are parallel sequences of at least two values.
///
/// The checks run in a fixed order: too few points, then `x`/`y` length
/// mismatch, then inputs/outputs length mismatch.
pub fn check_array_length(x: &[f64], y: &[f64], z: &[f64]) -> Result<(), ShapeError> {
    if x.len() < 2 {
        return Err(ShapeError::TooFewPoints { found: x.len() });
    }

    if x.len() != y.len() {
        return Err(ShapeError::LengthMismatch {
            what: "x and y",
            expected: x.len(),
            found: y.len(),
        });
    }

    if x.len() != z.len() {
        return Err(ShapeError::LengthMismatch {
            what: "inputs and outputs",
            expected: x.len(),
            found: z.len(),
        });
    }

    Ok(())
}

/// A validated set of scattered observations `z = f(x, y)`.
///
/// The three sequences are parallel: entry `i` of each describes the same sample.
/// Construction always goes through [`check_array_length`], so an
/// `ObservationSet` holds at least two samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl ObservationSet {
    /// Creates an observation set from separate coordinate and value sequences.
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self, ShapeError> {
        check_array_length(&x, &y, &z)?;
        Ok(Self { x, y, z })
    }

    /// Creates an observation set from `(x, y)` pairs and their values.
    ///
    /// # Example
    /// ```
    /// use polyfit2d::ObservationSet;
    ///
    /// let obs = ObservationSet::from_pairs(&[(0.0, 1.0), (2.0, 3.0)], vec![4.0, 5.0])?;
    /// assert_eq!(obs.y(), &[1.0, 3.0]);
    /// # Ok::<(), polyfit2d::ShapeError>(())
    /// ```
    pub fn from_pairs(pairs: &[(f64, f64)], z: Vec<f64>) -> Result<Self, ShapeError> {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();
        Self::new(x, y, z)
    }

    /// Creates an observation set from an `n x 2` point matrix and its values.
    pub fn from_points(points: &Mat<f64>, z: Vec<f64>) -> Result<Self, ShapeError> {
        if points.ncols() != 2 {
            return Err(ShapeError::Dimension {
                found: points.ncols(),
            });
        }

        Self::new(
            polyfit2d_utils::column_to_vec(points.as_ref(), 0),
            polyfit2d_utils::column_to_vec(points.as_ref(), 1),
            z,
        )
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.z.len()
    }

    /// Returns `true` if there are no observations.
    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    /// Returns the observation coordinates as an `n x 2` matrix.
    pub fn points(&self) -> Mat<f64> {
        polyfit2d_utils::columns_to_points(&self.x, &self.y)
    }

    /// Bounding box of the observation coordinates as `[xmin, ymin, xmax, ymax]`.
    pub fn extents(&self) -> Vec<f64> {
        let (xmin, xmax) = polyfit2d_utils::get_value_range(&self.x);
        let (ymin, ymax) = polyfit2d_utils::get_value_range(&self.y);
        vec![xmin, ymin, xmax, ymax]
    }

    /// Returns a new observation set holding only the given rows, e.g. for a
    /// held-out split.
    pub fn select(&self, indices: &[usize]) -> Result<Self, ShapeError> {
        Self::new(
            polyfit2d_utils::select_indices(&self.x, indices),
            polyfit2d_utils::select_indices(&self.y, indices),
            polyfit2d_utils::select_indices(&self.z, indices),
        )
    }
}
