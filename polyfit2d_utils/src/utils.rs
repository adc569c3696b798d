/////////////////////////////////////////////////////////////////////////////////////////////
//
// Supplies general-purpose slice utilities for selection, ranges and magnitude scaling.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use faer::{Mat, MatRef};

/// Returns an owned `Vec<T>` from a subset of indices.
///
/// # Examples
///
/// ```
/// use polyfit2d_utils::select_indices;
///
/// let values = vec![0.0, 1.0, 2.0, 3.0f64];
///
/// let wanted = vec![0usize, 2];
///
/// assert_eq!(select_indices(&values, &wanted), vec![0.0, 2.0]);
/// ```
#[inline(always)]
pub fn select_indices<T>(values: &[T], indices: &[usize]) -> Vec<T>
where
    T: Clone,
{
    indices.iter().map(|&i| values[i].clone()).collect()
}

/// Returns the largest absolute value in a slice.
///
/// `NaN` entries are skipped. An empty slice returns `0.0`.
///
/// # Examples
///
/// ```
/// use polyfit2d_utils::max_abs;
///
/// assert_eq!(max_abs(&[1.0, -4.0, 3.0]), 4.0);
/// assert_eq!(max_abs(&[]), 0.0);
/// ```
#[inline(always)]
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
}

/// Returns the `(min, max)` range of a slice.
///
/// # Examples
///
/// ```
/// use polyfit2d_utils::get_value_range;
///
/// let range = get_value_range(&[3.0, -1.0, 0.5]);
/// assert_eq!(range, (-1.0, 3.0));
/// ```
#[inline(always)]
pub fn get_value_range(values: &[f64]) -> (f64, f64) {
    values.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), &v| (min.min(v), max.max(v)),
    )
}

/// Builds an `n x 2` point matrix from two coordinate slices of equal length.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use polyfit2d_utils::columns_to_points;
///
/// let points = columns_to_points(&[1.0, 2.0], &[3.0, 4.0]);
///
/// assert_eq!(points, mat![[1.0, 3.0], [2.0, 4.0f64]]);
/// ```
#[inline(always)]
pub fn columns_to_points(x: &[f64], y: &[f64]) -> Mat<f64> {
    assert_eq!(x.len(), y.len(), "coordinate columns must have the same length");
    Mat::from_fn(x.len(), 2, |i, j| if j == 0 { x[i] } else { y[i] })
}

/// Copies one column of a matrix into a `Vec`.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use polyfit2d_utils::column_to_vec;
///
/// let points = mat![[1.0, 3.0], [2.0, 4.0f64]];
///
/// assert_eq!(column_to_vec(points.as_ref(), 1), vec![3.0, 4.0]);
/// ```
#[inline(always)]
pub fn column_to_vec(matrix: MatRef<'_, f64>, col: usize) -> Vec<f64> {
    matrix.col(col).iter().copied().collect()
}
