/////////////////////////////////////////////////////////////////////////////////////////////
//
// Specifies polynomial order and evaluation options for configuring 2D regressions.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Specifies polynomial order and evaluation options for configuring 2D regressions.
use crate::polynomials;

/// Default total order of the fitted polynomial.
pub const DEFAULT_ORDER: usize = 2;

/// Default batch size from which predictions are evaluated in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// A convenience builder for constructing a [`RegressionSettings`] instance.
///
/// The builder should be called via the [`RegressionSettings::builder`] method.
///
/// See [`RegressionSettings`] for details on each field.
#[derive(Debug, Clone, Copy)]
pub struct RegressionSettingsBuilder {
    pub order: usize,
    pub parallel_threshold: usize,
}

impl RegressionSettingsBuilder {
    /// Creates a new instance of the [`RegressionSettingsBuilder`].
    fn new() -> Self {
        Self {
            order: DEFAULT_ORDER,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Sets the total order of the polynomial.
    pub fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Sets the batch size from which predictions run in parallel.
    pub fn parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Builds and returns an instance of [`RegressionSettings`] from the values
    /// defined in the builder.
    pub fn build(self) -> RegressionSettings {
        RegressionSettings {
            order: self.order,
            parallel_threshold: self.parallel_threshold,
        }
    }
}

/// Options controlling how a [`crate::PolynomialRegression2D`] is fitted and evaluated.
///
/// ### Default Values
/// - `order`: `2`
/// - `parallel_threshold`: `4096`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegressionSettings {
    /// Total order of the polynomial. The model holds one coefficient for every
    /// monomial `x^i * y^j` with `i + j <= order`.
    pub order: usize,

    /// Batches with at least this many points are predicted in parallel.
    /// Results keep the input order either way.
    pub parallel_threshold: usize,
}

impl RegressionSettings {
    /// Returns a new [`RegressionSettingsBuilder`] with default values.
    pub fn builder() -> RegressionSettingsBuilder {
        RegressionSettingsBuilder::new()
    }

    /// Number of coefficients, and so the minimum number of observations,
    /// for the configured order.
    pub fn basis_size(&self) -> usize {
        polynomials::number_of_coefficients(self.order)
    }
}

impl Default for RegressionSettings {
    fn default() -> Self {
        RegressionSettings::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = RegressionSettings::default();
        assert_eq!(settings.order, 2);
        assert_eq!(settings.parallel_threshold, 4096);
        assert_eq!(settings.basis_size(), 6);
    }

    #[test]
    fn builder_overrides() {
        let settings = RegressionSettings::builder()
            .order(4)
            .parallel_threshold(10)
            .build();
        assert_eq!(settings.basis_size(), 15);
        assert_eq!(settings.parallel_threshold, 10);
    }
}
