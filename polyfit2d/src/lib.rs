/////////////////////////////////////////////////////////////////////////////////////////////
//
// Exposes the public API and high-level documentation for 2D polynomial regression.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Least-squares polynomial surfaces in two variables.
//!
//! Fits `z = Σ c(i, j) · x^i · y^j` over every monomial with `i + j <= order`
//! to scattered `(x, y, z)` observations. The fit:
//!
//! 1. validates the observations and checks there are at least as many points
//!    as coefficients,
//! 2. scales `x`, `y` and `z` by the reciprocal of their largest magnitude,
//! 3. builds the design matrix of monomials,
//! 4. solves the least-squares system through an SVD pseudo-inverse, dropping
//!    singular values below `1e-15`,
//! 5. maps the coefficients back to data units and scores the fit.
//!
//! Rank-deficient data (for instance points on a line) yields the minimum-norm
//! solution rather than an error.
//!
//! Fitted models can be predicted at single points or in batches (in parallel
//! for large batches), scored against held-out data, rendered as formulas and
//! saved to JSON.
//!
//! Check out the examples directory in the repository for more examples of usage.
//!
//! # Features
//! - Any total order, from a constant (`order = 0`) upwards
//! - Goodness-of-fit statistics: Pearson `r`, `r²`, `χ²` and RMSD
//! - Plain-text and LaTeX formula rendering
//! - JSON persistence tagged `"polyfit2D"` with bit-exact round trips
//! - Built on [`faer`](https://docs.rs/faer/latest/faer/) for linear algebra
//!
//! # Examples
//!
//! ```
//! use polyfit2d::{
//!     generate_random_points, PolynomialRegression2D,
//!     RegressionSettings, SurfaceTestFunctions,
//! };
//!
//! // Sample Franke's function at random points in the unit square
//! let points = generate_random_points(200, Some(42));
//! let observations = SurfaceTestFunctions::sample(&points, SurfaceTestFunctions::franke_2d)?;
//!
//! // Fit a quartic surface
//! let settings = RegressionSettings::builder().order(4).build();
//! let model = PolynomialRegression2D::train(&observations, settings)?;
//! assert_eq!(model.coefficients().len(), 15);
//!
//! // Predict and check the fit statistics
//! let z = model.predict(0.5, 0.5);
//! assert!(z.is_finite());
//! assert!(model.score().unwrap().r2 > 0.5);
//!
//! // Round-trip through the serialized record
//! let restored = PolynomialRegression2D::from_record(model.to_record())?;
//! assert_eq!(restored.predict(0.5, 0.5), z);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # References
//! 1.  Golub, G. H., Van Loan, C. F. Matrix Computations, 4th ed. Johns Hopkins
//!     University Press, 2013.
//! 2.  Press, W. H., Teukolsky, S. A., Vetterling, W. T., Flannery, B. P.
//!     Numerical Recipes, 3rd ed., §15.4. Cambridge University Press, 2007.
pub mod regression_config;

mod common;

mod errors;

mod formula;

mod linalg;

mod observations;

mod polynomials;

mod regression;

mod scaling;

mod score;

pub mod progress;

mod test_functions;

pub use {
    common::{
        create_evaluation_grid, csv_to_observations, generate_random_points,
        predictions_to_csv,
    },
    errors::{FormatError, RegressionError, RegressionResult, ShapeError, Variable},
    formula::{to_formula, to_precision, FormulaStyle},
    linalg::{svd_least_squares, FactorizationError, LeastSquaresSolution},
    observations::{check_array_length, ObservationSet},
    polynomials::{evaluate_monomials, monomial_exponents, number_of_coefficients},
    regression::{
        ModelIOError, ModelRecord, PolynomialRegression2D, PolynomialRegression2DBuilder,
        Prediction, PredictionInput, MODEL_NAME,
    },
    regression_config::RegressionSettings,
    scaling::ScaleFactors,
    score::{compute_score, RegressionScore},
    test_functions::SurfaceTestFunctions,
};
