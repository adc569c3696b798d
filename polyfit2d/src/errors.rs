/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines the error taxonomy for validation, fitting and model reconstruction failures.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use std::{error::Error, fmt};

/// Convenience alias for results returned by fitting, prediction and scoring.
pub type RegressionResult<T> = std::result::Result<T, RegressionError>;

/// Identifies one of the three observation vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    X,
    Y,
    Z,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::X => write!(f, "x"),
            Variable::Y => write!(f, "y"),
            Variable::Z => write!(f, "z"),
        }
    }
}

/// Malformed, mismatched or too short input sequences.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Fewer than two observations were supplied.
    TooFewPoints { found: usize },

    /// Two sequences that must be parallel have different lengths.
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Not enough observations to determine every coefficient of the requested order.
    InsufficientPoints {
        order: usize,
        required: usize,
        found: usize,
    },

    /// A point matrix does not have exactly two columns.
    Dimension { found: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::TooFewPoints { found } => {
                write!(f, "at least 2 observations are required, got {}", found)
            }
            ShapeError::LengthMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "{} must have the same length (expected {}, found {})",
                what, expected, found
            ),
            ShapeError::InsufficientPoints {
                order,
                required,
                found,
            } => write!(
                f,
                "insufficient number of points for an order {} model: {} required, {} given",
                order, required, found
            ),
            ShapeError::Dimension { found } => {
                write!(f, "points must have 2 columns, got {}", found)
            }
        }
    }
}

impl Error for ShapeError {}

/// A serialized record could not be turned back into a model.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The `name` tag does not identify a 2D polynomial model.
    NameMismatch {
        found: String,
        expected: &'static str,
    },

    /// The coefficient list does not match the number of monomials for `order`.
    CoefficientCount {
        order: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::NameMismatch { found, expected } => write!(
                f,
                "not a {} model (found name {:?})",
                expected, found
            ),
            FormatError::CoefficientCount {
                order,
                expected,
                found,
            } => write!(
                f,
                "an order {} model has {} coefficients, record holds {}",
                order, expected, found
            ),
        }
    }
}

impl Error for FormatError {}

/// Errors raised while fitting, predicting, scoring or reconstructing a model.
///
/// Every variant is raised before any partial result is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    /// Bad input shape or not enough observations for the requested order.
    Shape(ShapeError),

    /// An observation vector is identically zero and cannot be scaled.
    DegenerateInput { variable: Variable },

    /// The singular value decomposition could not be computed.
    Numerical { reason: String },

    /// Not a valid serialized model.
    Format(FormatError),
}

impl fmt::Display for RegressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionError::Shape(e) => write!(f, "invalid input shape: {}", e),
            RegressionError::DegenerateInput { variable } => write!(
                f,
                "cannot scale {}: every value is zero",
                variable
            ),
            RegressionError::Numerical { reason } => {
                write!(f, "numerical failure: {}", reason)
            }
            RegressionError::Format(e) => write!(f, "invalid model record: {}", e),
        }
    }
}

impl Error for RegressionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RegressionError::Shape(e) => Some(e),
            RegressionError::Format(e) => Some(e),
            RegressionError::DegenerateInput { .. } | RegressionError::Numerical { .. } => None,
        }
    }
}

impl From<ShapeError> for RegressionError {
    fn from(value: ShapeError) -> Self {
        RegressionError::Shape(value)
    }
}

impl From<FormatError> for RegressionError {
    fn from(value: FormatError) -> Self {
        RegressionError::Format(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_points_is_distinct_from_bad_shape() {
        let err: RegressionError = ShapeError::InsufficientPoints {
            order: 2,
            required: 6,
            found: 4,
        }
        .into();

        assert!(matches!(
            err,
            RegressionError::Shape(ShapeError::InsufficientPoints { required: 6, .. })
        ));
        assert!(err.to_string().contains("6 required"));
        assert!(err.source().is_some());
    }

    #[test]
    fn format_error_names_expected_tag() {
        let err: RegressionError = FormatError::NameMismatch {
            found: "kernelRidge".to_string(),
            expected: "polyfit2D",
        }
        .into();

        assert_eq!(
            err.to_string(),
            "invalid model record: not a polyfit2D model (found name \"kernelRidge\")"
        );
    }

    #[test]
    fn degenerate_input_has_no_source() {
        let err = RegressionError::DegenerateInput {
            variable: Variable::Z,
        };
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "cannot scale z: every value is zero");
    }
}
