/////////////////////////////////////////////////////////////////////////////////////////////
//
// Computes goodness-of-fit statistics between predicted and observed values.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::errors::ShapeError;
use serde::{Deserialize, Deserializer, Serialize};

/// Goodness-of-fit statistics of a set of predictions.
///
/// - `r`: Pearson correlation coefficient between predictions and targets.
/// - `r2`: `r * r`.
/// - `chi2`: `Σ (t - p)² / t` over every target `t != 0`.
/// - `rmsd`: root-mean-square deviation `sqrt(Σ (t - p)² / n)`.
///
/// `r` (and `r2`) is `NaN` when the predictions or the targets are constant.
/// Non-finite fields are written as JSON `null` and read back as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionScore {
    #[serde(deserialize_with = "null_as_nan")]
    pub r: f64,
    #[serde(deserialize_with = "null_as_nan")]
    pub r2: f64,
    #[serde(deserialize_with = "null_as_nan")]
    pub chi2: f64,
    #[serde(deserialize_with = "null_as_nan")]
    pub rmsd: f64,
}

fn null_as_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Scores `predicted` against `truth`.
///
/// Both slices must have the same non-zero length. Neither is modified.
///
/// # Example
/// ```
/// use polyfit2d::compute_score;
///
/// let score = compute_score(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0])?;
/// assert_eq!(score.rmsd, 0.0);
/// assert!((score.r - 1.0).abs() < 1e-12);
/// # Ok::<(), polyfit2d::ShapeError>(())
/// ```
pub fn compute_score(predicted: &[f64], truth: &[f64]) -> Result<RegressionScore, ShapeError> {
    if predicted.len() != truth.len() {
        return Err(ShapeError::LengthMismatch {
            what: "predictions and targets",
            expected: truth.len(),
            found: predicted.len(),
        });
    }

    if truth.is_empty() {
        return Err(ShapeError::TooFewPoints { found: 0 });
    }

    let mut p_sum = 0.0;
    let mut t_sum = 0.0;
    let mut p_squared = 0.0;
    let mut t_squared = 0.0;
    let mut pt = 0.0;
    let mut chi2 = 0.0;
    let mut squared_error = 0.0;

    for (&p, &t) in predicted.iter().zip(truth.iter()) {
        p_sum += p;
        t_sum += t;
        p_squared += p * p;
        t_squared += t * t;
        pt += p * t;

        let residual = t - p;
        if t != 0.0 {
            chi2 += residual * residual / t;
        }
        squared_error += residual * residual;
    }

    let n = truth.len() as f64;
    let r = (n * pt - p_sum * t_sum)
        / ((n * p_squared - p_sum * p_sum) * (n * t_squared - t_sum * t_sum)).sqrt();

    Ok(RegressionScore {
        r,
        r2: r * r,
        chi2,
        rmsd: (squared_error / n).sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_linear_relationship() {
        let truth = [1.0, 2.0, 3.0, 4.0];
        let predicted = [2.0, 4.0, 6.0, 8.0];

        let score = compute_score(&predicted, &truth).unwrap();

        assert!((score.r - 1.0).abs() < 1e-12);
        assert!((score.r2 - 1.0).abs() < 1e-12);
        // chi2 = Σ t² / t = Σ t
        assert!((score.chi2 - 10.0).abs() < 1e-12);
        // rmsd = sqrt((1 + 4 + 9 + 16) / 4)
        assert!((score.rmsd - 7.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn zero_targets_are_skipped_in_chi2() {
        let truth = [0.0, 2.0];
        let predicted = [1.0, 1.0];

        let score = compute_score(&predicted, &truth).unwrap();

        assert_eq!(score.chi2, 0.5);
        assert_eq!(score.rmsd, 1.0);
    }

    #[test]
    fn constant_predictions_give_nan_correlation() {
        let score = compute_score(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!(score.r.is_nan());
        assert!(score.r2.is_nan());
        assert!(score.rmsd.is_finite());
    }

    #[test]
    fn anti_correlated() {
        let score = compute_score(&[3.0, 2.0, 1.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!((score.r + 1.0).abs() < 1e-12);
        assert!((score.r2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn shape_errors() {
        assert_eq!(
            compute_score(&[1.0], &[1.0, 2.0]),
            Err(ShapeError::LengthMismatch {
                what: "predictions and targets",
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            compute_score(&[], &[]),
            Err(ShapeError::TooFewPoints { found: 0 })
        );
    }

    #[test]
    fn nan_fields_survive_json() {
        let score = compute_score(&[5.0, 5.0], &[1.0, 2.0]).unwrap();
        let json = serde_json::to_string(&score).unwrap();
        assert!(json.contains("\"r\":null"));

        let back: RegressionScore = serde_json::from_str(&json).unwrap();
        assert!(back.r.is_nan());
        assert_eq!(back.rmsd, score.rmsd);
        assert_eq!(back.chi2, score.chi2);
    }
}
