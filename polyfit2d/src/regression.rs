/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the 2D polynomial regression model, its training, prediction and persistence.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    errors::{FormatError, RegressionError, RegressionResult, ShapeError},
    formula::{self, FormulaStyle},
    linalg,
    observations::ObservationSet,
    polynomials,
    progress::{self, ProgressMsg, ProgressSink},
    regression_config::{RegressionSettings, DEFAULT_PARALLEL_THRESHOLD},
    scaling::ScaleFactors,
    score::{compute_score, RegressionScore},
};

use faer::Mat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

/// Name tag identifying a serialized 2D polynomial model.
pub const MODEL_NAME: &str = "polyfit2D";

/// Plain serialized form of a [`PolynomialRegression2D`].
///
/// Coefficients are listed in the order of
/// [`monomial_exponents`](crate::monomial_exponents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub name: String,
    pub order: usize,
    pub coefficients: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<RegressionScore>,
}

/// Input to [`PolynomialRegression2D::predict_input`].
#[derive(Debug, Clone, Copy)]
pub enum PredictionInput<'a> {
    /// A single `(x, y)` location.
    Point(f64, f64),

    /// Parallel `x` and `y` coordinate slices.
    Batch(&'a [f64], &'a [f64]),
}

/// Output of [`PolynomialRegression2D::predict_input`], matching the input variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Value(f64),
    Values(Vec<f64>),
}

/// A convenience builder for training a [`PolynomialRegression2D`].
///
/// The builder should be called via the [`PolynomialRegression2D::builder`] method.
pub struct PolynomialRegression2DBuilder {
    observations: ObservationSet,
    settings: RegressionSettings,
    progress_callback: Option<Arc<dyn ProgressSink>>,
}

impl PolynomialRegression2DBuilder {
    fn new(observations: ObservationSet) -> Self {
        Self {
            observations,
            settings: RegressionSettings::default(),
            progress_callback: None,
        }
    }

    /// Sets the total order of the polynomial.
    pub fn order(mut self, order: usize) -> Self {
        self.settings.order = order;
        self
    }

    /// Sets the batch size from which predictions run in parallel.
    pub fn parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.settings.parallel_threshold = parallel_threshold;
        self
    }

    /// Replaces every setting at once.
    pub fn settings(mut self, settings: RegressionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Optional callback for reporting training progress.
    pub fn progress_callback(mut self, progress_callback: Arc<dyn ProgressSink>) -> Self {
        self.progress_callback = Some(progress_callback);
        self
    }

    /// Trains and returns the configured [`PolynomialRegression2D`].
    pub fn build(self) -> RegressionResult<PolynomialRegression2D> {
        PolynomialRegression2D::fit(&self.observations, self.settings, self.progress_callback)
    }
}

/// A fitted polynomial surface `z = Σ c(i, j) · x^i · y^j` over `i + j <= order`.
///
/// A model is immutable. It is created once, either by training on observations
/// ([`PolynomialRegression2D::train`], [`PolynomialRegression2D::builder`]) or by
/// restoring a serialized record ([`PolynomialRegression2D::from_record`]).
///
/// # Example
/// ```
/// use polyfit2d::{ObservationSet, PolynomialRegression2D};
///
/// let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
/// let y: Vec<f64> = (0..10).map(|i| (i * i % 7) as f64).collect();
/// let z: Vec<f64> = x.iter().zip(&y).map(|(x, y)| 1.0 + 2.0 * x - y).collect();
///
/// let observations = ObservationSet::new(x, y, z)?;
/// let model = PolynomialRegression2D::builder(observations).order(1).build()?;
///
/// assert!((model.predict(3.0, 4.0) - 3.0).abs() < 1e-9);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct PolynomialRegression2D {
    order: usize,
    coefficients: Vec<f64>,
    score: Option<RegressionScore>,
    parallel_threshold: usize,
    progress_callback: Option<Arc<dyn ProgressSink>>,
}

impl PolynomialRegression2D {
    /// Creates a new [`PolynomialRegression2DBuilder`] for the given observations.
    pub fn builder(observations: ObservationSet) -> PolynomialRegression2DBuilder {
        PolynomialRegression2DBuilder::new(observations)
    }

    /// Fits a polynomial of `settings.order` to `observations`.
    ///
    /// # Errors
    /// - [`ShapeError::InsufficientPoints`] if there are fewer observations than
    ///   coefficients.
    /// - [`RegressionError::DegenerateInput`] if `x`, `y` or `z` is all zeros.
    /// - [`RegressionError::Numerical`] if the data holds non-finite values.
    pub fn train(
        observations: &ObservationSet,
        settings: RegressionSettings,
    ) -> RegressionResult<Self> {
        Self::fit(observations, settings, None)
    }

    /// Trains one model per observation set in parallel.
    ///
    /// Results are returned in the order of `observation_sets`; one failed fit
    /// does not affect the others.
    pub fn train_many(
        observation_sets: &[ObservationSet],
        settings: RegressionSettings,
    ) -> Vec<RegressionResult<Self>> {
        observation_sets
            .par_iter()
            .map(|observations| Self::fit(observations, settings, None))
            .collect()
    }

    fn fit(
        observations: &ObservationSet,
        settings: RegressionSettings,
        progress_callback: Option<Arc<dyn ProgressSink>>,
    ) -> RegressionResult<Self> {
        let fit_start = Instant::now();

        let order = settings.order;
        let num_coefficients = settings.basis_size();

        if observations.len() < num_coefficients {
            return Err(ShapeError::InsufficientPoints {
                order,
                required: num_coefficients,
                found: observations.len(),
            }
            .into());
        }

        let scale = ScaleFactors::from_observations(observations)?;
        progress::emit(&progress_callback, || ProgressMsg::Scaled {
            scale_x: scale.x,
            scale_y: scale.y,
            scale_z: scale.z,
        });

        let (x, y, z) = scale.apply(observations);
        let design_matrix = polynomials::evaluate_monomials(x.col(0), y.col(0), order);

        let solution = linalg::svd_least_squares(&design_matrix, &z)?;
        if solution.rank < num_coefficients {
            progress::emit(&progress_callback, || ProgressMsg::RankTruncated {
                rank: solution.rank,
                num_coefficients,
            });
        }

        let coefficients = scale.unscale_coefficients(&solution.coefficients, order);

        let mut model = Self {
            order,
            coefficients,
            score: None,
            parallel_threshold: settings.parallel_threshold,
            progress_callback,
        };
        model.score = Some(model.score_observations(observations)?);

        let fit_duration = fit_start.elapsed();
        progress::emit(&model.progress_callback, || ProgressMsg::Message {
            message: format!(
                "Took {:?} to fit an order {} polynomial ({} coefficients, rank {}) to {} points",
                fit_duration,
                order,
                num_coefficients,
                solution.rank,
                observations.len(),
            ),
        });

        Ok(model)
    }

    /// Total order of the polynomial.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Coefficients in data units, in the order of
    /// [`monomial_exponents`](crate::monomial_exponents).
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Statistics against the training observations, or against whatever was
    /// stored in the record the model was loaded from.
    pub fn score(&self) -> Option<RegressionScore> {
        self.score
    }

    /// Evaluates the polynomial at a single point.
    ///
    /// Non-finite inputs propagate to the result.
    #[inline]
    pub fn predict(&self, x: f64, y: f64) -> f64 {
        polynomials::evaluate_polynomial(&self.coefficients, self.order, x, y)
    }

    /// Evaluates the polynomial at every `(x[i], y[i])`, preserving order.
    ///
    /// Batches of at least the configured parallel threshold are split across
    /// the rayon thread pool.
    pub fn predict_batch(&self, x: &[f64], y: &[f64]) -> RegressionResult<Vec<f64>> {
        if x.len() != y.len() {
            return Err(ShapeError::LengthMismatch {
                what: "x and y",
                expected: x.len(),
                found: y.len(),
            }
            .into());
        }

        Ok(self.predict_unchecked(x, y))
    }

    fn predict_unchecked(&self, x: &[f64], y: &[f64]) -> Vec<f64> {
        if x.len() >= self.parallel_threshold {
            x.par_iter()
                .zip(y.par_iter())
                .map(|(&x, &y)| self.predict(x, y))
                .collect()
        } else {
            x.iter()
                .zip(y.iter())
                .map(|(&x, &y)| self.predict(x, y))
                .collect()
        }
    }

    /// Dispatches to [`Self::predict`] or [`Self::predict_batch`].
    pub fn predict_input(&self, input: PredictionInput<'_>) -> RegressionResult<Prediction> {
        match input {
            PredictionInput::Point(x, y) => Ok(Prediction::Value(self.predict(x, y))),
            PredictionInput::Batch(x, y) => Ok(Prediction::Values(self.predict_batch(x, y)?)),
        }
    }

    /// Evaluates the polynomial at each row of an `n x 2` point matrix.
    ///
    /// Returns an `n x 1` matrix of values.
    pub fn evaluate(&self, target_points: &Mat<f64>) -> RegressionResult<Mat<f64>> {
        if target_points.ncols() != 2 {
            return Err(ShapeError::Dimension {
                found: target_points.ncols(),
            }
            .into());
        }

        let x = polyfit2d_utils::column_to_vec(target_points.as_ref(), 0);
        let y = polyfit2d_utils::column_to_vec(target_points.as_ref(), 1);
        let values = self.predict_unchecked(&x, &y);

        Ok(Mat::from_fn(values.len(), 1, |i, _| values[i]))
    }

    /// Predicts at the observation coordinates and scores the result against
    /// the observed values.
    pub fn score_observations(
        &self,
        observations: &ObservationSet,
    ) -> RegressionResult<RegressionScore> {
        let predicted = self.predict_unchecked(observations.x(), observations.y());
        Ok(compute_score(&predicted, observations.z())?)
    }

    /// Renders the fitted surface as plain text, e.g. `f(x, y) = 1 + 2 * x * y`.
    ///
    /// `precision` is the number of significant digits per coefficient;
    /// `None` prints the shortest exact representation.
    pub fn to_formula(&self, precision: Option<usize>) -> String {
        formula::to_formula(&self.coefficients, self.order, precision, FormulaStyle::PlainText)
    }

    /// Renders the fitted surface as LaTeX, e.g. `f(x, y) = 1 + 2xy`.
    pub fn to_latex(&self, precision: Option<usize>) -> String {
        formula::to_formula(&self.coefficients, self.order, precision, FormulaStyle::LaTeX)
    }

    /// Returns the serializable record of this model.
    pub fn to_record(&self) -> ModelRecord {
        ModelRecord {
            name: MODEL_NAME.to_string(),
            order: self.order,
            coefficients: self.coefficients.clone(),
            score: self.score,
        }
    }

    /// Restores a model from a record without refitting.
    ///
    /// # Errors
    /// - [`FormatError::NameMismatch`] if `record.name` is not `"polyfit2D"`.
    /// - [`FormatError::CoefficientCount`] if the number of coefficients does not
    ///   match `record.order`.
    pub fn from_record(record: ModelRecord) -> RegressionResult<Self> {
        if record.name != MODEL_NAME {
            return Err(FormatError::NameMismatch {
                found: record.name,
                expected: MODEL_NAME,
            }
            .into());
        }

        let expected = polynomials::number_of_coefficients(record.order);
        if record.coefficients.len() != expected {
            return Err(FormatError::CoefficientCount {
                order: record.order,
                expected,
                found: record.coefficients.len(),
            }
            .into());
        }

        Ok(Self {
            order: record.order,
            coefficients: record.coefficients,
            score: record.score,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            progress_callback: None,
        })
    }

    /// Writes the model record to `path` as pretty-printed JSON.
    ///
    /// ### Example
    /// ```no_run
    /// # use polyfit2d::PolynomialRegression2D;
    /// # let model: PolynomialRegression2D = unimplemented!();
    /// model.save_model("surface_model.json")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn save_model<P: AsRef<Path>>(&self, path: P) -> ModelIOResult<()> {
        let path_ref = path.as_ref();
        let file = File::create(path_ref).map_err(|e| ModelIOError::Create {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        let mut w = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut w, &self.to_record()).map_err(|e| {
            ModelIOError::Serialize {
                path: path_ref.to_path_buf(),
                source: e,
            }
        })?;
        w.flush().map_err(|e| ModelIOError::Flush {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }

    /// Loads a model saved with [`Self::save_model`], validating its record.
    ///
    /// ### Errors
    /// - Returns `ModelIOError::{Open, Parse, Invalid}` as appropriate.
    pub fn load_model<P: AsRef<Path>>(path: P) -> ModelIOResult<Self> {
        let path_ref = path.as_ref();

        let file = File::open(path_ref).map_err(|e| ModelIOError::Open {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        let reader = BufReader::new(file);

        let record: ModelRecord =
            serde_json::from_reader(reader).map_err(|e| ModelIOError::Parse {
                path: path_ref.to_path_buf(),
                source: e,
            })?;

        Self::from_record(record).map_err(|e| ModelIOError::Invalid {
            path: path_ref.to_path_buf(),
            source: e,
        })
    }
}

impl TryFrom<ModelRecord> for PolynomialRegression2D {
    type Error = RegressionError;

    fn try_from(record: ModelRecord) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

impl From<&PolynomialRegression2D> for ModelRecord {
    fn from(model: &PolynomialRegression2D) -> Self {
        model.to_record()
    }
}

impl fmt::Display for PolynomialRegression2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_formula(None))
    }
}

type ModelIOResult<T> = std::result::Result<T, ModelIOError>;

/// Errors that can occur when saving or loading a [`PolynomialRegression2D`] model.
#[derive(Debug)]
pub enum ModelIOError {
    /// Failed to create the target file before writing a model.
    Create { path: PathBuf, source: io::Error },
    /// Failed to open an existing model file for reading.
    Open { path: PathBuf, source: io::Error },
    /// Failed to flush buffered output when finishing a write.
    Flush { path: PathBuf, source: io::Error },
    /// Error serializing the model record to JSON.
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Error parsing JSON when reading a model from disk.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The file parsed but does not describe a valid model.
    Invalid {
        path: PathBuf,
        source: RegressionError,
    },
}

impl fmt::Display for ModelIOError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelIOError::Create { path, source } => {
                write!(f, "creating {}: {}", path.display(), source)
            }
            ModelIOError::Open { path, source } => {
                write!(f, "opening {}: {}", path.display(), source)
            }
            ModelIOError::Flush { path, source } => {
                write!(f, "flushing {}: {}", path.display(), source)
            }
            ModelIOError::Serialize { path, source } => {
                write!(f, "serializing JSON to {}: {}", path.display(), source)
            }
            ModelIOError::Parse { path, source } => {
                write!(f, "parsing JSON in {}: {}", path.display(), source)
            }
            ModelIOError::Invalid { path, source } => {
                write!(f, "loading {}: {}", path.display(), source)
            }
        }
    }
}

impl Error for ModelIOError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModelIOError::Create { source, .. }
            | ModelIOError::Open { source, .. }
            | ModelIOError::Flush { source, .. } => Some(source),
            ModelIOError::Serialize { source, .. } | ModelIOError::Parse { source, .. } => {
                Some(source)
            }
            ModelIOError::Invalid { source, .. } => Some(source),
        }
    }
}
