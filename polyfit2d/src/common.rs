/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines shared helpers for random point generation, evaluation grids and CSV I/O.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::observations::ObservationSet;
use csv::{ReaderBuilder, Writer};
use faer::Mat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::fs::File;

/// Generate an `n x 2` matrix of random points in the unit square.
///
/// # Parameters
/// - `n`: Number of points to generate.
/// - `seed`: Optional random seed.
///   - If `Some(seed)` is provided, the same points are generated on every run
///     (useful for reproducible tests).
///   - If `None`, the generator is seeded from the operating system's randomness source.
///
/// # Example
/// ```
/// use polyfit2d::generate_random_points;
///
/// let pts = generate_random_points(100, Some(42));
/// assert_eq!(pts.shape(), (100, 2));
/// ```
pub fn generate_random_points(n: usize, seed: Option<u64>) -> Mat<f64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    Mat::from_fn(n, 2, |_, _| rng.random_range(0.0..1.0))
}

/// Create a regular evaluation grid from per-dimension ranges and sample counts.
///
/// The first dimension varies fastest. A dimension with a single sample sits
/// at the start of its range.
///
/// # Arguments
/// * `ranges` - Inclusive `(min, max)` range for each dimension.
/// * `counts` - Number of grid samples per range; must match `ranges.len()`.
///
/// # Returns
/// A `Mat<f64>` with one row per grid point and one column per dimension.
///
/// # Panics
/// If `ranges` and `counts` have different lengths.
pub fn create_evaluation_grid(ranges: &[(f64, f64)], counts: &[usize]) -> Mat<f64> {
    assert_eq!(ranges.len(), counts.len());

    let total_points: usize = counts.iter().product();
    let num_dimensions = ranges.len();

    Mat::from_fn(total_points, num_dimensions, |row_idx, col_idx| {
        let dim_points = counts[col_idx];
        let (start, end) = ranges[col_idx];
        let step = match dim_points > 1 {
            true => (end - start) / (dim_points as f64 - 1.0),
            false => 0.0,
        };

        let stride = counts[..col_idx].iter().product::<usize>();

        let index_in_dim = (row_idx / stride) % dim_points;
        start + step * index_in_dim as f64
    })
}

/// Load a three-column `x, y, z` CSV file into an [`ObservationSet`].
///
/// # Arguments
/// * `file_path` - Path to the CSV file.
/// * `has_headers` - Whether the file has a single header row to skip.
///
/// # Errors
/// Fails if the file cannot be read, a row does not hold exactly three
/// numbers, or there are fewer than two rows.
pub fn csv_to_observations(
    file_path: &str,
    has_headers: bool,
) -> Result<ObservationSet, Box<dyn Error>> {
    let file = File::open(file_path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .from_reader(file);

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut z = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() != 3 {
            return Err(format!(
                "expected 3 columns (x, y, z) in row {}, found {}",
                row + 1,
                record.len()
            )
            .into());
        }

        x.push(record[0].trim().parse::<f64>()?);
        y.push(record[1].trim().parse::<f64>()?);
        z.push(record[2].trim().parse::<f64>()?);
    }

    Ok(ObservationSet::new(x, y, z)?)
}

/// Write point coordinates and their predicted values to a CSV file.
///
/// Each row of the `n x 2` `points` matrix is written followed by the
/// corresponding entry of `values`, with headers `X, Y, PredictedValue`.
///
/// # Errors
/// Returns an error if the shapes disagree or writing to disk fails.
pub fn predictions_to_csv(
    points: &Mat<f64>,
    values: &[f64],
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    let num_points = points.nrows();
    if points.ncols() != 2 || values.len() != num_points {
        return Err(format!(
            "expected an n x 2 point matrix and n values, got {} x {} and {}",
            num_points,
            points.ncols(),
            values.len()
        )
        .into());
    }

    let mut wtr = Writer::from_path(filename)?;
    wtr.write_record(["X", "Y", "PredictedValue"])?;

    for i in 0..num_points {
        wtr.write_record([
            points[(i, 0)].to_string(),
            points[(i, 1)].to_string(),
            values[i].to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("polyfit2d_{}_{}.csv", name, std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn seeded_points_are_reproducible() {
        let a = generate_random_points(50, Some(7));
        let b = generate_random_points(50, Some(7));

        assert_eq!(a, b);
        assert!(a
            .col_iter()
            .all(|col| col.iter().all(|v| (0.0..1.0).contains(v))));
    }

    #[test]
    fn grid_first_dimension_varies_fastest() {
        let grid = create_evaluation_grid(&[(0.0, 1.0), (10.0, 20.0)], &[3, 2]);

        assert_eq!(grid.shape(), (6, 2));
        assert_eq!(grid[(0, 0)], 0.0);
        assert_eq!(grid[(1, 0)], 0.5);
        assert_eq!(grid[(2, 0)], 1.0);
        assert_eq!(grid[(2, 1)], 10.0);
        assert_eq!(grid[(3, 0)], 0.0);
        assert_eq!(grid[(3, 1)], 20.0);
    }

    #[test]
    fn single_sample_dimension() {
        let grid = create_evaluation_grid(&[(2.0, 5.0), (0.0, 1.0)], &[1, 2]);
        assert_eq!(grid[(0, 0)], 2.0);
        assert_eq!(grid[(1, 0)], 2.0);
        assert_eq!(grid[(1, 1)], 1.0);
    }

    #[test]
    fn csv_round_trip_through_observations() {
        let path = temp_path("observations");
        std::fs::write(&path, "x,y,z\n0.0,1.0,2.0\n3.5, 4.0, -1.25\n").unwrap();

        let observations = csv_to_observations(&path, true).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(observations.x(), &[0.0, 3.5]);
        assert_eq!(observations.z(), &[2.0, -1.25]);
    }

    #[test]
    fn csv_rejects_wrong_column_count() {
        let path = temp_path("bad_columns");
        std::fs::write(&path, "0.0,1.0\n2.0,3.0\n").unwrap();

        let result = csv_to_observations(&path, false);
        std::fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }

    #[test]
    fn predictions_are_written_with_headers() {
        let path = temp_path("predictions");
        let points = faer::mat![[0.0, 1.0], [2.0, 3.0f64]];

        predictions_to_csv(&points, &[4.0, 5.5], &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(contents, "X,Y,PredictedValue\n0,1,4\n2,3,5.5\n");
        assert!(predictions_to_csv(&points, &[1.0], &path).is_err());
    }
}
