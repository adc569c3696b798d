/////////////////////////////////////////////////////////////////////////////////////////////
//
// Re-exports slice and matrix helper functions used across the polyfit2d crates.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Utilities for the [`polyfit2d`] crate
mod utils;

pub use utils::{column_to_vec, columns_to_points, get_value_range, max_abs, select_indices};
