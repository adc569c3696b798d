/////////////////////////////////////////////////////////////////////////////////////////////
//
// Renders fitted polynomial coefficients as plain-text or LaTeX formulas.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::polynomials;

/// Output flavour of a rendered formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaStyle {
    /// `f(x, y) = 1 + 2 * x^2 * y`
    PlainText,

    /// `f(x, y) = 1 + 2x^{2}y`
    LaTeX,
}

impl FormulaStyle {
    fn tokens(&self) -> (&'static str, &'static str, &'static str) {
        // (open superscript, close superscript, multiplication)
        match self {
            FormulaStyle::PlainText => ("^", "", " * "),
            FormulaStyle::LaTeX => ("^{", "}", ""),
        }
    }
}

/// Formats `value` with `figures` significant digits.
///
/// Fixed notation is used unless the decimal exponent is below `-6` or at least
/// `figures`, in which case the output is `d.ddde±X`.
pub fn to_precision(value: f64, figures: usize) -> String {
    let figures = figures.max(1);

    if !value.is_finite() {
        return value.to_string();
    }

    // Rounds to the requested significant digits before reading the exponent.
    let scientific = format!("{:.*e}", figures - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => (scientific.clone(), 0),
    };

    if exponent < -6 || exponent >= figures as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{}", mantissa, sign, exponent.abs())
    } else {
        let decimals = (figures as i32 - 1 - exponent).max(0) as usize;
        format!("{:.*}", decimals, value)
    }
}

fn format_magnitude(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(figures) => to_precision(value.abs(), figures),
        None => value.abs().to_string(),
    }
}

fn power(variable: char, exponent: usize, style: FormulaStyle) -> String {
    let (open, close, times) = style.tokens();
    match exponent {
        0 => String::new(),
        1 => format!("{}{}", times, variable),
        _ => format!("{}{}{}{}{}", times, variable, open, exponent, close),
    }
}

/// Renders `f(x, y) = ...` with one term per non-zero coefficient, in
/// coefficient order.
///
/// # Example
/// ```
/// use polyfit2d::{to_formula, FormulaStyle};
///
/// // order 1: [c00, c01, c10]
/// let formula = to_formula(&[1.5, 0.0, -2.0], 1, None, FormulaStyle::PlainText);
/// assert_eq!(formula, "f(x, y) = 1.5 - 2 * x");
/// ```
pub fn to_formula(
    coefficients: &[f64],
    order: usize,
    precision: Option<usize>,
    style: FormulaStyle,
) -> String {
    let mut formula = String::new();

    for ((i, j), &coefficient) in polynomials::monomial_exponents(order).zip(coefficients.iter()) {
        if coefficient == 0.0 {
            continue;
        }

        let mut term = format_magnitude(coefficient, precision);
        term.push_str(&power('x', i, style));
        term.push_str(&power('y', j, style));

        let sign = if coefficient < 0.0 { "-" } else { "+" };
        if formula.is_empty() {
            if coefficient < 0.0 {
                formula.push_str("- ");
            }
        } else {
            formula.push(' ');
            formula.push_str(sign);
            formula.push(' ');
        }
        formula.push_str(&term);
    }

    if formula.is_empty() {
        formula.push('0');
    }

    format!("f(x, y) = {}", formula)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_fixed_and_exponential() {
        assert_eq!(to_precision(15.586854, 4), "15.59");
        assert_eq!(to_precision(0.0052582, 4), "0.005258");
        assert_eq!(to_precision(99.96, 3), "100");
        assert_eq!(to_precision(9.996, 3), "10.0");
        assert_eq!(to_precision(1234567.0, 3), "1.23e+6");
        assert_eq!(to_precision(0.00000012345, 2), "1.2e-7");
        assert_eq!(to_precision(0.0, 3), "0.00");
    }

    #[test]
    fn plain_text_formula() {
        // order 2: (0,0), (0,1), (0,2), (1,0), (1,1), (2,0)
        let coefficients = [1.0, 0.0, 0.5, -2.0, 3.0, -0.25];
        let formula = to_formula(&coefficients, 2, None, FormulaStyle::PlainText);
        assert_eq!(
            formula,
            "f(x, y) = 1 + 0.5 * y^2 - 2 * x + 3 * x * y - 0.25 * x^2"
        );
    }

    #[test]
    fn latex_formula_with_precision() {
        let coefficients = [0.0, 1.23456, 0.0, 0.0, 0.0, 9.87654];
        let formula = to_formula(&coefficients, 2, Some(3), FormulaStyle::LaTeX);
        assert_eq!(formula, "f(x, y) = 1.23y + 9.88x^{2}");
    }

    #[test]
    fn leading_negative_and_all_zero() {
        let formula = to_formula(&[0.0, -4.0, 0.0], 1, None, FormulaStyle::PlainText);
        assert_eq!(formula, "f(x, y) = - 4 * y");

        let formula = to_formula(&[0.0; 3], 1, Some(2), FormulaStyle::PlainText);
        assert_eq!(formula, "f(x, y) = 0");
    }
}
