use thiserror::Error;

use crate::models::FittedLine;

/// Errors from the least-squares estimator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegressionError {
    #[error("x and y series must have equal length (got {x_len} and {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("at least two points are required to fit a line (got {0})")]
    TooFewPoints(usize),

    #[error("x values are constant; slope is undefined")]
    DegenerateInput,
}

/// Ordinary least squares over two equal-length series.
///
/// Closed form: slope = Σ(xᵢ−x̄)(yᵢ−ȳ) / Σ(xᵢ−x̄)², intercept = ȳ − slope·x̄.
/// Constant x values make the denominator zero and are reported as
/// `DegenerateInput` rather than producing an infinite or NaN slope.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Result<FittedLine, RegressionError> {
    if xs.len() != ys.len() {
        return Err(RegressionError::LengthMismatch {
            x_len: xs.len(),
            y_len: ys.len(),
        });
    }
    if xs.len() < 2 {
        return Err(RegressionError::TooFewPoints(xs.len()));
    }

    let n = xs.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = ys.iter().sum::<f64>() / n;

    let mut num = 0.0;
    let mut den = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        num += (x - x_mean) * (y - y_mean);
        den += (x - x_mean) * (x - x_mean);
    }

    if den == 0.0 {
        return Err(RegressionError::DegenerateInput);
    }

    let slope = num / den;
    Ok(FittedLine {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}
