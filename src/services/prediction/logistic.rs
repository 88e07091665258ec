//! Logistic Regression for binary classification
//!
//! L2-penalised logistic regression (C = 1, intercept unpenalised) fitted by
//! Newton-Raphson with a backtracking line search. Minimises
//! `0.5 * ||w||^2 + C * sum(log_loss)`.

use ndarray::{s, Array1, Array2, Axis};
use thiserror::Error;

/// Errors for logistic regression
#[derive(Error, Debug, PartialEq)]
pub enum LogisticError {
    #[error("No training samples")]
    Empty,

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Labels must contain both classes")]
    SingleClass,

    #[error("Model has not been fitted yet")]
    NotFitted,

    #[error("Hessian is singular")]
    Singular,

    #[error("Convergence failed after {0} iterations")]
    NotConverged(usize),
}

/// Armijo sufficient-decrease constant.
const ARMIJO: f64 = 1e-4;

/// Step halvings tried before the line search gives up.
const MAX_HALVINGS: usize = 60;

/// Relative objective decrease below which the fit has stalled.
const STALL: f64 = 1e-15;

/// Gradient size accepted as stationary when no step improves the objective.
const GRAD_TOLERANCE: f64 = 1e-8;

/// Logistic Regression classifier
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// Inverse regularization strength.
    c: f64,
    /// Maximum Newton iterations.
    max_iter: usize,
    /// Relative step size treated as converged.
    tolerance: f64,
    /// Fitted coefficients
    coefficients: Option<Array1<f64>>,
    /// Intercept term
    intercept: Option<f64>,
    /// Newton iterations used by the last fit.
    iterations: usize,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 100,
            tolerance: 1e-10,
            coefficients: None,
            intercept: None,
            iterations: 0,
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let exp_z = z.exp();
        exp_z / (1.0 + exp_z)
    }
}

/// `ln(1 + e^z)` without overflow.
fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

fn max_abs(values: &Array1<f64>) -> f64 {
    values.iter().fold(0.0, |m, v| m.max(v.abs()))
}

/// Solve `a * x = b` by Gaussian elimination with partial pivoting.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>, LogisticError> {
    let n = b.len();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))
            .unwrap_or(col);
        let pivot = a[[pivot_row, col]];
        if !pivot.is_finite() || pivot.abs() <= f64::MIN_POSITIVE {
            return Err(LogisticError::Singular);
        }

        if pivot_row != col {
            for k in 0..n {
                a.swap([col, k], [pivot_row, k]);
            }
            b.swap(col, pivot_row);
        }

        for row in col + 1..n {
            let factor = a[[row, col]] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[[row, k]] * x[k]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }

    Ok(x)
}

impl LogisticRegression {
    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.coefficients.as_ref()
    }

    pub fn intercept(&self) -> Option<f64> {
        self.intercept
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn store(&mut self, theta: &Array1<f64>, iterations: usize) {
        let d = theta.len() - 1;
        self.iterations = iterations;
        self.coefficients = Some(theta.slice(s![..d]).to_owned());
        self.intercept = Some(theta[d]);
    }

    /// Penalised negative log-likelihood of `theta` (last entry is the intercept).
    fn objective(&self, design: &Array2<f64>, y: &Array1<f64>, theta: &Array1<f64>) -> f64 {
        let d = theta.len() - 1;
        let z = design.dot(theta);
        let loss: f64 = z
            .iter()
            .zip(y.iter())
            .map(|(&z, &y)| softplus(z) - y * z)
            .sum();
        let penalty: f64 = theta.slice(s![..d]).iter().map(|w| w * w).sum();
        0.5 * penalty + self.c * loss
    }

    /// Fit on `x` (samples x features) against 0/1 labels `y`.
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), LogisticError> {
        let (n, d) = x.dim();
        if n == 0 {
            return Err(LogisticError::Empty);
        }
        if y.len() != n {
            return Err(LogisticError::DimensionMismatch {
                expected: n,
                got: y.len(),
            });
        }

        let positives = y.iter().filter(|&&v| v > 0.5).count();
        if positives == 0 || positives == n {
            return Err(LogisticError::SingleClass);
        }

        // Features plus a column of ones for the intercept.
        let mut design = Array2::<f64>::ones((n, d + 1));
        design.slice_mut(s![.., ..d]).assign(x);

        let mut penalty_mask = Array1::<f64>::ones(d + 1);
        penalty_mask[d] = 0.0;

        let mut theta = Array1::<f64>::zeros(d + 1);
        self.coefficients = None;
        self.intercept = None;

        for iter in 0..self.max_iter {
            let p = design.dot(&theta).mapv(sigmoid);
            let residual = &p - y;
            let grad = &theta * &penalty_mask + design.t().dot(&residual) * self.c;

            let weights = p.mapv(|v| v * (1.0 - v));
            let weighted = &design * &weights.view().insert_axis(Axis(1));
            let mut hessian = design.t().dot(&weighted) * self.c;
            for j in 0..d {
                hessian[[j, j]] += 1.0;
            }

            let step = solve(hessian, grad.clone())?;
            if max_abs(&step) <= self.tolerance * (1.0 + max_abs(&theta)) {
                self.store(&theta, iter);
                return Ok(());
            }

            let current = self.objective(&design, y, &theta);
            let decrease = grad.dot(&step);
            let mut t = 1.0;
            let mut accepted = None;
            for _ in 0..MAX_HALVINGS {
                let candidate = &theta - &(&step * t);
                let value = self.objective(&design, y, &candidate);
                if value.is_finite() && value <= current - ARMIJO * t * decrease {
                    accepted = Some((candidate, value));
                    break;
                }
                t *= 0.5;
            }

            match accepted {
                // Objective no longer moves at working precision.
                Some((next, value)) if current - value <= STALL * current.abs().max(1.0) => {
                    self.store(&next, iter + 1);
                    return Ok(());
                }
                Some((next, _)) => theta = next,
                None if max_abs(&grad) <= GRAD_TOLERANCE * (1.0 + current.abs()) => {
                    self.store(&theta, iter);
                    return Ok(());
                }
                None => return Err(LogisticError::NotConverged(iter + 1)),
            }
        }

        Err(LogisticError::NotConverged(self.max_iter))
    }

    /// Predict probabilities of the positive class.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>, LogisticError> {
        let weights = self
            .coefficients
            .as_ref()
            .ok_or(LogisticError::NotFitted)?;
        let bias = self.intercept.ok_or(LogisticError::NotFitted)?;
        if x.ncols() != weights.len() {
            return Err(LogisticError::DimensionMismatch {
                expected: weights.len(),
                got: x.ncols(),
            });
        }

        Ok((x.dot(weights) + bias).mapv(sigmoid))
    }
}
