use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

use super::{
    error::{MlErr, Result},
    optimizer::{GradientDescent, Optimizer},
};

/// Solver settings for [`LogisticRegression::fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticParams {
    /// Inverse L2 regularization strength.
    pub c: f64,
    pub max_iter: usize,
    pub learning_rate: f64,
    /// Training stops once every gradient component is below this in absolute value.
    pub tolerance: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            learning_rate: 0.5,
            tolerance: 1e-6,
        }
    }
}

#[derive(Debug, Clone)]
enum Decision {
    /// Weights live in standardized feature space.
    Linear {
        mean: Array1<f64>,
        scale: Array1<f64>,
        coef: Array1<f64>,
        intercept: f64,
    },
    /// Every training label was the same.
    Constant(bool),
}

/// Binary logistic regression with L2 penalty, trained by full-batch gradient descent.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    n_features: usize,
    n_iter: usize,
    decision: Decision,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1. / (1. + (-z).exp())
    } else {
        let e = z.exp();
        e / (1. + e)
    }
}

impl LogisticRegression {
    /// Fits the classifier on the rows of `x` against the labels `y`.
    ///
    /// # Errors
    /// `EmptyInput` when there are no samples, `SizeMismatch` when `x` and `y` disagree.
    pub fn fit(x: ArrayView2<f64>, y: ArrayView1<bool>, params: &LogisticParams) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                a: "features",
                b: "labels",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        let n = y.len();
        let d = x.ncols();
        let mean = x
            .mean_axis(Axis(0))
            .ok_or(MlErr::EmptyInput { what: "feature matrix" })?;

        let positives = y.iter().filter(|&&label| label).count();
        if positives == 0 || positives == n {
            return Ok(Self {
                n_features: d,
                n_iter: 0,
                decision: Decision::Constant(positives == n),
            });
        }

        let scale = x.std_axis(Axis(0), 0.0).mapv(|s| if s > 0.0 { s } else { 1.0 });
        let xs = (&x - &mean) / &scale;
        let targets = y.mapv(|label| if label { 1.0 } else { 0.0 });

        let penalty = 1.0 / (params.c * n as f64);
        let mut optimizer = GradientDescent::new(params.learning_rate);
        let mut weights = vec![0.0; d + 1];
        let mut grad = vec![0.0; d + 1];
        let mut n_iter = 0;

        while n_iter < params.max_iter {
            let coef = ArrayView1::from(&weights[..d]);
            let z = xs.dot(&coef) + weights[d];
            let residuals = z.mapv(sigmoid) - &targets;

            let grad_coef = xs.t().dot(&residuals) / n as f64 + &coef * penalty;
            for (g, v) in grad.iter_mut().zip(grad_coef.iter()) {
                *g = *v;
            }
            grad[d] = residuals.mean().unwrap_or_default();

            n_iter += 1;
            if grad.iter().all(|g| g.abs() < params.tolerance) {
                break;
            }

            optimizer.update_params(&mut weights, &grad);
        }

        let intercept = weights[d];
        weights.truncate(d);

        Ok(Self {
            n_features: d,
            n_iter,
            decision: Decision::Linear {
                mean,
                scale,
                coef: Array1::from(weights),
                intercept,
            },
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of gradient steps taken while fitting.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Probability that the sample belongs to the positive class.
    pub fn predict_proba_one(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.n_features {
            return Err(MlErr::SizeMismatch {
                a: "features",
                b: "coefficients",
                got: features.len(),
                expected: self.n_features,
            });
        }

        let proba = match &self.decision {
            Decision::Constant(label) => {
                if *label {
                    1.0
                } else {
                    0.0
                }
            }
            Decision::Linear {
                mean,
                scale,
                coef,
                intercept,
            } => {
                let z: f64 = features
                    .iter()
                    .zip(mean.iter().zip(scale.iter()))
                    .zip(coef.iter())
                    .map(|((x, (m, s)), w)| (x - m) / s * w)
                    .sum();
                sigmoid(z + intercept)
            }
        };

        Ok(proba)
    }

    pub fn predict_one(&self, features: &[f64]) -> Result<bool> {
        Ok(self.predict_proba_one(features)? > 0.5)
    }
}
