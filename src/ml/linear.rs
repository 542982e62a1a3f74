use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use super::{
    error::{MlErr, Result},
    metrics::r2_score,
};

/// Pivots below this fraction of their original diagonal entry are treated as zero.
const PIVOT_TOLERANCE: f64 = 1e-10;

/// Ordinary least squares regression with an intercept.
///
/// There is no unfitted form: `fit` is the only way to build one.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    coef: Array1<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Fits the model on the rows of `x` against `y`.
    ///
    /// Features and target are centered, then the normal equations are solved. A feature with no
    /// variance, or one that is a linear combination of earlier features, gets a zero coefficient.
    ///
    /// # Arguments
    /// * `x` - One sample per row.
    /// * `y` - One target per sample.
    ///
    /// # Errors
    /// `EmptyInput` when there are no samples, `SizeMismatch` when `x` and `y` disagree.
    pub fn fit(x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                a: "features",
                b: "target",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        let x_mean = x
            .mean_axis(Axis(0))
            .ok_or(MlErr::EmptyInput { what: "feature matrix" })?;
        let y_mean = y.mean().ok_or(MlErr::EmptyInput { what: "target" })?;

        let mut xc = &x - &x_mean;
        let yc = &y - y_mean;

        // unit-norm columns keep the Gram matrix well conditioned when feature scales differ
        let norms = xc.map_axis(Axis(0), |col| {
            let norm = col.dot(&col).sqrt();
            if norm > 0.0 { norm } else { 1.0 }
        });
        xc /= &norms;

        let gram = xc.t().dot(&xc);
        let moments = xc.t().dot(&yc);
        let coef = solve_normal_equations(gram, moments) / &norms;
        let intercept = y_mean - x_mean.dot(&coef);

        Ok(Self { coef, intercept })
    }

    pub fn n_features(&self) -> usize {
        self.coef.len()
    }

    pub fn coef(&self) -> ArrayView1<'_, f64> {
        self.coef.view()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Predicts one target per row of `x`.
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.n_features() {
            return Err(MlErr::SizeMismatch {
                a: "features",
                b: "coefficients",
                got: x.ncols(),
                expected: self.n_features(),
            });
        }

        Ok(x.dot(&self.coef) + self.intercept)
    }

    /// Predicts the target of a single sample.
    pub fn predict_one(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.n_features() {
            return Err(MlErr::SizeMismatch {
                a: "features",
                b: "coefficients",
                got: features.len(),
                expected: self.n_features(),
            });
        }

        let dot: f64 = features.iter().zip(self.coef.iter()).map(|(x, w)| x * w).sum();
        Ok(dot + self.intercept)
    }

    /// Returns the R² of the model's predictions on `x` against `y`.
    pub fn score(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        r2_score(y, y_pred.view())
    }
}

/// Solves `gram · w = moments` for a positive semi-definite `gram` by forward elimination and back
/// substitution. Degenerate pivots leave their coefficient at zero.
fn solve_normal_equations(mut gram: Array2<f64>, mut moments: Array1<f64>) -> Array1<f64> {
    let n = moments.len();
    let diag = gram.diag().to_owned();
    let mut pivots = Vec::with_capacity(n);

    for k in 0..n {
        let pivot = gram[[k, k]];
        if pivot <= 0.0 || pivot <= diag[k] * PIVOT_TOLERANCE {
            continue;
        }

        for r in k + 1..n {
            let factor = gram[[r, k]] / pivot;
            if factor == 0.0 {
                continue;
            }

            for c in k..n {
                let upper = gram[[k, c]];
                gram[[r, c]] -= factor * upper;
            }

            let upper = moments[k];
            moments[r] -= factor * upper;
        }

        pivots.push(k);
    }

    let mut coef = Array1::zeros(n);
    for &k in pivots.iter().rev() {
        let tail: f64 = (k + 1..n).map(|c| gram[[k, c]] * coef[c]).sum();
        coef[k] = (moments[k] - tail) / gram[[k, k]];
    }

    coef
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn recovers_exact_coefficients() {
        // y = 1 + 2a + 3b
        let x = array![[0.0, 1.0], [1.0, 0.0], [2.0, 3.0], [3.0, 1.0], [4.0, 5.0]];
        let y = x.map_axis(Axis(1), |r| 1.0 + 2.0 * r[0] + 3.0 * r[1]);

        let model = LinearRegression::fit(x.view(), y.view()).unwrap();
        assert_close(model.coef()[0], 2.0);
        assert_close(model.coef()[1], 3.0);
        assert_close(model.intercept(), 1.0);
        assert_close(model.score(x.view(), y.view()).unwrap(), 1.0);
        assert_close(model.predict_one(&[10.0, 10.0]).unwrap(), 51.0);
    }

    #[test]
    fn handles_wide_feature_scales() {
        // surface-and-price sized inputs
        let x = array![
            [0.0, 30.0, 150_000.0],
            [1.0, 45.0, 210_000.0],
            [2.0, 60.0, 180_000.0],
            [0.0, 75.0, 320_000.0],
            [1.0, 90.0, 260_000.0],
            [2.0, 20.0, 95_000.0]
        ];
        let y = x.map_axis(Axis(1), |r| 2.5 + 0.1 * r[0] + 0.01 * r[1] + 0.000_004 * r[2]);

        let model = LinearRegression::fit(x.view(), y.view()).unwrap();
        let y_pred = model.predict(x.view()).unwrap();
        for (p, t) in y_pred.iter().zip(y.iter()) {
            assert_close(*p, *t);
        }
    }

    #[test]
    fn constant_feature_predicts_mean() {
        let x = array![[3.0], [3.0], [3.0]];
        let y = array![1990.0, 2000.0, 2010.0];

        let model = LinearRegression::fit(x.view(), y.view()).unwrap();
        assert_eq!(model.coef()[0], 0.0);
        assert_close(model.predict_one(&[3.0]).unwrap(), 2000.0);
    }

    #[test]
    fn duplicated_feature_is_dropped() {
        let x = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let y = array![2.0, 4.0, 6.0];

        let model = LinearRegression::fit(x.view(), y.view()).unwrap();
        assert_close(model.predict_one(&[4.0, 4.0]).unwrap(), 8.0);
    }

    #[test]
    fn empty_input_is_rejected() {
        let x = Array2::<f64>::zeros((0, 2));
        let y = Array1::<f64>::zeros(0);
        assert!(matches!(
            LinearRegression::fit(x.view(), y.view()),
            Err(MlErr::EmptyInput { .. })
        ));
    }

    #[test]
    fn wrong_feature_count_is_rejected() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0];
        let model = LinearRegression::fit(x.view(), y.view()).unwrap();
        assert!(matches!(
            model.predict_one(&[1.0, 2.0]),
            Err(MlErr::SizeMismatch { got: 2, expected: 1, .. })
        ));
    }
}
