pub mod error;
mod linear;
mod logistic;
pub mod metrics;
mod optimizer;

pub use error::{MlErr, Result};
pub use linear::LinearRegression;
pub use logistic::{LogisticParams, LogisticRegression};
pub use optimizer::{GradientDescent, Optimizer};
