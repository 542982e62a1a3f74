mod models;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{debug, info, warn};
use tokio::{sync::RwLock, task};

use crate::{
    config::ServiceConfig,
    data::Dataset,
    error::{Result, ServiceErr},
    ml::LogisticParams,
};

pub use models::{TrainedModels, TrainingSummary, YearPrediction};

/// Where the service is in its life.
#[derive(Debug, Clone, Default)]
pub enum Lifecycle {
    /// No training pass has succeeded yet.
    #[default]
    Uninitialized,
    /// Serving predictions from the bundle of the latest successful training pass.
    Ready(Arc<TrainedModels>),
}

/// Holds the trained models and serves train and predict requests.
///
/// A training pass fits a fresh bundle without holding the lock and only swaps it in once it is
/// complete, so every prediction sees exactly one bundle. A failed pass keeps the previous one.
#[derive(Debug)]
pub struct ModelService {
    dataset_path: PathBuf,
    garage_params: LogisticParams,
    state: RwLock<Lifecycle>,
}

impl ModelService {
    pub fn new(dataset_path: impl Into<PathBuf>, garage_params: LogisticParams) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            garage_params,
            state: RwLock::new(Lifecycle::Uninitialized),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.dataset_path.clone(), config.garage)
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    pub async fn lifecycle(&self) -> Lifecycle {
        self.state.read().await.clone()
    }

    /// Returns the current bundle.
    ///
    /// # Errors
    /// `ServiceErr::NotTrained` while no training pass has succeeded.
    pub async fn models(&self) -> Result<Arc<TrainedModels>> {
        match &*self.state.read().await {
            Lifecycle::Ready(models) => Ok(Arc::clone(models)),
            Lifecycle::Uninitialized => {
                warn!("prediction requested before training");
                Err(ServiceErr::NotTrained)
            }
        }
    }

    /// Reloads the dataset, fits every model on it and makes the result current.
    pub async fn train(&self) -> Result<TrainingSummary> {
        let path = self.dataset_path.clone();
        let params = self.garage_params;
        info!("training on {}", path.display());

        let models = task::spawn_blocking(move || -> Result<TrainedModels> {
            let dataset = Dataset::load(&path)?;
            TrainedModels::fit(&dataset, &params)
        })
        .await??;

        let summary = models.summary();
        *self.state.write().await = Lifecycle::Ready(Arc::new(models));
        info!(
            rows = summary.rows,
            cities = summary.cities,
            garage_iterations = summary.garage_iterations;
            "models trained"
        );

        Ok(summary)
    }

    pub async fn predict_rating(&self, city: &str, surface: f64, price: f64) -> Result<f64> {
        let rating = self.models().await?.predict_rating(city, surface, price)?;
        debug!("predicted rating {rating} for city={city} surface={surface} price={price}");
        Ok(rating)
    }

    /// Predicts the construction year and scores the year model against the dataset as it is on
    /// disk right now.
    pub async fn predict_year(&self, city: &str) -> Result<YearPrediction> {
        let models = self.models().await?;
        let year = models.predict_year(city)?;

        let path = self.dataset_path.clone();
        let (r2, rmse) = task::spawn_blocking(move || -> Result<(f64, f64)> {
            let dataset = Dataset::load(&path)?;
            models.score_year(&dataset)
        })
        .await??;

        debug!("predicted year {year} for city={city} (r2={r2}, rmse={rmse})");
        Ok(YearPrediction { year, r2, rmse })
    }

    pub async fn predict_garage(&self, city: &str, price: f64) -> Result<bool> {
        let garage = self.models().await?.predict_garage(city, price)?;
        debug!("predicted garage={garage} for city={city} price={price}");
        Ok(garage)
    }
}
