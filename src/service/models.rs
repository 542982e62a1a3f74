use ndarray::Array2;

use crate::{
    data::{DataErr, Dataset, LabelEncoder, Listing},
    error::Result,
    ml::{metrics, LinearRegression, LogisticParams, LogisticRegression},
};

/// The year model's point estimate with its in-sample fit on the current dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearPrediction {
    pub year: f64,
    pub r2: f64,
    pub rmse: f64,
}

/// What a training pass fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingSummary {
    pub rows: usize,
    pub cities: usize,
    pub garage_iterations: usize,
}

/// The encoder and the three models produced by one training pass.
///
/// Only exists fully trained, so holding one is proof the service is ready to predict.
#[derive(Debug, Clone)]
pub struct TrainedModels {
    encoder: LabelEncoder,
    rating: LinearRegression,
    year: LinearRegression,
    garage: LogisticRegression,
    rows: usize,
}

fn features<const N: usize>(
    listings: &[Listing],
    codes: &[usize],
    row: impl Fn(f64, &Listing) -> [f64; N],
) -> Array2<f64> {
    let mut x = Array2::zeros((listings.len(), N));
    for (mut dst, (listing, &code)) in x.rows_mut().into_iter().zip(listings.iter().zip(codes)) {
        for (d, v) in dst.iter_mut().zip(row(code as f64, listing)) {
            *d = v;
        }
    }

    x
}

fn rating_row(city: f64, l: &Listing) -> [f64; 3] {
    [city, l.surface, l.price]
}

fn year_row(city: f64, _: &Listing) -> [f64; 1] {
    [city]
}

fn garage_row(city: f64, l: &Listing) -> [f64; 2] {
    [city, l.price]
}

impl TrainedModels {
    /// Fits the city encoder, then the rating, year and garage models on `dataset`.
    pub fn fit(dataset: &Dataset, garage_params: &LogisticParams) -> Result<Self> {
        let encoder = LabelEncoder::fit(dataset.cities());
        let codes = encoder.transform_all(dataset.cities())?;
        let listings = dataset.listings();

        let rating = LinearRegression::fit(
            features(listings, &codes, rating_row).view(),
            dataset.ratings().view(),
        )?;
        let year = LinearRegression::fit(
            features(listings, &codes, year_row).view(),
            dataset.construction_years().view(),
        )?;
        let garage = LogisticRegression::fit(
            features(listings, &codes, garage_row).view(),
            dataset.garages().view(),
            garage_params,
        )?;

        Ok(Self {
            encoder,
            rating,
            year,
            garage,
            rows: dataset.len(),
        })
    }

    pub fn summary(&self) -> TrainingSummary {
        TrainingSummary {
            rows: self.rows,
            cities: self.encoder.classes().len(),
            garage_iterations: self.garage.n_iter(),
        }
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    fn encode(&self, city: &str) -> Result<f64> {
        Ok(self.encoder.transform(city)? as f64)
    }

    pub fn predict_rating(&self, city: &str, surface: f64, price: f64) -> Result<f64> {
        let city = self.encode(city)?;
        Ok(self.rating.predict_one(&[city, surface, price])?)
    }

    pub fn predict_year(&self, city: &str) -> Result<f64> {
        let city = self.encode(city)?;
        Ok(self.year.predict_one(&[city])?)
    }

    /// Scores the year model against every listing of `dataset`, returning `(R², RMSE)`.
    ///
    /// Cities are encoded with the trained encoder, so a listing whose city was not seen at
    /// training time fails the whole scoring with `DataErr::Stale`.
    pub fn score_year(&self, dataset: &Dataset) -> Result<(f64, f64)> {
        let codes = self
            .encoder
            .transform_all(dataset.cities())
            .map_err(|e| match e {
                DataErr::UnknownCategory { value } => DataErr::Stale {
                    path: dataset.path().to_path_buf(),
                    value,
                },
                e => e,
            })?;
        let x = features(dataset.listings(), &codes, year_row);
        let y = dataset.construction_years();

        let r2 = self.year.score(x.view(), y.view())?;
        let y_pred = self.year.predict(x.view())?;
        let rmse = metrics::root_mean_squared_error(y.view(), y_pred.view())?;

        Ok((r2, rmse))
    }

    pub fn predict_garage(&self, city: &str, price: f64) -> Result<bool> {
        let city = self.encode(city)?;
        Ok(self.garage.predict_one(&[city, price])?)
    }
}
