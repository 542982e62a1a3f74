//! Request and response bodies. Field names match the public JSON API.

use serde::{Deserialize, Deserializer, Serialize};

/// Message returned by a successful `/train`.
pub const TRAINED_MESSAGE: &str = "Modèles entraînés avec succès.";

/// Accepts a JSON number or a string holding one. Only finite values are let through.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Number(f64),
        Text(String),
    }

    let v = match Lenient::deserialize(deserializer)? {
        Lenient::Number(v) => v,
        Lenient::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("{s:?} is not a valid number")))?,
    };
    if !v.is_finite() {
        return Err(serde::de::Error::custom(format!("{v} is not a finite number")));
    }

    Ok(v)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictNoteRequest {
    #[serde(rename = "ville")]
    pub city: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub surface: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictYearRequest {
    #[serde(rename = "ville")]
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictGarageRequest {
    #[serde(rename = "ville")]
    pub city: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictNoteResponse {
    pub predicted_note: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictYearResponse {
    pub predicted_year: f64,
    #[serde(rename = "R²")]
    pub r2: f64,
    #[serde(rename = "RMSE")]
    pub rmse: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictGarageResponse {
    pub predicted_garage: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn year_response_uses_public_keys() {
        let body = serde_json::to_value(PredictYearResponse {
            predicted_year: 1975.5,
            r2: 0.25,
            rmse: 12.0,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"predicted_year": 1975.5, "R²": 0.25, "RMSE": 12.0})
        );
    }

    #[test]
    fn numbers_may_arrive_as_strings() {
        let req: PredictNoteRequest =
            serde_json::from_value(json!({"ville": "Paris", "surface": "50", "price": 200000}))
                .unwrap();
        assert_eq!(req.city, "Paris");
        assert_eq!(req.surface, 50.0);
        assert_eq!(req.price, 200_000.0);
    }

    #[test]
    fn non_numeric_strings_are_rejected() {
        let res: Result<PredictGarageRequest, _> =
            serde_json::from_value(json!({"ville": "Paris", "price": "cheap"}));
        assert!(res.is_err());
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        for price in ["NaN", "inf", "-inf", " infinity "] {
            let res: Result<PredictGarageRequest, _> =
                serde_json::from_value(json!({"ville": "Paris", "price": price}));
            assert!(res.is_err(), "{price}");
        }
    }

    #[test]
    fn missing_city_is_rejected() {
        let res: Result<PredictYearRequest, _> = serde_json::from_value(json!({}));
        assert!(res.is_err());
    }
}
