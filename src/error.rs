use std::{error::Error, fmt};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use crate::{data::DataErr, ml::MlErr};

/// The service's result type.
pub type Result<T> = std::result::Result<T, ServiceErr>;

/// Detail returned to clients that predict before any successful training.
pub const NOT_TRAINED_DETAIL: &str = "Le modèle n'est pas encore entraîné.";

/// All errors that can occur while training or serving predictions.
#[derive(Debug)]
pub enum ServiceErr {
    /// A prediction was requested before a training pass succeeded.
    NotTrained,
    /// The dataset could not be loaded, or a value could not be encoded.
    Data(DataErr),
    /// A model rejected its inputs.
    Ml(MlErr),
    /// A blocking training or scoring task did not complete.
    Task(String),
}

impl ServiceErr {
    /// Whether the failure was caused by the request rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotTrained | Self::Data(DataErr::UnknownCategory { .. })
        )
    }
}

impl fmt::Display for ServiceErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotTrained => write!(f, "{NOT_TRAINED_DETAIL}"),
            Self::Data(e) => write!(f, "{e}"),
            Self::Ml(e) => write!(f, "model error: {e}"),
            Self::Task(msg) => write!(f, "background task failed: {msg}"),
        }
    }
}

impl Error for ServiceErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Data(e) => Some(e),
            Self::Ml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DataErr> for ServiceErr {
    fn from(e: DataErr) -> Self {
        Self::Data(e)
    }
}

impl From<MlErr> for ServiceErr {
    fn from(e: MlErr) -> Self {
        Self::Ml(e)
    }
}

impl From<tokio::task::JoinError> for ServiceErr {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Task(e.to_string())
    }
}

/// Error body, shaped as `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ResponseError for ServiceErr {
    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}
