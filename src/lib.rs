//! HTTP service that trains rating, construction-year and garage models over a CSV of housing
//! listings and serves predictions from them.

pub mod config;
pub mod data;
pub mod error;
pub mod http;
pub mod ml;
pub mod service;

pub use config::{ConfigErr, ServiceConfig};
pub use error::{Result, ServiceErr};
pub use service::ModelService;
