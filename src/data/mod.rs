mod dataset;
mod encoder;
pub mod error;
mod listing;

pub use dataset::Dataset;
pub use encoder::LabelEncoder;
pub use error::{DataErr, Result};
pub use listing::{parse_flag, Listing};
