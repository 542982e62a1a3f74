use std::{error::Error, fmt, path::PathBuf};

/// The data module's result type.
pub type Result<T> = std::result::Result<T, DataErr>;

/// Failures while reading the dataset or encoding categorical values.
#[derive(Debug)]
pub enum DataErr {
    /// The file could not be opened, or a record could not be parsed into a listing.
    Read { path: PathBuf, source: csv::Error },
    /// The file parsed but holds no listings.
    Empty { path: PathBuf },
    /// A categorical value that was not seen when the encoder was fit.
    UnknownCategory { value: String },
    /// The dataset on disk holds a categorical value the trained encoder has never seen.
    Stale { path: PathBuf, value: String },
}

impl fmt::Display for DataErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataErr::Read { path, source } => {
                write!(f, "failed to read dataset {}: {source}", path.display())
            }
            DataErr::Empty { path } => write!(f, "dataset {} has no rows", path.display()),
            DataErr::UnknownCategory { value } => {
                write!(f, "unknown category {value:?}, it was not present at training time")
            }
            DataErr::Stale { path, value } => write!(
                f,
                "dataset {} gained category {value:?} after training, retrain the models",
                path.display()
            ),
        }
    }
}

impl Error for DataErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DataErr::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}
