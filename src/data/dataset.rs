use std::path::{Path, PathBuf};

use log::debug;
use ndarray::Array1;

use super::{
    error::{DataErr, Result},
    listing::Listing,
};

/// The housing listings read from one CSV file.
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
    listings: Vec<Listing>,
}

impl Dataset {
    /// Reads every listing from the CSV file at `path`.
    ///
    /// The file must have a header row naming the `ville, surface, price, note, annee, garage`
    /// columns. Their order does not matter and extra columns are ignored.
    ///
    /// # Errors
    /// `DataErr::Read` when the file is missing, a column is absent or a value does not parse,
    /// `DataErr::Empty` when there is no data row.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let read_err = |source| DataErr::Read {
            path: path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(read_err)?;

        let listings = reader
            .deserialize()
            .collect::<std::result::Result<Vec<Listing>, _>>()
            .map_err(read_err)?;

        Self::from_listings(path, listings)
    }

    /// Wraps listings that are already in memory.
    pub fn from_listings(path: impl Into<PathBuf>, listings: Vec<Listing>) -> Result<Self> {
        let path = path.into();
        if listings.is_empty() {
            return Err(DataErr::Empty { path });
        }

        debug!("loaded {} listing(s) from {}", listings.len(), path.display());
        Ok(Self { path, listings })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    #[inline]
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.listings.iter().map(|l| l.city.as_str())
    }

    pub fn ratings(&self) -> Array1<f64> {
        self.listings.iter().map(|l| l.rating).collect()
    }

    pub fn construction_years(&self) -> Array1<f64> {
        self.listings.iter().map(|l| l.construction_year).collect()
    }

    pub fn garages(&self) -> Array1<bool> {
        self.listings.iter().map(|l| l.has_garage).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs, process};

    fn write_csv(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("housing-models-{}-{name}.csv", process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_rows_in_any_column_order() {
        let path = write_csv(
            "reordered",
            "garage,ville,price,surface,annee,note,extra\n\
             True,Paris,250000,40,1990,4.5,x\n\
             0, Lyon ,180000,55,2005,3.8,y\n",
        );

        let ds = Dataset::load(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.listings()[1],
            Listing {
                city: "Lyon".into(),
                surface: 55.0,
                price: 180_000.0,
                rating: 3.8,
                construction_year: 2005.0,
                has_garage: false,
            }
        );
        assert_eq!(ds.garages().to_vec(), vec![true, false]);
        assert_eq!(ds.cities().collect::<Vec<_>>(), vec!["Paris", "Lyon"]);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Dataset::load("/definitely/not/here/suites.csv").unwrap_err();
        assert!(matches!(err, DataErr::Read { .. }));
    }

    #[test]
    fn missing_column_is_a_read_error() {
        let path = write_csv("no-garage", "ville,surface,price,note,annee\nParis,40,1,2,3\n");
        assert!(matches!(Dataset::load(&path), Err(DataErr::Read { .. })));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn header_only_is_empty() {
        let path = write_csv("header-only", "ville,surface,price,note,annee,garage\n");
        assert!(matches!(Dataset::load(&path), Err(DataErr::Empty { .. })));
        fs::remove_file(path).unwrap();
    }
}
