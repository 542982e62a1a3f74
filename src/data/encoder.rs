use std::collections::BTreeSet;

use super::error::{DataErr, Result};

/// Maps categorical string values to dense integer codes.
///
/// Codes follow the lexicographic order of the distinct values seen by `fit`, so a given set of
/// values always encodes the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes: BTreeSet<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_owned())
            .collect();

        Self {
            classes: classes.into_iter().collect(),
        }
    }

    /// The distinct values, indexed by their code.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns the code of `value`.
    ///
    /// # Errors
    /// `DataErr::UnknownCategory` if `value` was not seen by `fit`.
    pub fn transform(&self, value: &str) -> Result<usize> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .map_err(|_| DataErr::UnknownCategory {
                value: value.to_owned(),
            })
    }

    /// Encodes every value, failing on the first unknown one.
    pub fn transform_all<I, S>(&self, values: I) -> Result<Vec<usize>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .map(|v| self.transform(v.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_sorted_and_dense() {
        let enc = LabelEncoder::fit(["Paris", "Lyon", "Paris", "Bordeaux", "Lyon"]);
        assert_eq!(enc.classes(), ["Bordeaux", "Lyon", "Paris"]);
        assert_eq!(enc.transform("Bordeaux").unwrap(), 0);
        assert_eq!(enc.transform("Paris").unwrap(), 2);
        let codes = enc.transform_all(enc.classes()).unwrap();
        assert_eq!(codes, vec![0, 1, 2]);
    }

    #[test]
    fn unknown_value_fails() {
        let enc = LabelEncoder::fit(["Paris"]);
        match enc.transform("Marseille") {
            Err(DataErr::UnknownCategory { value }) => assert_eq!(value, "Marseille"),
            other => panic!("expected UnknownCategory, got {other:?}"),
        }
    }

    #[test]
    fn transform_all_stops_at_first_unknown() {
        let enc = LabelEncoder::fit(["a", "b"]);
        assert_eq!(enc.transform_all(["b", "a", "b"]).unwrap(), vec![1, 0, 1]);
        assert!(enc.transform_all(["a", "z", "b"]).is_err());
    }

    #[test]
    fn encoding_is_case_sensitive() {
        let enc = LabelEncoder::fit(["Paris"]);
        assert!(enc.transform("paris").is_err());
    }
}
