use serde::{
    de::{self, Unexpected},
    Deserialize, Deserializer,
};

/// One row of the housing dataset.
///
/// Field names on disk are the French column headers: `ville, surface, price, note, annee, garage`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Listing {
    #[serde(rename = "ville")]
    pub city: String,
    pub surface: f64,
    pub price: f64,
    #[serde(rename = "note")]
    pub rating: f64,
    #[serde(rename = "annee")]
    pub construction_year: f64,
    #[serde(rename = "garage", deserialize_with = "deserialize_flag")]
    pub has_garage: bool,
}

/// Parses the spellings a boolean column takes in exported spreadsheets.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "oui" | "1" => Some(true),
        "false" | "no" | "non" | "0" => Some(false),
        other => match other.parse::<f64>() {
            Ok(v) if v == 1.0 => Some(true),
            Ok(v) if v == 0.0 => Some(false),
            _ => None,
        },
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| {
        de::Error::invalid_value(Unexpected::Str(&raw), &"a boolean flag (true/false, 1/0, yes/no)")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_spellings() {
        for raw in ["True", "true", " 1 ", "yes", "1.0", "oui"] {
            assert_eq!(parse_flag(raw), Some(true), "{raw}");
        }
        for raw in ["False", "FALSE", "0", "no", "0.0", "non"] {
            assert_eq!(parse_flag(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag("2"), None);
    }
}
