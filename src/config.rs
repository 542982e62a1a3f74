use std::{env, error::Error, fmt, path::PathBuf, str::FromStr};

use crate::ml::LogisticParams;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATASET_PATH: &str = "suites.csv";

/// A configuration variable that is set but does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigErr {
    pub var: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value {:?} for {}", self.value, self.var)
    }
}

impl Error for ConfigErr {}

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub dataset_path: PathBuf,
    /// HTTP worker threads, `None` keeps the server's default.
    pub workers: Option<usize>,
    pub garage: LogisticParams,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            workers: None,
            garage: LogisticParams::default(),
        }
    }
}

impl ServiceConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Unset variables keep their default.
    ///
    /// # Errors
    /// Returns a `ConfigErr` naming the first variable that does not parse.
    pub fn from_env() -> Result<Self, ConfigErr> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            dataset_path: lookup("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
            workers: parse_var(&lookup, "WORKERS")?,
            garage: LogisticParams {
                max_iter: parse_var(&lookup, "GARAGE_MAX_ITER")?
                    .unwrap_or(defaults.garage.max_iter),
                learning_rate: parse_var(&lookup, "GARAGE_LEARNING_RATE")?
                    .unwrap_or(defaults.garage.learning_rate),
                ..defaults.garage
            },
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigErr>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigErr { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServiceConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.bind_addr(), ("127.0.0.1".to_string(), 5000));
        assert_eq!(config.dataset_path, PathBuf::from("suites.csv"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DATASET_PATH", "/data/suites.csv"),
            ("WORKERS", "2"),
            ("GARAGE_MAX_ITER", "50"),
            ("GARAGE_LEARNING_RATE", "0.1"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), ("0.0.0.0".to_string(), 8080));
        assert_eq!(config.dataset_path, PathBuf::from("/data/suites.csv"));
        assert_eq!(config.workers, Some(2));
        assert_eq!(config.garage.max_iter, 50);
        assert_eq!(config.garage.learning_rate, 0.1);
        assert_eq!(config.garage.c, 1.0);
    }

    #[test]
    fn bad_port_is_reported() {
        let err = ServiceConfig::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigErr {
                var: "PORT",
                value: "http".to_string()
            }
        );
    }
}
