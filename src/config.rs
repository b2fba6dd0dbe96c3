use std::path::PathBuf;

use crate::error::ConfigError;
use crate::quiz::session::DEFAULT_QUIZ_LENGTH;

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub yachts_csv: PathBuf,
    pub database: String,
    pub quiz_length: usize,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            yachts_csv: PathBuf::from("data.csv"),
            database: "db.sqlite".to_string(),
            quiz_length: DEFAULT_QUIZ_LENGTH,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            yachts_csv: lookup("YACHTS_CSV")
                .map(PathBuf::from)
                .unwrap_or(defaults.yachts_csv),
            database: lookup("QUIZ_DATABASE").unwrap_or(defaults.database),
            quiz_length: match lookup("QUIZ_LENGTH") {
                Some(value) => match parse_number::<usize>("QUIZ_LENGTH", value)? {
                    0 => return Err(ConfigError::Zero { key: "QUIZ_LENGTH" }),
                    length => length,
                },
                None => defaults.quiz_length,
            },
            seed: lookup("QUIZ_SEED")
                .map(|value| parse_number("QUIZ_SEED", value))
                .transpose()?,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { key, value })
}
