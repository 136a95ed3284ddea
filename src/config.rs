use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_PHRASE_LENGTH: usize = 20;
pub const DEFAULT_NUM_TRANSLATION_TABLES: usize = 1;

/// Per-sentence decoding settings the lattice builder reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeConfig {
    /// Longest source span a translation table may match.
    pub max_phrase_length: usize,
    /// One option slot per table is reserved on every input path.
    pub num_translation_tables: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_phrase_length: DEFAULT_MAX_PHRASE_LENGTH,
            num_translation_tables: DEFAULT_NUM_TRANSLATION_TABLES,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failure while trying to read config file `{path}`")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed decode config")]
    Json(#[from] serde_json::Error),

    #[error("`max_phrase_length` must be at least 1")]
    ZeroMaxPhraseLength,
}

impl DecodeConfig {
    pub fn new(max_phrase_length: usize, num_translation_tables: usize) -> Self {
        Self { max_phrase_length, num_translation_tables }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_phrase_length == 0 {
            return Err(ConfigError::ZeroMaxPhraseLength);
        }
        Ok(())
    }

    /// Longest span built for a sentence of `sentence_len` tokens.
    pub fn max_span_length(&self, sentence_len: usize) -> usize {
        sentence_len.min(self.max_phrase_length)
    }
}
