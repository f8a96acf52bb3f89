//! Run-time parameters shared by both benchmark suites.
//!
//! A run is described by three numbers: the corpus size $N$, the number of
//! repetitions $R$ each timed operation is averaged over, and the size $K$ of
//! the search sample used by the map lookup test.

use std::{env, num::ParseIntError};

use thiserror::Error;

/// Default number of tokens in the corpus.
pub const SIZE: usize = 1000;
/// Default number of repetitions for every timed operation.
pub const REPETITIONS: usize = 1000;
/// Default number of tokens looked up by the repeated-lookup test.
pub const SEARCH_SIZE: usize = 10;

/// Environment variable overriding [`SIZE`].
pub const SIZE_VAR: &str = "BIGO_SIZE";
/// Environment variable overriding [`REPETITIONS`].
pub const REPETITIONS_VAR: &str = "BIGO_REPETITIONS";
/// Environment variable overriding [`SEARCH_SIZE`].
pub const SEARCH_SIZE_VAR: &str = "BIGO_SEARCH_SIZE";

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur when building a [`Config`].
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum ConfigError {
    /// The corpus must contain at least one token.
    #[error("size must be non-zero.")]
    ZeroSize,
    /// The mean over zero repetitions is undefined.
    #[error("repetitions must be non-zero.")]
    ZeroRepetitions,
    /// The search sample is drawn without replacement from the corpus.
    #[error("search size {search_size} exceeds corpus size {size}.")]
    SearchSampleTooLarge {
        /// Requested corpus size.
        size: usize,
        /// Requested search sample size.
        search_size: usize,
    },
    /// An environment variable did not hold an unsigned integer.
    #[error("{var} is not a valid count.")]
    Parse {
        /// Name of the offending variable.
        var: &'static str,
        /// Underlying parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// Parameters of a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    size: usize,
    repetitions: usize,
    search_size: usize,
}

impl Config {
    /// Create a new configuration.
    ///
    /// # Errors
    ///
    /// `size` and `repetitions` must be non-zero, and `search_size` cannot
    /// exceed `size`.
    #[inline]
    pub fn new(size: usize, repetitions: usize, search_size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if repetitions == 0 {
            return Err(ConfigError::ZeroRepetitions);
        }
        if search_size > size {
            return Err(ConfigError::SearchSampleTooLarge { size, search_size });
        }
        Ok(Config {
            size,
            repetitions,
            search_size,
        })
    }

    /// Build a configuration from the `BIGO_*` environment variables, falling
    /// back to the defaults for any variable that is unset.
    ///
    /// # Errors
    ///
    /// Fails if a variable is set but does not parse, or if the resulting
    /// values are rejected by [`Config::new`].
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |var: &'static str, default: usize| match lookup(var) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::Parse { var, source }),
            None => Ok(default),
        };
        Self::new(
            read(SIZE_VAR, SIZE)?,
            read(REPETITIONS_VAR, REPETITIONS)?,
            read(SEARCH_SIZE_VAR, SEARCH_SIZE)?,
        )
    }

    /// Number of tokens in the corpus.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of repetitions each timed operation is averaged over.
    #[inline]
    #[must_use]
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Number of tokens looked up per repetition of the lookup test.
    #[inline]
    #[must_use]
    pub fn search_size(&self) -> usize {
        self.search_size
    }
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Config {
            size: SIZE,
            repetitions: REPETITIONS,
            search_size: SEARCH_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{Config, ConfigError, REPETITIONS_VAR, SEARCH_SIZE_VAR, SIZE_VAR};

    fn lookup(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let vars: HashMap<_, _> = vars.iter().map(|&(k, v)| (k, v.to_owned())).collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.size(), 1000);
        assert_eq!(config.repetitions(), 1000);
        assert_eq!(config.search_size(), 10);
    }

    #[rstest]
    #[case(0, 1, 0, ConfigError::ZeroSize)]
    #[case(1, 0, 0, ConfigError::ZeroRepetitions)]
    #[case(4, 1, 5, ConfigError::SearchSampleTooLarge { size: 4, search_size: 5 })]
    fn invalid(
        #[case] size: usize,
        #[case] repetitions: usize,
        #[case] search_size: usize,
        #[case] expected: ConfigError,
    ) {
        assert_eq!(Config::new(size, repetitions, search_size).err(), Some(expected));
    }

    #[test]
    fn search_size_may_equal_size() -> Result<()> {
        let config = Config::new(4, 2, 4)?;
        assert_eq!(config.search_size(), 4);
        Ok(())
    }

    #[test]
    fn env_unset_uses_defaults() -> Result<()> {
        assert_eq!(Config::from_lookup(lookup(&[]))?, Config::default());
        Ok(())
    }

    #[test]
    fn env_overrides() -> Result<()> {
        let config = Config::from_lookup(lookup(&[
            (SIZE_VAR, "100"),
            (REPETITIONS_VAR, " 7 "),
            (SEARCH_SIZE_VAR, "3"),
        ]))?;
        assert_eq!(config, Config::new(100, 7, 3)?);
        Ok(())
    }

    #[test]
    fn env_parse_error() {
        let err = Config::from_lookup(lookup(&[(REPETITIONS_VAR, "many")])).unwrap_err();
        assert_eq!(err.to_string(), "BIGO_REPETITIONS is not a valid count.");
        assert!(matches!(err, ConfigError::Parse { var: REPETITIONS_VAR, .. }));
    }
}
