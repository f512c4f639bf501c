//! Top-level fetch, cache, and fallback flow
//!
//! Loads the configuration, fetches facts from the classifier, and either
//! persists them or falls back to the cached copy. Printing is left to the
//! caller so the flow can be exercised without touching stdout.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::{CacheError, FactsCache};
use crate::config::{Config, ConfigError};
use crate::data::{EncClient, EncError, Facts, FETCH_TIMEOUT};

/// Inputs for a single run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Location of the configuration file
    pub config_path: PathBuf,
    /// Location of the cache file
    pub cache_path: PathBuf,
    /// Timeout for the classifier request
    pub timeout: Duration,
}

impl RunOptions {
    /// Creates options for the given paths with the default timeout
    pub fn new(config_path: impl Into<PathBuf>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            cache_path: cache_path.into(),
            timeout: FETCH_TIMEOUT,
        }
    }
}

/// Where the printed facts came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactsSource {
    /// Freshly fetched from the classifier
    Remote,
    /// Read back from the cache after a failed fetch
    Cache,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub facts: Facts,
    pub source: FactsSource,
}

/// Fatal errors that end a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Fetch succeeded but the result could not be cached
    #[error(transparent)]
    CacheWrite(CacheError),

    /// Fetch failed and the cache could not be used either
    #[error("{cache} (fetch failed: {fetch})")]
    CacheRead { fetch: EncError, cache: CacheError },
}

impl RunError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Config(_) => 1,
            RunError::CacheWrite(_) => 2,
            RunError::CacheRead { .. } => 3,
        }
    }
}

/// Runs the pipeline once
///
/// # Returns
/// * `Ok(Outcome)` with enhanced remote facts, or cached facts if the fetch failed
/// * `Err(RunError)` on config failure, cache write failure after a successful
///   fetch, or cache read failure after a failed fetch
pub async fn run(options: &RunOptions) -> Result<Outcome, RunError> {
    let config = Config::load(&options.config_path)?;
    debug!(path = %options.config_path.display(), url = %config.url, "loaded config");

    let cache = FactsCache::new(&options.cache_path);

    match fetch(&config, options.timeout).await {
        Ok(facts) => {
            cache.write(&facts).map_err(RunError::CacheWrite)?;
            debug!(path = %cache.path().display(), "cache updated");
            Ok(Outcome {
                facts,
                source: FactsSource::Remote,
            })
        }
        Err(fetch_error) => {
            warn!(error = %fetch_error, "fetch failed, falling back to cache");
            let facts = cache.read().map_err(|cache_error| RunError::CacheRead {
                fetch: fetch_error,
                cache: cache_error,
            })?;
            match cache.age() {
                Some(age) => info!(age_secs = age.as_secs(), "using cached facts"),
                None => info!("using cached facts"),
            }
            Ok(Outcome {
                facts,
                source: FactsSource::Cache,
            })
        }
    }
}

/// Fetches and enhances facts from the configured classifier
async fn fetch(config: &Config, timeout: Duration) -> Result<Facts, EncError> {
    debug!(url = %config.url, ?timeout, "fetching facts");
    let client = EncClient::with_timeout(timeout)?;
    let mut facts = client.fetch_facts(&config.url).await?;
    facts.enhance();
    debug!(
        hostgroup = %facts.hostgroup,
        environment = %facts.environment,
        is_production = facts.is_production,
        "fetched facts"
    );
    Ok(facts)
}
