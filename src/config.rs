//! Watch configuration: keywords, upstream URLs, and the retry policy.
//!
//! Configuration is loaded from an optional YAML file; every field has a
//! default matching the berlin.de deployment, so the binary runs without
//! any file at all. The keyword list is carried explicitly through the
//! pipeline (via [`KeywordSet`]) instead of living in a global.

use crate::keywords::KeywordSet;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::Duration;
use tracing::info;

/// Runtime configuration for one watch run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Watch keywords, in match-priority order.
    pub keywords: Vec<String>,
    /// Press-release listing page.
    pub press_listing_url: String,
    /// Gazette index page carrying the latest PDF link.
    pub gazette_index_url: String,
    /// Base origin used to resolve relative links.
    pub base_url: String,
    /// Retries after the first failed attempt of any fetch.
    pub max_retries: usize,
    /// Fixed delay between attempts, in seconds.
    pub backoff_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            keywords: vec![
                "Schreiner".to_string(),
                "Steckersolargeräte".to_string(),
                "Wegner".to_string(),
                "Wilmersdorf".to_string(),
                "Senatsverwaltung für Mobilität, Verkehr, Klimaschutz und Umwelt".to_string(),
            ],
            press_listing_url: "https://www.berlin.de/presse/".to_string(),
            gazette_index_url:
                "https://www.berlin.de/landesverwaltungsamt/logistikservice/amtsblatt-fuer-berlin/"
                    .to_string(),
            base_url: "https://www.berlin.de".to_string(),
            max_retries: 3,
            backoff_secs: 3,
        }
    }
}

impl WatchConfig {
    /// Load configuration from a YAML file, or fall back to the defaults
    /// when no path is given.
    pub async fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        match path {
            Some(path) => {
                let raw = tokio::fs::read_to_string(path).await?;
                let config: Self = serde_yaml::from_str(&raw)?;
                info!(path, "Loaded watch configuration");
                Ok(config)
            }
            None => {
                info!("No config file given; using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Compile the configured keywords into a [`KeywordSet`].
    pub fn keyword_set(&self) -> Result<KeywordSet, regex::Error> {
        KeywordSet::new(self.keywords.iter().cloned())
    }

    /// Fixed backoff between fetch attempts.
    pub fn backoff(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }
}
