use std::env;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::application::use_cases::ListingCrawlSettings;

pub const DEFAULT_PROPERTIES_URL: &str = "https://www.missoulahousing.org/affordable-housing";
pub const DEFAULT_VACANCY_PDF_URL: &str =
    "https://static1.squarespace.com/static/63ca2057f38ca022de3416c7/t/69861c5b96719b01b04f0570/1770396763034/vacancy+board+2.6.pdf";
pub const DEFAULT_USER_AGENT: &str =
    "UMCapstoneHousing/0.1 (academic project; contact: parker.munsey)";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("Invalid URL in {name}: {message}")]
    InvalidUrl { name: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub database_url: String,
    pub properties_url: String,
    pub vacancy_pdf_url: String,
    pub user_agent: String,
    pub index_timeout: Duration,
    pub pdf_timeout: Duration,
    pub crawl: ListingCrawlSettings,
}

impl IngestConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let properties_url = url_setting(&lookup, "MHA_PROPERTIES_URL", DEFAULT_PROPERTIES_URL)?;
        let vacancy_pdf_url = url_setting(&lookup, "MHA_VACANCY_PDF_URL", DEFAULT_VACANCY_PDF_URL)?;
        let user_agent = lookup("MHA_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            database_url,
            properties_url,
            vacancy_pdf_url,
            user_agent,
            index_timeout: Duration::from_secs(25),
            pdf_timeout: Duration::from_secs(30),
            crawl: ListingCrawlSettings::default(),
        })
    }
}

fn url_setting<F>(lookup: &F, name: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    Url::parse(&value).map_err(|e| ConfigError::InvalidUrl {
        name,
        message: e.to_string(),
    })?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            IngestConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/mha")]))
                .unwrap();

        assert_eq!(config.database_url, "postgres://localhost/mha");
        assert_eq!(config.properties_url, DEFAULT_PROPERTIES_URL);
        assert_eq!(config.vacancy_pdf_url, DEFAULT_VACANCY_PDF_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.index_timeout, Duration::from_secs(25));
        assert_eq!(config.pdf_timeout, Duration::from_secs(30));
        assert_eq!(config.crawl.politeness_delay, Duration::from_millis(1200));
        assert_eq!(config.crawl.max_links, 30);
    }

    #[test]
    fn test_missing_database_url() {
        let result = IngestConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(ConfigError::Missing("DATABASE_URL"))));

        let blank = IngestConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")]));
        assert!(matches!(blank, Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn test_invalid_override_url() {
        let result = IngestConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/mha"),
            ("MHA_PROPERTIES_URL", "not a url"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidUrl {
                name: "MHA_PROPERTIES_URL",
                ..
            })
        ));
    }
}
