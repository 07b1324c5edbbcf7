//! Service configuration resolved from environment variables.
//!
//! Resolution happens once at startup. The resulting [`Config`] is passed
//! down explicitly; nothing below `main` reads the environment.

use crate::error::{NotionIcalError, NotionIcalResult};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_TITLE_PROPERTY: &str = "Name";
pub const DEFAULT_DATE_PROPERTY: &str = "Date";
pub const DEFAULT_MAX_PAGES: usize = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Which database properties carry each event field.
///
/// `description` and `location` are optional: `None` disables extraction
/// of that field entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyNames {
    pub title: String,
    pub date: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl Default for PropertyNames {
    fn default() -> Self {
        PropertyNames {
            title: DEFAULT_TITLE_PROPERTY.to_string(),
            date: DEFAULT_DATE_PROPERTY.to_string(),
            description: None,
            location: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub notion_api_key: String,
    pub notion_database_id: String,
    pub port: u16,
    pub cache_ttl_secs: u64,
    pub property_names: PropertyNames,
    /// Upper bound on pages requested per fetch cycle
    pub max_pages: usize,
    pub request_timeout_secs: u64,
    /// API root, overridable to route through a proxy or a local stand-in
    pub notion_api_base_url: String,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> NotionIcalResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> NotionIcalResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let required = |name: &str| {
            get(name).ok_or_else(|| {
                NotionIcalError::Config(format!("Missing required environment variable: {name}"))
            })
        };

        Ok(Config {
            notion_api_key: required("NOTION_API_KEY")?,
            notion_database_id: required("NOTION_DATABASE_ID")?,
            port: parse_numeric("PORT", get("PORT"), DEFAULT_PORT)?,
            cache_ttl_secs: parse_numeric("CACHE_TTL", get("CACHE_TTL"), DEFAULT_CACHE_TTL_SECS)?,
            property_names: PropertyNames {
                title: get("NOTION_PROPERTY_TITLE")
                    .unwrap_or_else(|| DEFAULT_TITLE_PROPERTY.to_string()),
                date: get("NOTION_PROPERTY_DATE")
                    .unwrap_or_else(|| DEFAULT_DATE_PROPERTY.to_string()),
                description: get("NOTION_PROPERTY_DESCRIPTION"),
                location: get("NOTION_PROPERTY_LOCATION"),
            },
            max_pages: parse_numeric("NOTION_MAX_PAGES", get("NOTION_MAX_PAGES"), DEFAULT_MAX_PAGES)?,
            request_timeout_secs: parse_numeric(
                "NOTION_TIMEOUT_SECS",
                get("NOTION_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            notion_api_base_url: get("NOTION_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_NOTION_API_BASE_URL.to_string()),
        })
    }
}

fn parse_numeric<T: std::str::FromStr>(
    name: &str,
    value: Option<String>,
    default: T,
) -> NotionIcalResult<T> {
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| {
            NotionIcalError::Config(format!("Environment variable {name} must be a number"))
        }),
    }
}
