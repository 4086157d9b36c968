use std::{env, fmt::Display, str::FromStr};

use anyhow::{anyhow, Result};
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_PAGE_LIMIT: u32 = 25;
pub const DEFAULT_PALETTE_SIZE: usize = 5;

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub api_url: String,
    /// Colors requested per page from the backend.
    pub page_limit: u32,
    /// Colors grouped into one palette on the client.
    pub palette_size: usize,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            port: try_load(&lookup, "PORT", DEFAULT_PORT)?,
            api_url: try_load(&lookup, "GALLERY_API_URL", DEFAULT_API_URL.to_string())?,
            page_limit: try_load(&lookup, "GALLERY_PAGE_LIMIT", DEFAULT_PAGE_LIMIT)?,
            palette_size: try_load(&lookup, "GALLERY_PALETTE_SIZE", DEFAULT_PALETTE_SIZE)?,
            supabase_url: optional(&lookup, "SUPABASE_URL"),
            supabase_key: optional(&lookup, "SUPABASE_ANON_KEY"),
        };

        if config.page_limit == 0 || config.palette_size == 0 {
            return Err(anyhow!(
                "GALLERY_PAGE_LIMIT and GALLERY_PALETTE_SIZE must be at least 1"
            ));
        }

        Ok(config)
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e| {
            warn!("Invalid {key} value: {e}");
            anyhow!("invalid {key} value {raw:?}: {e}")
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
