//! Application Configuration
//!
//! A browser bundle has no runtime environment, so overrides are taken from
//! the build environment and baked in at compile time.

use std::num::NonZeroU32;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(6) {
    Some(size) => size,
    None => unreachable!(),
};
pub const DEFAULT_STORAGE_KEY: &str = "pokemon-collection";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Catalog REST root, without trailing slash
    pub api_base_url: String,
    /// Items requested per discovery page
    pub page_size: NonZeroU32,
    /// Local storage key holding the collection blob
    pub storage_key: String,
    pub log_level: log::LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: log::LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `POKEDEX_*` variables present at build time.
    pub fn from_build_env() -> Self {
        Self::default().with_overrides(
            option_env!("POKEDEX_API_BASE_URL"),
            option_env!("POKEDEX_PAGE_SIZE"),
            option_env!("POKEDEX_LOG_LEVEL"),
        )
    }

    /// Apply raw overrides; values that don't parse keep the current setting.
    pub fn with_overrides(
        mut self,
        base_url: Option<&str>,
        page_size: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        if let Some(url) = base_url.map(str::trim).filter(|url| !url.is_empty()) {
            self.api_base_url = url.to_string();
        }
        if let Some(size) = page_size.and_then(|s| s.trim().parse::<NonZeroU32>().ok()) {
            self.page_size = size;
        }
        if let Some(level) = log_level.and_then(|s| s.trim().parse::<log::LevelFilter>().ok()) {
            self.log_level = level;
        }
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.api_base_url.trim_end_matches('/').len();
        self.api_base_url.truncate(trimmed);
        self
    }
}
