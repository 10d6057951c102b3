use std::env;
use std::path::PathBuf;

/// Fixed page size for search requests.
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub covers_url: String,
    pub data_dir: PathBuf,
    pub page_size: usize,
}

impl Config {
    pub fn load() -> Self {
        Config {
            base_url: env::var("OPENLIBRARY_BASE_URL")
                .unwrap_or_else(|_| "https://openlibrary.org".to_string()),
            covers_url: env::var("COVERS_BASE_URL")
                .unwrap_or_else(|_| "https://covers.openlibrary.org".to_string()),
            data_dir: env::var("BOOKFINDER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".bookfinder")),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load()
    }
}
