pub mod favorites;
pub mod history;
pub mod open_library;
pub mod storage;

// Re-export public types
pub use favorites::FavoritesStore;
pub use history::SearchHistory;
pub use open_library::{CoverSize, OpenLibraryClient};
pub use storage::JsonStore;
