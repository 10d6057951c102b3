pub use book::Book;
pub use search::{HistoryEntry, ResultSet, SearchQuery, SearchType, SortBy};

mod book;
mod search;
