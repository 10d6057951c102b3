use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PAGE_SIZE;
use crate::models::Book;

/// Which search API field the query text is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    All,
    Title,
    Author,
    Subject,
    Isbn,
}

impl SearchType {
    /// The query parameter name used by the search endpoint.
    pub fn field_param(&self) -> &'static str {
        match self {
            SearchType::All => "q",
            SearchType::Title => "title",
            SearchType::Author => "author",
            SearchType::Subject => "subject",
            SearchType::Isbn => "isbn",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchType::All => "all",
            SearchType::Title => "title",
            SearchType::Author => "author",
            SearchType::Subject => "subject",
            SearchType::Isbn => "isbn",
        };
        f.write_str(name)
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SearchType::All),
            "title" => Ok(SearchType::Title),
            "author" => Ok(SearchType::Author),
            "subject" => Ok(SearchType::Subject),
            "isbn" => Ok(SearchType::Isbn),
            other => Err(format!("unknown search type: {}", other)),
        }
    }
}

/// Result ordering. Relevance is the API default and carries no parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Relevance,
    Newest,
    Oldest,
    Rating,
}

impl SortBy {
    /// The `sort` directive sent to the API, `None` for relevance.
    pub fn sort_param(&self) -> Option<&'static str> {
        match self {
            SortBy::Relevance => None,
            SortBy::Newest => Some("new"),
            SortBy::Oldest => Some("old"),
            SortBy::Rating => Some("rating"),
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(SortBy::Relevance),
            "newest" | "new" => Ok(SortBy::Newest),
            "oldest" | "old" => Ok(SortBy::Oldest),
            "rating" => Ok(SortBy::Rating),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Structured input to the search gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub search_type: SearchType,
    pub sort: SortBy,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        SearchQuery {
            text: text.into(),
            search_type: SearchType::All,
            sort: SortBy::Relevance,
            limit: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    pub fn with_sort(mut self, sort: SortBy) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// A page of search results, in the order returned by the API.
///
/// Every field defaults when missing so a partial payload still parses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub docs: Vec<Book>,
    #[serde(default, rename = "numFound")]
    pub num_found: u64,
    #[serde(default)]
    pub start: u64,
}

/// A remembered past search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub search_type: SearchType,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_param_matches_search_type() {
        assert_eq!(SearchType::All.field_param(), "q");
        assert_eq!(SearchType::Title.field_param(), "title");
        assert_eq!(SearchType::Author.field_param(), "author");
        assert_eq!(SearchType::Subject.field_param(), "subject");
        assert_eq!(SearchType::Isbn.field_param(), "isbn");
    }

    #[test]
    fn sort_param_is_none_only_for_relevance() {
        assert_eq!(SortBy::Relevance.sort_param(), None);
        assert_eq!(SortBy::Newest.sort_param(), Some("new"));
        assert_eq!(SortBy::Oldest.sort_param(), Some("old"));
        assert_eq!(SortBy::Rating.sort_param(), Some("rating"));
    }

    #[test]
    fn search_type_round_trips_through_str() {
        for ty in [
            SearchType::All,
            SearchType::Title,
            SearchType::Author,
            SearchType::Subject,
            SearchType::Isbn,
        ] {
            assert_eq!(ty.to_string().parse::<SearchType>().unwrap(), ty);
        }
        assert!("publisher".parse::<SearchType>().is_err());
    }

    #[test]
    fn query_limit_defaults_to_page_size_and_is_overridable() {
        assert_eq!(SearchQuery::new("dune").limit, DEFAULT_PAGE_SIZE);
        assert_eq!(SearchQuery::new("dune").with_limit(5).limit, 5);
    }

    #[test]
    fn result_set_defaults_missing_fields() {
        let set: ResultSet = serde_json::from_str("{}").unwrap();
        assert!(set.docs.is_empty());
        assert_eq!(set.num_found, 0);
        assert_eq!(set.start, 0);
    }
}
