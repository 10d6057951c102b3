use serde::{Deserialize, Serialize};

/// A bibliographic record as returned by the Open Library search endpoint.
///
/// Only `key` is guaranteed to be present; the API omits every other field
/// when it has no value, so everything else defaults to `None`/empty on
/// deserialization instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author_name: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author_key: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_i: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub publisher: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub publish_date: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub publish_year: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub isbn: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subject: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub language: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_pages_median: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<i64>,
}

impl Book {
    /// Title for display, falling back to a placeholder when absent.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Comma-joined author names, or a placeholder when unknown.
    pub fn display_authors(&self) -> String {
        if self.author_name.is_empty() {
            "Unknown author".to_string()
        } else {
            self.author_name.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_with_only_key_present() {
        let book: Book = serde_json::from_value(json!({ "key": "/works/OL1W" })).unwrap();

        assert_eq!(book.key, "/works/OL1W");
        assert!(book.title.is_none());
        assert!(book.author_name.is_empty());
        assert!(book.cover_i.is_none());
        assert!(book.ratings_average.is_none());
        assert_eq!(book.display_title(), "Untitled");
        assert_eq!(book.display_authors(), "Unknown author");
    }

    #[test]
    fn deserializes_full_document() {
        let book: Book = serde_json::from_value(json!({
            "key": "/works/OL893415W",
            "title": "Dune",
            "author_name": ["Frank Herbert"],
            "author_key": ["OL79034A"],
            "cover_i": 11481354,
            "first_publish_year": 1965,
            "isbn": ["9780441172719"],
            "subject": ["Science fiction"],
            "language": ["eng"],
            "number_of_pages_median": 604,
            "edition_count": 120,
            "ratings_average": 4.25,
            "ratings_count": 371
        }))
        .unwrap();

        assert_eq!(book.display_title(), "Dune");
        assert_eq!(book.display_authors(), "Frank Herbert");
        assert_eq!(book.first_publish_year, Some(1965));
        assert_eq!(book.cover_i, Some(11481354));
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let book: Book = serde_json::from_value(json!({ "key": "/works/OL1W" })).unwrap();
        let value = serde_json::to_value(&book).unwrap();

        assert_eq!(value, json!({ "key": "/works/OL1W" }));
    }
}
