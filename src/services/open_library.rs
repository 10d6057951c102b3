use reqwest::Client;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{ResultSet, SearchQuery};

/// Fields requested from the search endpoint; everything else is dropped
/// server-side to keep payloads small.
const SEARCH_FIELDS: &str = "key,title,author_name,author_key,cover_i,publisher,publish_date,\
                             publish_year,first_publish_year,isbn,subject,language,\
                             number_of_pages_median,edition_count,ratings_average,ratings_count";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    fn letter(&self) -> char {
        match self {
            CoverSize::Small => 'S',
            CoverSize::Medium => 'M',
            CoverSize::Large => 'L',
        }
    }
}

/// Client for the Open Library search and covers endpoints.
#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    client: Client,
    base_url: String,
    covers_url: String,
}

impl OpenLibraryClient {
    pub fn new(config: &Config) -> Self {
        OpenLibraryClient {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            covers_url: config.covers_url.trim_end_matches('/').to_string(),
        }
    }

    /// Runs a search. A single GET, no retry; a non-2xx status maps to
    /// [`AppError::RequestFailed`]. Missing `docs`/`numFound`/`start` in the
    /// body default to empty/zero rather than failing.
    pub async fn search(&self, query: &SearchQuery) -> Result<ResultSet> {
        let url = format!("{}/search.json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&search_params(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::RequestFailed(status.as_u16()));
        }

        Ok(response.json().await?)
    }

    /// Cover image URL for an `<img>`-style consumer. Pure formatting, no
    /// validation of the id.
    pub fn cover_url(&self, cover_id: i64, size: CoverSize) -> String {
        format!("{}/b/id/{}-{}.jpg", self.covers_url, cover_id, size.letter())
    }

    /// Fetches the raw detail document for a work key (e.g. `/works/OL1W`).
    /// Returned JSON is passed through unparsed beyond syntax.
    pub async fn book_details(&self, key: &str) -> Result<serde_json::Value> {
        let url = format!("{}{}.json", self.base_url, key);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::RequestFailed(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

/// Query-string pairs for a search request. Exactly one field parameter is
/// emitted, chosen by the search type; the sort directive is omitted for
/// relevance ordering.
fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![(query.search_type.field_param(), query.text.clone())];
    if let Some(sort) = query.sort.sort_param() {
        params.push(("sort", sort.to_string()));
    }
    params.push(("limit", query.limit.to_string()));
    params.push(("fields", SEARCH_FIELDS.to_string()));
    params
}
