//! Terminal rendering for result cards, the detail panel, and status
//! banners. Pure formatting over controller state; no state of its own.

use std::fmt::Write as _;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app::View;
use crate::models::{Book, HistoryEntry, ResultSet};
use crate::services::{CoverSize, OpenLibraryClient};

/// One result card line: index, favorite marker, title, authors, year,
/// rating.
pub fn render_card(index: usize, book: &Book, is_favorite: bool) -> String {
    let marker = if is_favorite { "♥" } else { " " };
    let mut line = format!(
        "{:>3}. {} {}  {}",
        index,
        style(marker).red(),
        style(book.display_title()).bold(),
        style(book.display_authors()).dim(),
    );
    if let Some(year) = book.first_publish_year {
        let _ = write!(line, "  ({})", year);
    }
    if let Some(rating) = book.ratings_average {
        let count = book.ratings_count.unwrap_or(0);
        let _ = write!(line, "  ★ {:.1} ({})", rating, count);
    }
    line
}

pub fn render_results_header(query: &str, results: &ResultSet) -> String {
    format!(
        "Search results for {} — found {} books",
        style(format!("\"{}\"", query)).bold(),
        results.num_found,
    )
}

/// Full detail panel for a single book.
pub fn render_detail(book: &Book, gateway: &OpenLibraryClient) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style(book.display_title()).bold().underlined());
    let _ = writeln!(out, "by {}", book.display_authors());

    if let Some(year) = book.first_publish_year {
        let _ = writeln!(out, "First published: {}", year);
    }
    if let Some(editions) = book.edition_count {
        let _ = writeln!(out, "Editions: {}", editions);
    }
    if let Some(pages) = book.number_of_pages_median {
        let _ = writeln!(out, "Pages (median): {}", pages);
    }
    if let Some(rating) = book.ratings_average {
        let _ = writeln!(
            out,
            "Rating: {:.2}/5 ({} ratings)",
            rating,
            book.ratings_count.unwrap_or(0)
        );
    }
    if !book.publisher.is_empty() {
        let _ = writeln!(out, "Publishers: {}", book.publisher.join(", "));
    }
    if !book.language.is_empty() {
        let _ = writeln!(out, "Languages: {}", book.language.join(", "));
    }
    if !book.subject.is_empty() {
        let shown: Vec<_> = book.subject.iter().take(8).cloned().collect();
        let _ = writeln!(out, "Subjects: {}", shown.join(", "));
    }
    match book.cover_i {
        Some(id) => {
            let _ = writeln!(out, "Cover: {}", gateway.cover_url(id, CoverSize::Large));
        }
        None => {
            let _ = writeln!(out, "Cover: (none)");
        }
    }
    let _ = write!(out, "Key: {}", book.key);
    out
}

/// Dismissable error banner with the retry hint.
pub fn render_error(message: &str) -> String {
    format!(
        "{} {}\n{}",
        style("error:").red().bold(),
        message,
        style("type :retry to run the last search again").dim(),
    )
}

pub fn render_empty_state(view: View) -> String {
    match view {
        View::Favorites => "No favorites yet. Toggle one with :fav <n>.".to_string(),
        View::Search => "Ready to search. Type a query to discover books.".to_string(),
    }
}

/// The five most recent searches, newest first.
pub fn render_history(entries: &[HistoryEntry]) -> String {
    let mut out = String::from("Recent searches:");
    for entry in entries.iter().take(5) {
        let _ = write!(out, "\n  {} ({})", entry.query, entry.search_type);
    }
    out
}

/// Spinner shown while a search is in flight.
pub fn search_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(80);
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book() -> Book {
        serde_json::from_value(json!({
            "key": "/works/OL1W",
            "title": "Dune",
            "author_name": ["Frank Herbert"],
            "first_publish_year": 1965,
            "ratings_average": 4.25,
            "ratings_count": 371
        }))
        .unwrap()
    }

    #[test]
    fn card_shows_title_authors_and_favorite_marker() {
        let card = render_card(1, &book(), true);
        assert!(card.contains("Dune"));
        assert!(card.contains("Frank Herbert"));
        assert!(card.contains("♥"));
        assert!(card.contains("(1965)"));
    }

    #[test]
    fn card_degrades_to_placeholders() {
        let bare: Book = serde_json::from_value(json!({ "key": "/works/OL2W" })).unwrap();
        let card = render_card(2, &bare, false);
        assert!(card.contains("Untitled"));
        assert!(card.contains("Unknown author"));
    }

    #[test]
    fn history_lists_at_most_five() {
        let entries: Vec<HistoryEntry> = (0..8)
            .map(|i| HistoryEntry {
                query: format!("q{}", i),
                search_type: crate::models::SearchType::All,
                timestamp: i,
            })
            .collect();
        let rendered = render_history(&entries);
        assert!(rendered.contains("q4"));
        assert!(!rendered.contains("q5"));
    }
}
