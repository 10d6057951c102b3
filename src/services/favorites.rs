use std::path::Path;

use crate::error::Result;
use crate::models::Book;
use crate::services::storage::JsonStore;

const SLOT: &str = "favorites.json";

/// Durable set of user-selected books, unique by work key.
///
/// The in-memory copy is hydrated once at construction and written back on
/// every mutation.
#[derive(Debug)]
pub struct FavoritesStore {
    store: JsonStore<Book>,
    books: Vec<Book>,
}

impl FavoritesStore {
    pub fn new(data_dir: &Path) -> Self {
        let store = JsonStore::new(data_dir, SLOT);
        let books = store.load();
        FavoritesStore { store, books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn is_favorite(&self, key: &str) -> bool {
        self.books.iter().any(|b| b.key == key)
    }

    pub fn add(&mut self, book: Book) -> Result<()> {
        if self.is_favorite(&book.key) {
            return Ok(());
        }
        self.books.push(book);
        self.store.save(&self.books)
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.books.retain(|b| b.key != key);
        self.store.save(&self.books)
    }

    /// Adds or removes by key equality. Returns whether the book is a
    /// favorite afterwards.
    pub fn toggle(&mut self, book: &Book) -> Result<bool> {
        if self.is_favorite(&book.key) {
            self.remove(&book.key)?;
            Ok(false)
        } else {
            self.add(book.clone())?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn book(key: &str) -> Book {
        serde_json::from_value(json!({ "key": key, "title": "T" })).unwrap()
    }

    #[test]
    fn add_is_idempotent_by_key() {
        let dir = tempdir().unwrap();
        let mut favorites = FavoritesStore::new(dir.path());

        favorites.add(book("/works/OL1W")).unwrap();
        favorites.add(book("/works/OL1W")).unwrap();

        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let dir = tempdir().unwrap();
        let mut favorites = FavoritesStore::new(dir.path());
        let b = book("/works/OL1W");

        assert!(favorites.toggle(&b).unwrap());
        assert!(favorites.is_favorite("/works/OL1W"));

        assert!(!favorites.toggle(&b).unwrap());
        assert!(!favorites.is_favorite("/works/OL1W"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn favorites_survive_reload() {
        let dir = tempdir().unwrap();

        {
            let mut favorites = FavoritesStore::new(dir.path());
            favorites.add(book("/works/OL1W")).unwrap();
            favorites.add(book("/works/OL2W")).unwrap();
        }

        let reloaded = FavoritesStore::new(dir.path());
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.is_favorite("/works/OL1W"));
        assert!(reloaded.is_favorite("/works/OL2W"));
    }
}
