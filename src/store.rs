//! In-memory book store.
//!
//! An ordered `Vec<Book>` with unique ids. Every operation is a linear scan;
//! the catalogue is expected to stay small. Insertion order is preserved,
//! updates keep their slot and deletes shift later entries left.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::book::Book;

/// The store as shared between request handlers.
pub type SharedStore = Arc<RwLock<BookStore>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Book with Id:{0} is isset!")]
    AlreadyExists(String),

    #[error("Book with Id:{0} not found!")]
    NotFound(String),
}

#[derive(Debug, Default, Clone)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the store for sharing across handlers.
    pub fn shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn list_all(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Appends `book` unless its id is already taken.
    pub fn add(&mut self, book: Book) -> Result<(), StoreError> {
        if self.position(&book.id).is_some() {
            return Err(StoreError::AlreadyExists(book.id));
        }
        debug!(id = %book.id, "book added");
        self.books.push(book);
        Ok(())
    }

    /// Replaces the entry with the same id, keeping its position.
    pub fn update(&mut self, book: Book) -> Result<(), StoreError> {
        let Some(i) = self.position(&book.id) else {
            return Err(StoreError::NotFound(book.id));
        };
        debug!(id = %book.id, "book updated");
        self.books[i] = book;
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let i = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;
        self.books.remove(i);
        debug!(id, "book deleted");
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }
}

/// Seeds a store. Later duplicates of an id are dropped.
impl From<Vec<Book>> for BookStore {
    fn from(books: Vec<Book>) -> Self {
        let mut store = Self::new();
        for book in books {
            let _ = store.add(book);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book::new("1", "Dune", "Herbert")
    }

    #[test]
    fn add_then_find() {
        let mut store = BookStore::new();
        store.add(dune()).unwrap();
        assert_eq!(store.find_by_id("1"), Some(&dune()));
        assert_eq!(store.find_by_id("2"), None);
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut store = BookStore::new();
        store.add(dune()).unwrap();
        let err = store.add(Book::new("1", "Other", "Someone")).unwrap_err();
        assert_eq!(err, StoreError::AlreadyExists("1".into()));
        assert_eq!(err.to_string(), "Book with Id:1 is isset!");
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id("1"), Some(&dune()));
    }

    #[test]
    fn update_keeps_position() {
        let mut store = BookStore::from(vec![
            dune(),
            Book::new("2", "Emma", "Austen"),
            Book::new("3", "Ulysses", "Joyce"),
        ]);
        store.update(Book::new("2", "Emma", "J. Austen")).unwrap();
        let ids: Vec<_> = store.list_all().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(store.list_all()[1].author, "J. Austen");
    }

    #[test]
    fn update_missing_leaves_store_unchanged() {
        let mut store = BookStore::from(vec![dune()]);
        let before = store.clone();
        let err = store.update(Book::new("9", "x", "y")).unwrap_err();
        assert_eq!(err.to_string(), "Book with Id:9 not found!");
        assert_eq!(store.list_all(), before.list_all());
    }

    #[test]
    fn delete_shifts_later_entries() {
        let mut store = BookStore::from(vec![
            dune(),
            Book::new("2", "Emma", "Austen"),
            Book::new("3", "Ulysses", "Joyce"),
        ]);
        store.delete("2").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.list_all()[1].id, "3");
        assert!(store.find_by_id("2").is_none());
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut store = BookStore::from(vec![dune()]);
        assert_eq!(store.delete("2"), Err(StoreError::NotFound("2".into())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn seeding_drops_duplicates() {
        let store = BookStore::from(vec![dune(), Book::new("1", "Copy", "Nobody")]);
        assert_eq!(store.list_all(), [dune()]);
    }
}
