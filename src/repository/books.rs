//! In-memory books store

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use crate::models::book::{Book, BookId, BookInput};

/// Catalog contents: records in insertion order plus the next identifier.
///
/// Every stored id is unique and strictly below `next_id`.
#[derive(Debug)]
struct Catalog {
    books: IndexMap<BookId, Book>,
    next_id: BookId,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            books: IndexMap::new(),
            next_id: 1,
        }
    }
}

#[derive(Clone, Default)]
pub struct BooksRepository {
    catalog: Arc<RwLock<Catalog>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // Each mutation is a single map operation, so a poisoned lock still
    // guards a consistent catalog.
    fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.catalog.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// All books in insertion order
    pub fn list(&self) -> Vec<Book> {
        self.read().books.values().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.read().books.len()
    }

    /// Append a new book under the next identifier
    pub fn create(&self, input: BookInput) -> Book {
        let mut catalog = self.write();
        let id = catalog.next_id;
        catalog.next_id += 1;

        let book = Book::new(id, input);
        catalog.books.insert(id, book.clone());
        book
    }

    /// Apply `f` to the book with `id` under the write lock and return a copy
    /// of the result, or `None` if no such book exists.
    pub fn modify<F>(&self, id: BookId, f: F) -> Option<Book>
    where
        F: FnOnce(&mut Book),
    {
        let mut catalog = self.write();
        let book = catalog.books.get_mut(&id)?;
        f(book);
        Some(book.clone())
    }

    /// Remove the book with `id`, keeping the order of the remaining books
    pub fn delete(&self, id: BookId) -> Option<Book> {
        self.write().books.shift_remove(&id)
    }
}
