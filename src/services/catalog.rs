//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookId, BookInput},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book in insertion order
    pub fn list_books(&self) -> Vec<Book> {
        self.repository.books.list()
    }

    /// Number of books in the catalog
    pub fn count(&self) -> usize {
        self.repository.books.count()
    }

    /// Add a new book; it always starts out available
    pub fn add_book(&self, input: BookInput) -> Book {
        let book = self.repository.books.create(input);
        tracing::info!(book_id = book.id, title = %book.title, "Book added");
        book
    }

    /// Mark a book as borrowed. Borrowing an already borrowed book succeeds.
    pub fn borrow_book(&self, id: BookId) -> AppResult<Book> {
        let book = self.modify(id, |book| book.borrowed = true)?;
        tracing::info!(book_id = id, "Book borrowed");
        Ok(book)
    }

    /// Mark a book as returned. Returning an available book succeeds.
    pub fn return_book(&self, id: BookId) -> AppResult<Book> {
        let book = self.modify(id, |book| book.borrowed = false)?;
        tracing::info!(book_id = id, "Book returned");
        Ok(book)
    }

    /// Replace title, author and year of an existing book
    pub fn update_book(&self, id: BookId, input: BookInput) -> AppResult<Book> {
        let book = self.modify(id, |book| book.apply(input))?;
        tracing::info!(book_id = id, title = %book.title, "Book updated");
        Ok(book)
    }

    /// Remove a book from the catalog
    pub fn delete_book(&self, id: BookId) -> AppResult<Book> {
        let book = self
            .repository
            .books
            .delete(id)
            .ok_or_else(|| not_found(id))?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(book)
    }

    fn modify<F>(&self, id: BookId, f: F) -> AppResult<Book>
    where
        F: FnOnce(&mut Book),
    {
        self.repository
            .books
            .modify(id, f)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: BookId) -> AppError {
    tracing::debug!(book_id = id, "Book lookup failed");
    AppError::NotFound(format!("Book {} not found", id))
}
