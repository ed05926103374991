//! Repository layer for catalog storage

pub mod books;

/// Main repository struct holding the catalog stores
#[derive(Clone, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a repository with an empty catalog
    pub fn new() -> Self {
        Self {
            books: books::BooksRepository::new(),
        }
    }
}
