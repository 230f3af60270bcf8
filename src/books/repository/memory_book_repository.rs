use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::books::domain::model::BookEntity;
use crate::books::domain::title_matches;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// MemoryBookRepository keeps books in insertion order for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    books: RwLock<Vec<BookEntity>>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(vec![]),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.books.write().await;
        if books.iter().any(|b| b.isbn == entity.isbn) {
            return Err(LibraryError::duplicate_key(
                format!("duplicate isbn {}", entity.isbn).as_str()));
        }
        books.push(entity.clone());
        Ok(1)
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        let books = self.books.read().await;
        books.iter()
            .find(|b| b.isbn == id)
            .cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let mut books = self.books.write().await;
        match books.iter().position(|b| b.isbn == id) {
            Some(ndx) => {
                // Vec::remove shifts the tail down, so relative order is kept
                books.remove(ndx);
                Ok(1)
            }
            None => {
                Err(LibraryError::not_found(format!("book not found for {}", id).as_str()))
            }
        }
    }

    async fn list(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.books.read().await.clone())
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find_by_title(&self, title: &str) -> LibraryResult<Vec<BookEntity>> {
        let books = self.books.read().await;
        Ok(books.iter()
            .filter(|b| title_matches(b.title.as_str(), title))
            .cloned()
            .collect())
    }
}
