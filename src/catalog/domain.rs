pub mod service;

use async_trait::async_trait;
use crate::books::dto::CatalogEntry;
use crate::core::library::LibraryResult;

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &CatalogEntry) -> LibraryResult<CatalogEntry>;
    async fn remove_book(&self, isbn: &str) -> LibraryResult<()>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<CatalogEntry>;
    async fn find_books_by_title(&self, title: &str) -> LibraryResult<Vec<CatalogEntry>>;
    async fn list_books(&self) -> LibraryResult<Vec<CatalogEntry>>;
    // rendered descriptions of every entry, in catalog order
    async fn describe_books(&self) -> LibraryResult<Vec<String>>;
}
