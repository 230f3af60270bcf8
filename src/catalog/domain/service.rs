use std::collections::HashMap;
use async_trait::async_trait;
use tracing::debug;
use crate::books::domain::{normalize_isbn, Book};
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDto, CatalogEntry, EBookDto};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;

pub(crate) struct CatalogServiceImpl {
    metadata: HashMap<String, String>,
    book_repository: Box<dyn BookRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    // trims identifying text so " 111 " and "111" cannot both be stored
    fn normalize(book: &CatalogEntry) -> LibraryResult<CatalogEntry> {
        let mut book = book.clone();
        let base = book.base_mut();
        base.isbn = normalize_isbn(base.isbn.as_str())?.to_string();
        base.title = base.title.trim().to_string();
        base.author = base.author.trim().to_string();
        Ok(book)
    }

    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            metadata: HashMap::from([("branch_id".to_string(), config.branch_id.to_string())]),
            book_repository,
            events_publisher,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &CatalogEntry) -> LibraryResult<CatalogEntry> {
        let book = Self::normalize(book)?;
        let _ = self.book_repository.create(&BookEntity::from(&book)).await?;
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "books", "books", book.isbn(), &self.metadata, &book)?).await?;
        Ok(book)
    }

    async fn remove_book(&self, isbn: &str) -> LibraryResult<()> {
        let isbn = isbn.trim();
        let _ = self.book_repository.delete(isbn).await?;
        let data = isbn.to_string();
        let _ = self.events_publisher.publish(&DomainEvent::deleted(
            "books", "books", isbn, &self.metadata, &data)?).await?;
        Ok(())
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<CatalogEntry> {
        self.book_repository.get(isbn.trim()).await.map(|b| CatalogEntry::from(&b))
    }

    async fn find_books_by_title(&self, title: &str) -> LibraryResult<Vec<CatalogEntry>> {
        let res = self.book_repository.find_by_title(title).await?;
        debug!(title, matches = res.len(), "searched catalog by title");
        Ok(res.iter().map(CatalogEntry::from).collect())
    }

    async fn list_books(&self) -> LibraryResult<Vec<CatalogEntry>> {
        let res = self.book_repository.list().await?;
        Ok(res.iter().map(CatalogEntry::from).collect())
    }

    async fn describe_books(&self) -> LibraryResult<Vec<String>> {
        Ok(self.list_books().await?.iter().map(|b| b.describe()).collect())
    }
}

impl From<&BookEntity> for CatalogEntry {
    fn from(other: &BookEntity) -> Self {
        let book = BookDto {
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            available: other.available,
            created_at: other.created_at,
        };
        match other.file_size_mb {
            Some(file_size_mb) => CatalogEntry::EBook(EBookDto::new(book, file_size_mb)),
            None => CatalogEntry::Book(book),
        }
    }
}

impl From<&CatalogEntry> for BookEntity {
    fn from(other: &CatalogEntry) -> Self {
        let base = other.base();
        Self {
            isbn: base.isbn.to_string(),
            title: base.title.to_string(),
            author: base.author.to_string(),
            available: base.available,
            file_size_mb: other.file_size_mb(),
            created_at: base.created_at,
        }
    }
}
