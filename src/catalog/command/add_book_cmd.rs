use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::CatalogEntry;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::{BookKind, LibraryError, LibraryResult};

pub struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddBookCommandRequest {
    pub kind: BookKind,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub available: bool,
    pub file_size_mb: Option<u32>,
}

impl AddBookCommandRequest {
    pub fn book(isbn: &str, title: &str, author: &str, available: bool) -> Self {
        Self {
            kind: BookKind::Book,
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            available,
            file_size_mb: None,
        }
    }

    pub fn ebook(isbn: &str, title: &str, author: &str, available: bool, file_size_mb: u32) -> Self {
        Self {
            kind: BookKind::EBook,
            file_size_mb: Some(file_size_mb),
            ..Self::book(isbn, title, author, available)
        }
    }

    /// Parses a file size typed by the operator as whole megabytes.
    pub fn parse_file_size(s: &str) -> LibraryResult<u32> {
        s.trim().parse::<u32>().map_err(|_| LibraryError::validation(
            format!("file size must be a whole number of MB, got {:?}", s.trim()).as_str(),
            Some("file_size_mb".to_string())))
    }

    // a printed book ignores any file size it was given; trimming and isbn checks happen in the catalog
    pub fn build_book(&self) -> LibraryResult<CatalogEntry> {
        let (isbn, title, author) = (self.isbn.as_str(), self.title.as_str(), self.author.as_str());
        match self.kind {
            BookKind::Book => Ok(CatalogEntry::book(isbn, title, author, self.available)),
            BookKind::EBook => {
                let file_size_mb = self.file_size_mb.ok_or_else(|| LibraryError::validation(
                    "ebook requires a file size", Some("file_size_mb".to_string())))?;
                Ok(CatalogEntry::ebook(isbn, title, author, self.available, file_size_mb))
            }
        }
    }
}


#[derive(Debug, Serialize)]
pub struct AddBookCommandResponse {
    pub book: CatalogEntry,
}

impl AddBookCommandResponse {
    pub fn new(book: CatalogEntry) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = req.build_book()?;
        self.catalog_service.add_book(&book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::books::domain::Book;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::{BookKind, LibraryError};

    fn new_command() -> AddBookCommand {
        AddBookCommand::new(Arc::from(factory::create_catalog_service(&Configuration::new("test"))))
    }

    #[tokio::test]
    async fn test_should_run_add_book() {
        let cmd = new_command();

        let res = cmd.execute(AddBookCommandRequest::book(" 111 ", " Dune ", "Herbert", true))
            .await.expect("should add book");
        assert_eq!("111", res.book.isbn());
        assert_eq!("Dune", res.book.title());
        assert_eq!(BookKind::Book, res.book.kind());
    }

    #[tokio::test]
    async fn test_should_run_add_ebook() {
        let cmd = new_command();

        let res = cmd.execute(AddBookCommandRequest::ebook("222", "Dune Messiah", "Herbert", false, 7))
            .await.expect("should add ebook");
        assert_eq!(Some(7), res.book.file_size_mb());
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_add() {
        let cmd = new_command();

        let _ = cmd.execute(AddBookCommandRequest::book("111", "Dune", "Herbert", true)).await.expect("should add book");
        let res = cmd.execute(AddBookCommandRequest::book("111", "Dune", "Herbert", true)).await;
        assert!(matches!(res, Err(CommandError::DuplicateKey { .. })));
    }

    #[tokio::test]
    async fn test_should_reject_blank_isbn() {
        let cmd = new_command();

        let res = cmd.execute(AddBookCommandRequest::book("  ", "Dune", "Herbert", true)).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_should_reject_ebook_without_file_size() {
        let mut req = AddBookCommandRequest::ebook("222", "Dune Messiah", "Herbert", true, 1);
        req.file_size_mb = None;
        assert!(matches!(req.build_book(), Err(LibraryError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_should_parse_file_size() {
        assert_eq!(42, AddBookCommandRequest::parse_file_size(" 42 ").expect("should parse"));
        assert!(AddBookCommandRequest::parse_file_size("big").is_err());
        assert!(AddBookCommandRequest::parse_file_size("-3").is_err());
        assert!(AddBookCommandRequest::parse_file_size("").is_err());
    }

    #[tokio::test]
    async fn test_should_deserialize_request() {
        let req: AddBookCommandRequest = serde_json::from_str(
            r#"{"kind":"EBook","isbn":"9","title":"T","author":"A","available":true,"file_size_mb":3}"#)
            .expect("should parse request");
        assert_eq!(Some(3), req.build_book().expect("should build").file_size_mb());
    }
}
